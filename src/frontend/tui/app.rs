use super::{login, menu, profile_view, puzzle_view};
use crate::config::Config;
use crate::core::{AppCore, Screen, ToastKind};
use crate::frontend::{Frontend, FrontendEvent};
use crate::theme::AppTheme;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// TUI Frontend using ratatui
///
/// Renders the application with ratatui and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    theme: AppTheme,
    show_hints: bool,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables bracketed paste, and enters alternate screen.
    pub fn new(config: &Config) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(config.ui.poll_timeout_ms),
            theme: AppTheme::from_config(&config.ui),
            show_hints: config.ui.show_hints,
            restored: false,
        })
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            Event::Paste(text) => Some(FrontendEvent::paste(text)),
            _ => None,
        }
    }
}

fn hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "↑/↓ move  Enter select  q quit",
        Screen::AllPuzzles => "↑/↓ move  Enter play  d difficulty  Esc back",
        Screen::Puzzle(_) => "Enter submit  Ctrl+N new  Ctrl+G give up  .help commands  Esc back",
        Screen::Login | Screen::SignUp => "Tab next field  Enter submit  Esc back",
        Screen::Profile => "Esc back",
    }
}

fn render_header(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let line = Line::from(vec![
        Span::styled(
            " numberlab ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", core.screen.title()), Style::default().fg(theme.text)),
        Span::styled(format!(" {} ", core.screen.route()), Style::default().fg(theme.muted)),
        Span::styled(format!(" {} ", core.difficulty), Style::default().fg(theme.timer)),
        Span::styled(format!(" {} ", core.display_name()), Style::default().fg(theme.text)),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn render_footer(core: &AppCore, show_hints: bool, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let line = match &core.toast {
        Some(toast) => {
            let color = match toast.kind {
                ToastKind::Info => theme.accent,
                ToastKind::Success => theme.success,
                ToastKind::Error => theme.failure,
            };
            Line::styled(format!(" {}", toast.message), Style::default().fg(color))
        }
        None if show_hints => Line::styled(
            format!(" {}", hints(core.screen)),
            Style::default().fg(theme.muted),
        ),
        None => Line::raw(""),
    };
    Paragraph::new(line).render(area, buf);
}

/// Draw the whole application into `buf`
pub fn draw(core: &AppCore, show_hints: bool, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(core, header_area, buf, theme);

    match core.screen {
        Screen::Home => menu::render_home(core, body_area, buf, theme),
        Screen::AllPuzzles => menu::render_catalogue(core, body_area, buf, theme),
        Screen::Puzzle(_) => {
            if let Some(session) = &core.session {
                puzzle_view::render(session, &core.config, body_area, buf, theme);
            }
        }
        Screen::Login | Screen::SignUp => login::render(&core.login, body_area, buf, theme),
        Screen::Profile => {
            profile_view::render(&core.profile, core.user.is_some(), body_area, buf, theme)
        }
    }

    render_footer(core, show_hints, footer_area, buf, theme);
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Wait up to the poll timeout for the first event, then drain the rest
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        core.expire_toast(Instant::now());

        let theme = &self.theme;
        let show_hints = self.show_hints;
        self.terminal
            .draw(|f| {
                let area = f.area();
                draw(core, show_hints, area, f.buffer_mut(), theme);
            })
            .context("Failed to draw frame")?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text_of(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draw_every_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut core = AppCore::new(
            Config::default(),
            dir.path().to_path_buf(),
            StdRng::seed_from_u64(11),
        );
        let theme = AppTheme::default();
        let area = Rect::new(0, 0, 100, 32);

        for route in ["/", "/all-puzzles", "/all-puzzles/vector-path", "/login", "/signup", "/profile"] {
            assert!(core.navigate_route(route));
            let mut buf = Buffer::empty(area);
            draw(&core, true, area, &mut buf, &theme);
            let text = text_of(&buf);
            assert!(text.contains(route), "header shows {}", route);
            assert!(text.contains(core.screen.title()));
        }
    }

    #[test]
    fn test_toast_replaces_hints() {
        let dir = tempfile::tempdir().unwrap();
        let mut core = AppCore::new(
            Config::default(),
            dir.path().to_path_buf(),
            StdRng::seed_from_u64(1),
        );
        let theme = AppTheme::default();
        let area = Rect::new(0, 0, 80, 24);

        let mut buf = Buffer::empty(area);
        draw(&core, true, area, &mut buf, &theme);
        assert!(text_of(&buf).contains("q quit"));

        core.show_toast("Signed out", ToastKind::Info);
        let mut buf = Buffer::empty(area);
        draw(&core, true, area, &mut buf, &theme);
        let text = text_of(&buf);
        assert!(text.contains("Signed out"));
        assert!(!text.contains("q quit"));
    }
}
