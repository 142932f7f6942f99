//! Log-in and sign-up form

use crate::theme::AppTheme;
use crate::widgets::{FieldNavigable, LoginForm, LoginMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const FORM_WIDTH: u16 = 50;
const FORM_HEIGHT: u16 = 14;

fn field_line<'a>(label: &'a str, value: String, focused: bool, theme: &AppTheme) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    let mut spans = vec![
        Span::styled(format!("{:>10}  ", label), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
    ];
    if focused {
        spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
    }
    Line::from(spans)
}

pub fn render(form: &LoginForm, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let width = FORM_WIDTH.min(area.width);
    let height = FORM_HEIGHT.min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let focused = form.current_field();
    let button_style = if form.federated_focused() {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme.text)
    };

    let switch_hint = match form.mode {
        LoginMode::SignIn => "No account yet? Ctrl+S to sign up",
        LoginMode::SignUp => "Have an account? Ctrl+S to log in",
    };

    let status = if form.pending {
        Line::styled("Working...", Style::default().fg(theme.timer))
    } else if let Some(error) = &form.error {
        Line::styled(error.clone(), Style::default().fg(theme.failure))
    } else {
        Line::raw("")
    };

    let lines = vec![
        Line::raw(""),
        field_line("Email", form.email.clone(), focused == 0, theme),
        Line::raw(""),
        field_line("Password", form.masked_password(), focused == 1, theme),
        Line::raw(""),
        Line::styled("   [ Continue with Google ]   ", button_style).centered(),
        Line::raw(""),
        status.centered(),
        Line::raw(""),
        Line::styled(switch_hint, Style::default().fg(theme.muted)).centered(),
        Line::styled("Tab: next field   Enter: submit   Esc: back", Style::default().fg(theme.muted))
            .centered(),
    ];

    Clear.render(rect, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.accent))
                .title(format!(" {} ", form.mode.title())),
        )
        .render(rect, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::TextEditable;

    #[test]
    fn test_password_is_masked() {
        let mut form = LoginForm::new(LoginMode::SignUp);
        form.paste("kid@example.com");
        form.next_field();
        form.paste("hunter22");
        form.error = Some("Wrong password".to_string());

        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        render(&form, area, &mut buf, &AppTheme::default());

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("kid@example.com"));
        assert!(!text.contains("hunter22"));
        assert!(text.contains("••••••••"));
        assert!(text.contains("Wrong password"));
        assert!(text.contains("Create an account"));
    }
}
