//! Home screen and the puzzle catalogue

use crate::core::{AppCore, HomeEntry};
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

const BANNER: &str = "n u m b e r l a b";

fn highlight(theme: &AppTheme) -> Style {
    Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

pub fn render_home(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [banner_area, menu_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).areas(area);

    let greeting = match &core.user {
        Some(user) => format!("Welcome back, {}!", user.email),
        None => "Math puzzles for curious minds. Log in to keep your progress.".to_string(),
    };
    Paragraph::new(vec![
        Line::styled(
            BANNER,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(greeting, Style::default().fg(theme.muted)),
    ])
    .centered()
    .render(banner_area, buf);

    let signed_in = core.user.is_some();
    let items: Vec<ListItem> = core
        .home_menu
        .items
        .iter()
        .map(|entry: &HomeEntry| ListItem::new(format!("  {}", entry.label(signed_in))))
        .collect();

    let width = menu_area.width.min(36);
    let centered = Rect::new(
        menu_area.x + (menu_area.width - width) / 2,
        menu_area.y,
        width,
        menu_area.height.min(items.len() as u16 + 2),
    );

    let mut state = ListState::default().with_selected(Some(core.home_menu.selected));
    StatefulWidget::render(
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.muted)),
            )
            .style(Style::default().fg(theme.text))
            .highlight_style(highlight(theme)),
        centered,
        buf,
        &mut state,
    );
}

pub fn render_catalogue(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

    let items: Vec<ListItem> = core
        .catalogue
        .items
        .iter()
        .map(|kind| {
            let solved = core.profile.stats_for(*kind).solved;
            let badge = if solved > 0 {
                Span::styled(format!("  ✓{}", solved), Style::default().fg(theme.success))
            } else {
                Span::raw("")
            };
            ListItem::new(Line::from(vec![Span::raw(format!(" {}", kind.title())), badge]))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(core.catalogue.selected));
    StatefulWidget::render(
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.muted))
                    .title(format!(" Puzzles · {} ", core.difficulty)),
            )
            .style(Style::default().fg(theme.text))
            .highlight_style(highlight(theme)),
        list_area,
        buf,
        &mut state,
    );

    let Some(kind) = core.catalogue.selected_item() else {
        return;
    };
    let stats = core.profile.stats_for(*kind);
    let best = stats
        .best_seconds
        .map_or("-".to_string(), |s| format!("{}s", s));
    let limit = core.config.time_limit(*kind, core.difficulty);

    let lines = vec![
        Line::styled(
            kind.title(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(kind.blurb(), Style::default().fg(theme.text)),
        Line::raw(""),
        Line::styled(
            format!("Time limit on {}: {}s", core.difficulty, limit),
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            format!(
                "Played {}  ·  Solved {}  ·  Best {}  ·  Streak {}",
                stats.played, stats.solved, best, stats.current_streak
            ),
            Style::default().fg(theme.muted),
        ),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.muted))
                .title(format!(" {} ", kind.slug())),
        )
        .render(detail_area, buf);
}
