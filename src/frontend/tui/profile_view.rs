//! Profile page: per-puzzle statistics and achievements

use crate::achievements::Achievement;
use crate::profile::Profile;
use crate::puzzles::PuzzleKind;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

pub fn render(profile: &Profile, signed_in: bool, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [summary_area, table_area, badges_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(Achievement::ALL.len() as u16 + 2),
    ])
    .areas(area);

    let mut summary = vec![Line::from(vec![
        Span::styled(
            profile.user.clone(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "   played {}  ·  solved {}",
                profile.total_played(),
                profile.total_solved()
            ),
            Style::default().fg(theme.text),
        ),
    ])];
    summary.push(match (&profile.last_played, signed_in) {
        (_, false) => Line::styled(
            "Playing as guest. Log in to keep progress under your account.",
            Style::default().fg(theme.muted),
        ),
        (Some(when), true) => Line::styled(format!("Last played {}", when), Style::default().fg(theme.muted)),
        (None, true) => Line::styled("No puzzles played yet", Style::default().fg(theme.muted)),
    });
    Paragraph::new(summary).render(summary_area, buf);

    let header = Row::new(["Puzzle", "Played", "Solved", "Failed", "Best", "Streak", "Top"])
        .style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = PuzzleKind::ALL
        .iter()
        .map(|kind| {
            let s = profile.stats_for(*kind);
            let best = s.best_seconds.map_or("-".to_string(), |b| format!("{}s", b));
            Row::new(vec![
                Cell::from(kind.title()),
                Cell::from(s.played.to_string()),
                Cell::from(s.solved.to_string()),
                Cell::from(s.failed.to_string()),
                Cell::from(best),
                Cell::from(s.current_streak.to_string()),
                Cell::from(s.best_streak.to_string()),
            ])
            .style(Style::default().fg(if s.played > 0 { theme.text } else { theme.muted }))
        })
        .collect();

    Widget::render(
        Table::new(
            rows,
            [
                Constraint::Min(22),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.muted))
                .title(" Statistics "),
        ),
        table_area,
        buf,
    );

    let badges: Vec<Line> = Achievement::ALL
        .iter()
        .map(|a| {
            let unlocked = profile.achievements.iter().find(|u| u.achievement == *a);
            match unlocked {
                Some(u) => Line::from(vec![
                    Span::styled(format!(" ★ {:<16}", a.title()), Style::default().fg(theme.success)),
                    Span::styled(a.description(), Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  ({})", u.unlocked_at.get(..10).unwrap_or(u.unlocked_at.as_str())),
                        Style::default().fg(theme.muted),
                    ),
                ]),
                None => Line::from(vec![
                    Span::styled(format!(" ☆ {:<16}", a.title()), Style::default().fg(theme.muted)),
                    Span::styled(a.description(), Style::default().fg(theme.muted)),
                ]),
            }
        })
        .collect();

    Paragraph::new(badges)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.muted))
                .title(" Achievements "),
        )
        .render(badges_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::Difficulty;
    use crate::widgets::Outcome;

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
    fn test_unlocked_badges_and_stats_shown() {
        let mut profile = Profile::new("kid@example.com");
        profile.record_result(PuzzleKind::Fractions, Difficulty::Easy, Outcome::Solved { seconds: 42 });

        let area = Rect::new(0, 0, 90, 30);
        let mut buf = Buffer::empty(area);
        render(&profile, true, area, &mut buf, &AppTheme::default());
        let text = text_of(&buf);

        assert!(text.contains("kid@example.com"));
        assert!(text.contains("solved 1"));
        assert!(text.contains("★ First Steps"));
        assert!(text.contains("☆ Speed Demon"));
        assert!(text.contains("42s"));
    }

    #[test]
    fn test_guest_hint() {
        let profile = Profile::new("guest");
        let area = Rect::new(0, 0, 90, 30);
        let mut buf = Buffer::empty(area);
        render(&profile, false, area, &mut buf, &AppTheme::default());
        assert!(text_of(&buf).contains("Playing as guest"));
    }
}
