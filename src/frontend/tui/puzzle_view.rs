//! Puzzle screen: prompt, the instance itself, the answer box, the countdown
//! and, once the round is over, the outcome dialog.

use super::countdown::CountdownBar;
use crate::config::Config;
use crate::puzzles::{PuzzleInstance, VectorPathPuzzle};
use crate::theme::AppTheme;
use crate::widgets::{Outcome, PuzzleSession};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::collections::BTreeSet;

pub fn render(session: &PuzzleSession, config: &Config, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [prompt_area, body_area, answer_area, timer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    Paragraph::new(session.instance.prompt())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .render(prompt_area, buf);

    let body = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.muted))
        .title(format!(
            " {} · {} · round {} ",
            session.kind.title(),
            session.difficulty,
            session.round
        ));
    Paragraph::new(instance_lines(session, theme))
        .block(body)
        .render(body_area, buf);

    render_answer_box(session, answer_area, buf, theme);

    CountdownBar::new(
        &session.countdown,
        &config.ui.countdown_icon,
        config.timer.low_warning,
    )
    .render(timer_area, buf, theme);

    if session.outcome.is_over() {
        let solution = if config.game.reveal_solution {
            session.solution()
        } else {
            None
        };
        render_outcome(session.outcome, solution, body_area, buf, theme);
    }
}

fn render_answer_box(session: &PuzzleSession, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.accent))
        .title(" Answer ");

    // Cursor drawn as a reversed cell
    let chars: Vec<char> = session.answer.chars().collect();
    let before: String = chars[..session.cursor.min(chars.len())].iter().collect();
    let at = chars.get(session.cursor).map_or(" ".to_string(), |c| c.to_string());
    let after: String = chars.iter().skip(session.cursor + 1).collect();

    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(theme.accent)),
        Span::styled(before, Style::default().fg(theme.text)),
        Span::styled(at, Style::default().fg(theme.text).add_modifier(Modifier::REVERSED)),
        Span::styled(after, Style::default().fg(theme.text)),
    ]);
    Paragraph::new(line).block(block).render(area, buf);
}

fn render_outcome(
    outcome: Outcome,
    solution: Option<String>,
    area: Rect,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    let (title, color, headline) = match outcome {
        Outcome::Solved { seconds } => (
            " Solved! ",
            theme.success,
            format!("Correct! Solved in {} seconds.", seconds),
        ),
        Outcome::Failed(reason) => (" Round over ", theme.failure, reason.message().to_string()),
        Outcome::Playing => return,
    };

    let mut lines = vec![Line::styled(headline, Style::default().fg(color).add_modifier(Modifier::BOLD))];
    if let (Outcome::Failed(_), Some(solution)) = (outcome, solution) {
        lines.push(Line::raw(""));
        lines.push(Line::styled("The answer was:", Style::default().fg(theme.muted)));
        lines.push(Line::styled(solution, Style::default().fg(theme.text)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter: next puzzle   Esc: back to the list",
        Style::default().fg(theme.muted),
    ));

    let width = area.width.saturating_sub(4).min(60);
    let height = (lines.len() as u16 + 2).min(area.height);
    let dialog = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    Clear.render(dialog, buf);
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(color))
                .title(title),
        )
        .render(dialog, buf);
}

/// Numbers typed so far, ignoring anything that isn't one
fn typed_numbers(answer: &str) -> BTreeSet<i64> {
    answer
        .split(|c: char| !(c.is_ascii_digit() || c == '-'))
        .filter_map(|t| t.parse().ok())
        .collect()
}

fn numbered_rows(items: &[String], per_row: usize, theme: &AppTheme) -> Vec<Line<'static>> {
    items
        .chunks(per_row)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    [
                        Span::styled(
                            format!("{:>3}) ", row * per_row + i + 1),
                            Style::default().fg(theme.muted),
                        ),
                        Span::styled(format!("{:<9}", item), Style::default().fg(theme.text)),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn matrix_rows(m: &[Vec<i64>]) -> Vec<String> {
    m.iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>4}", v)).collect();
            format!("[{} ]", cells.join(""))
        })
        .collect()
}

fn vector_path_lines(p: &VectorPathPuzzle, answer: &str, theme: &AppTheme) -> Vec<Line<'static>> {
    // Unknown letters are skipped so the trail survives a typo mid-answer
    let moves: Vec<usize> = answer.chars().filter_map(|c| p.label_index(c)).collect();
    let visited = p.trace(&moves);

    // y grows upwards, so the top row is drawn first
    let mut lines = Vec::new();
    for y in (0..p.height).rev() {
        let spans: Vec<Span> = (0..p.width)
            .map(|x| {
                let pos = (x, y);
                if pos == p.start {
                    Span::styled(" S", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                } else if pos == p.target {
                    Span::styled(" T", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
                } else if visited.contains(&pos) {
                    Span::styled(" *", Style::default().fg(theme.timer))
                } else {
                    Span::styled(" ·", Style::default().fg(theme.muted))
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    let vectors: Vec<String> = p
        .vectors
        .iter()
        .map(|v| format!("{} = ({:+}, {:+})", v.label, v.dx, v.dy))
        .collect();
    lines.push(Line::styled(vectors.join("   "), Style::default().fg(theme.text)));
    lines.push(Line::styled(
        format!("Moves used: {} of {}", moves.len(), p.max_steps),
        Style::default().fg(theme.muted),
    ));
    lines
}

fn instance_lines(session: &PuzzleSession, theme: &AppTheme) -> Vec<Line<'static>> {
    let text = Style::default().fg(theme.text);
    let big = text.add_modifier(Modifier::BOLD);

    match &session.instance {
        PuzzleInstance::MagicSquare(p) => {
            let mut lines: Vec<Line> = p
                .grid
                .iter()
                .map(|row| {
                    let spans: Vec<Span> = row
                        .iter()
                        .map(|cell| match cell {
                            Some(v) => Span::styled(format!("{:>5}", v), big),
                            None => Span::styled(
                                format!("{:>5}", "?"),
                                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                            ),
                        })
                        .collect();
                    Line::from(spans)
                })
                .collect();
            lines.push(Line::raw(""));
            lines.push(Line::styled(format!("Magic sum: {}", p.target), text));
            lines
        }
        PuzzleInstance::Divisibility(p) => {
            let items: Vec<String> = p.numbers.iter().map(|n| n.to_string()).collect();
            let mut lines = numbered_rows(&items, 4, theme);
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!(
                    "Pick {}  ·  divisible by {}  ·  digit total {}",
                    p.pick, p.divisor, p.target_sum
                ),
                text,
            ));
            lines
        }
        PuzzleInstance::PolynomialOrder(p) => {
            let items: Vec<String> = p.terms.iter().map(|t| t.to_string()).collect();
            let mut lines = numbered_rows(&items, 4, theme);
            if session.outcome.is_over() {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    format!("Standard form:  {}", p.expression(&p.correct_order())),
                    Style::default().fg(theme.muted),
                ));
            }
            lines
        }
        PuzzleInstance::VectorPath(p) => vector_path_lines(p, &session.answer, theme),
        PuzzleInstance::Fractions(p) => {
            let mut lines = vec![Line::styled(
                format!("   {}   {}   {}   =   ?", p.left, p.operation.symbol(), p.right),
                big,
            )];
            if p.require_lowest_terms {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    "Give the answer in lowest terms.",
                    Style::default().fg(theme.muted),
                ));
            }
            lines
        }
        PuzzleInstance::PrimeHunt(p) => {
            let typed = typed_numbers(&session.answer);
            p.rows()
                .into_iter()
                .map(|row| {
                    let spans: Vec<Span> = row
                        .into_iter()
                        .map(|n| {
                            let style = if typed.contains(&i64::from(n)) {
                                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                            } else {
                                text
                            };
                            Span::styled(format!("{:>5}", n), style)
                        })
                        .collect();
                    Line::from(spans)
                })
                .collect()
        }
        PuzzleInstance::MatrixProduct(p) => {
            let left = matrix_rows(&p.left);
            let right = matrix_rows(&p.right);
            let left_width = left.iter().map(|s| s.chars().count()).max().unwrap_or(0);
            let rows = left.len().max(right.len());
            let mut lines: Vec<Line> = (0..rows)
                .map(|i| {
                    let l = left.get(i).map_or("", String::as_str);
                    let r = right.get(i).map_or("", String::as_str);
                    let op = if i == 0 { " × " } else { "   " };
                    Line::styled(format!("{:<w$}{}{}", l, op, r, w = left_width), big)
                })
                .collect();
            let (r, c) = p.result_shape();
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("The product is {}×{}. Type its {} entries row by row.", r, c, r * c),
                Style::default().fg(theme.muted),
            ));
            lines
        }
        PuzzleInstance::LinearEquation(p) => {
            vec![Line::styled(format!("   {}", p.equation()), big)]
        }
        PuzzleInstance::Sequence(p) => {
            let mut spans: Vec<Span> = p
                .shown
                .iter()
                .map(|v| Span::styled(format!("{:>7}", v), big))
                .collect();
            spans.push(Span::styled(
                format!("{:>7}", "?"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
            let mut lines = vec![Line::from(spans)];
            if session.outcome.is_over() {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    format!("Rule: {}", p.rule_name()),
                    Style::default().fg(theme.muted),
                ));
            }
            lines
        }
        PuzzleInstance::GcdLcm(p) => {
            let numbers: Vec<String> = p.numbers.iter().map(|n| n.to_string()).collect();
            vec![
                Line::styled(format!("   {}", numbers.join("    ")), big),
                Line::raw(""),
                Line::styled("Answer: gcd, lcm", Style::default().fg(theme.muted)),
            ]
        }
    }
}
