use crate::game::HistoryEntry;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered_rect, inner};

pub(super) fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal the next hand"),
        Line::from("- F: fold"),
        Line::from("- K: check"),
        Line::from("- C: call"),
        Line::from("- R: raise by the minimum"),
        Line::from("- a: raise to an amount"),
        Line::from("- A (shift): all-in"),
        Line::from("- H: hand history"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Amount Entry:", bold)),
        Line::from("- 0-9 / Backspace: edit"),
        Line::from("- + / -: adjust by one big blind"),
        Line::from("- Enter: submit, Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Help").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn history_line(entry: &HistoryEntry, app: &AppState) -> String {
    let who = match entry.seat {
        Some(seat) => app
            .table
            .seats()
            .get(seat)
            .map_or_else(|| format!("seat {seat}"), |p| p.nickname().to_string()),
        None => "Board".to_string(),
    };
    let amount = entry.amount.map(|v| format!(" {v}")).unwrap_or_default();
    let cards = if entry.cards.is_empty() {
        String::new()
    } else {
        format!(" [{}]", crate::cards::format_cards(&entry.cards))
    };
    format!("{:<8} {who} {}{amount}{cards}", entry.phase.label(), entry.verb.label())
}

pub(super) fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let history = app.table.engine().history();
    let end = history.len().saturating_sub(app.history_offset());
    let start = end.saturating_sub(AppState::HISTORY_PAGE_SIZE);
    let mut lines: Vec<Line> =
        history[start..end].iter().map(|e| Line::from(history_line(e, app))).collect();
    if lines.is_empty() {
        lines.push(Line::from("No history yet."));
    }
    if !app.table.results().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Previous hands:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for r in app.table.results().iter().take(5) {
            lines.push(Line::from(format!(
                "{} won {} ({})",
                r.winners.join(", "),
                r.amount,
                r.description
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("History").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

pub(super) fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let legal = app.table.engine().legal_actions(app.table.seats());
    let min = legal.and_then(|l| l.min_raise_to).unwrap_or(0);
    let max = legal.and_then(|l| l.max_raise_to).unwrap_or(0);
    let lines = vec![
        Line::from(format!("Raise to: {}", app.amount_entry_text().unwrap_or(""))),
        Line::from(format!("Min: {min}   Max: {max}")),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- in BB steps, Enter submit, Esc cancel"),
    ];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Raise").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}
