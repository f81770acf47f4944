mod overlays;
mod table;

use crate::tui::app::AppState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Frame;

pub fn draw(f: &mut Frame, app: &AppState) {
    table::draw_table(f, app);
    if app.help_open() {
        overlays::draw_help(f);
    } else if app.history_open() {
        overlays::draw_history(f, app);
    } else if app.amount_entry_active() {
        overlays::draw_amount_entry(f, app);
    }
}

/// Area inside a one-cell border.
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let split = |dir: Direction, pct: u16, area: Rect| {
        Layout::default()
            .direction(dir)
            .constraints([
                Constraint::Percentage((100 - pct) / 2),
                Constraint::Percentage(pct),
                Constraint::Percentage((100 - pct) / 2),
            ])
            .split(area)[1]
    };
    split(Direction::Horizontal, percent_x, split(Direction::Vertical, percent_y, r))
}
