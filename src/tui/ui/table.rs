use crate::cards::{Card, Suit};
use crate::game::Phase;
use crate::seat::{Player, SeatStatus};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::inner;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // board
            Constraint::Min(3),    // seats
            Constraint::Length(4), // status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_board(f, app, chunks[1]);
    draw_seats(f, app, chunks[2]);
    draw_status(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let engine = app.table.engine();
    let blinds = app.table.blinds();
    let to_call = engine.actor().map_or(0, |s| engine.to_call(app.table.seats(), s));
    let lines = vec![
        Line::from(format!(
            "SB: {}  BB: {}  Pot: {}  Hands: {}",
            blinds.small_blind,
            blinds.big_blind,
            engine.pot(),
            app.table.results().len()
        )),
        Line::from(format!(
            "Bet: {}   MinRaise: {}   ToCall: {}",
            engine.current_bet(),
            engine.min_raise(),
            to_call
        )),
    ];
    let header = Paragraph::new(lines)
        .block(Block::default().title("holdem-table").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, app: &AppState, area: Rect) {
    let engine = app.table.engine();
    let phase = engine.phase();
    f.render_widget(
        Block::default().title(format!("Board: {phase}")).borders(Borders::ALL),
        area,
    );
    let board_inner = inner(area);
    let card_width = board_inner.width.saturating_sub(2) / 5;
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(card_width); 5])
        .split(board_inner);
    let fresh = match phase {
        Phase::Flop => 0..3,
        Phase::Turn => 3..4,
        Phase::River => 4..5,
        _ => 0..0,
    };
    let board = engine.board().as_slice();
    for (i, slot) in slots.iter().enumerate() {
        let border = fresh.contains(&i).then_some(Color::Yellow);
        render_card(f, *slot, board.get(i).copied(), border);
    }
}

fn draw_seats(f: &mut Frame, app: &AppState, area: Rect) {
    let occupied: Vec<(usize, &Player)> = app.table.seats().occupied().collect();
    let total = occupied.len();
    let top = total.div_ceil(2);
    let row_height = area.height / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(row_height), Constraint::Length(row_height)])
        .split(area);
    // Top row left to right, bottom row right to left, to read clockwise.
    let (upper, lower) = occupied.split_at(top);
    let lower: Vec<(usize, &Player)> = lower.iter().rev().copied().collect();
    for (row, seats) in [(rows[0], upper.to_vec()), (rows[1], lower)] {
        if seats.is_empty() {
            continue;
        }
        let col_width = row.width / seats.len() as u16;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(col_width); seats.len()])
            .split(row);
        for (col, (seat, player)) in cols.iter().zip(seats) {
            render_seat(f, *col, app, seat, player);
        }
    }
}

fn render_seat(f: &mut Frame, area: Rect, app: &AppState, seat: usize, p: &Player) {
    let engine = app.table.engine();
    let acting = engine.actor() == Some(seat);
    let mut title = p.nickname().to_string();
    for (flag, tag) in [
        (p.is_dealer(), " [BTN]"),
        (p.is_small_blind(), " [SB]"),
        (p.is_big_blind(), " [BB]"),
        (acting, " [Act]"),
    ] {
        if flag {
            title.push_str(tag);
        }
    }
    let payout = engine.settlement().and_then(|s| s.payout_for(seat));
    let border = if payout.is_some() {
        Some(Color::Green)
    } else {
        match p.status() {
            SeatStatus::Fold | SeatStatus::SittingOut => Some(Color::DarkGray),
            SeatStatus::AllIn => Some(Color::LightRed),
            _ if acting => Some(Color::Yellow),
            _ => None,
        }
    };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let last = match p.last_action() {
        Some(a) => Line::from(format!("Last: {a}")),
        None => Line::from(vec![Span::raw("Last: "), Span::styled("--", dim)]),
    };
    let mut lines = vec![
        Line::from(format!("Stack: {}", p.chips())),
        Line::from(format!("Bet: {}  Total: {}", p.bet(), p.total_bet())),
        Line::from(format!("Status: {}", p.status())),
        last,
    ];
    if let Some(win) = payout {
        lines.push(Line::from(Span::styled(
            format!("Wins {}: {}", win.amount, win.description),
            Style::default().fg(Color::Green),
        )));
    }

    // Hot-seat: only the acting player's cards are face up until showdown.
    let face_up = acting || (engine.phase() == Phase::Showdown && p.status().is_contesting());
    let seat_inner = inner(area);
    let (text_area, cards_area) = match p.hole() {
        Some(_) if seat_inner.height > 3 => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(3)])
                .split(seat_inner);
            (split[0], Some(split[1]))
        }
        _ => (seat_inner, None),
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    if let (Some(hole), Some(cards)) = (p.hole(), cards_area) {
        let cw = cards.width.saturating_sub(2) / 2;
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(cw), Constraint::Length(cw)])
            .split(cards);
        for (half, card) in halves.iter().zip(hole.as_array()) {
            render_card(f, *half, face_up.then_some(card), Some(Color::Cyan));
        }
    }
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));
    let engine = app.table.engine();

    let mut left = Vec::new();
    if let Some(msg) = app.message() {
        left.push(Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Red))));
    }
    match engine.legal_actions(app.table.seats()) {
        Some(legal) => {
            let name = app.table.seats().get(legal.seat).map_or("", |p| p.nickname());
            let on = |enabled: bool| {
                if enabled {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                }
            };
            left.push(Line::from(vec![
                Span::raw(format!("{name} to act: ")),
                Span::styled("F fold", on(true)),
                Span::raw(" • "),
                Span::styled("K check", on(legal.can_check)),
                Span::raw(" • "),
                Span::styled(format!("C call {}", legal.to_call), on(legal.to_call > 0)),
                Span::raw(" • "),
                Span::styled("R/a raise", on(legal.min_raise_to.is_some())),
                Span::raw(" • "),
                Span::styled("A all-in", on(true)),
            ]));
        }
        None => left.push(Line::from("Hand over: press Space to deal.")),
    }

    let right = vec![Line::from("? help • H history • Q quit")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), cols[1]);
}

fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Clubs | Suit::Spades => Style::default().fg(Color::White),
    }
}

fn render_card(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(
            format!("{}{}", c.rank(), c.suit().symbol()),
            suit_style(c.suit()),
        )),
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
