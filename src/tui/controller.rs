use crate::tui::app::{AppState, InputAction};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Route a key press; returns `true` to quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if matches!(code, KeyCode::Char('?')) {
        app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }
    if app.amount_entry_active() {
        let input = match code {
            KeyCode::Esc => InputAction::AmountCancel,
            KeyCode::Enter => InputAction::AmountSubmit,
            KeyCode::Backspace => InputAction::AmountBackspace,
            KeyCode::Char('+') | KeyCode::Char('=') => InputAction::AmountIncBb,
            KeyCode::Char('-') | KeyCode::Char('_') => InputAction::AmountDecBb,
            KeyCode::Char(c) if c.is_ascii_digit() => InputAction::AmountDigit(c as u8 - b'0'),
            _ => return false,
        };
        app.handle_input(input);
        return false;
    }

    // Case matters: `a` opens amount entry, `A` shoves.
    let input = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char(' ') => InputAction::NewHand,
        KeyCode::Char('h') | KeyCode::Char('H') => InputAction::ToggleHistory,
        KeyCode::Char('f') | KeyCode::Char('F') => InputAction::Fold,
        KeyCode::Char('k') | KeyCode::Char('K') => InputAction::Check,
        KeyCode::Char('c') | KeyCode::Char('C') => InputAction::Call,
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::RaiseMin,
        KeyCode::Char('a') => InputAction::AmountOpen,
        KeyCode::Char('A') => InputAction::AllIn,
        _ => return false,
    };
    app.handle_input(input);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::game::Phase;

    #[test]
    fn keys_drive_a_hand() {
        let cfg = TableConfig { players: 2, seed: Some(3), ..TableConfig::default() };
        let mut app = AppState::new(&cfg).unwrap();
        assert!(!handle_key(&mut app, KeyCode::Char(' ')));
        assert_eq!(app.table.engine().phase(), Phase::Preflop);
        handle_key(&mut app, KeyCode::Char('c'));
        handle_key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.table.engine().phase(), Phase::Flop);
        handle_key(&mut app, KeyCode::Char('A'));
        assert_eq!(app.table.engine().current_bet(), 1980);
        handle_key(&mut app, KeyCode::Char('f'));
        assert!(!app.hand_live());
        assert!(handle_key(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn amount_entry_captures_digits() {
        let cfg = TableConfig { players: 2, seed: Some(3), ..TableConfig::default() };
        let mut app = AppState::new(&cfg).unwrap();
        handle_key(&mut app, KeyCode::Char(' '));
        handle_key(&mut app, KeyCode::Char('a'));
        assert!(app.amount_entry_active());
        handle_key(&mut app, KeyCode::Char('q'));
        assert!(app.amount_entry_active());
        handle_key(&mut app, KeyCode::Char('+'));
        assert_eq!(app.amount_entry_text(), Some("60"));
        handle_key(&mut app, KeyCode::Esc);
        assert!(!app.amount_entry_active());
    }
}
