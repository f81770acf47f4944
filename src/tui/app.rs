use crate::config::TableConfig;
use crate::game::{Action, Phase};
use crate::table::{Table, TableError};
use std::time::{Duration, Instant};

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewHand,
    Fold,
    Check,
    Call,
    RaiseMin,
    AllIn,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountIncBb,
    AmountDecBb,
    AmountSubmit,
    AmountCancel,
}

/// Hot-seat table state: every key acts for the seat holding the turn.
#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub table: Table,
    pub started: Instant,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    message: Option<String>,
    message_at: Option<Instant>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const MESSAGE_TTL: Duration = Duration::from_secs(4);

    pub fn new(cfg: &TableConfig) -> Result<Self, TableError> {
        Ok(Self {
            table: Table::from_config(cfg)?,
            started: Instant::now(),
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            message: None,
            message_at: None,
        })
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    /// Last rejection or notice, shown in the status bar until it expires.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hand_live(&self) -> bool {
        self.table.hand_in_progress()
    }

    fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_at = Some(Instant::now());
    }

    fn clear_message(&mut self) {
        self.message = None;
        self.message_at = None;
    }

    /// Expire stale messages; called on every controller tick.
    pub fn on_tick(&mut self) {
        if self.message_at.is_some_and(|at| at.elapsed() >= Self::MESSAGE_TTL) {
            self.clear_message();
        }
    }

    fn play(&mut self, action: Action) -> bool {
        if !self.hand_live() {
            return false;
        }
        match self.table.act_current(action) {
            Ok(outcome) => {
                self.clear_message();
                if outcome.phase == Phase::Showdown {
                    if let Some(r) = self.table.results().first() {
                        let winners = r.winners.join(", ");
                        let msg = format!("{winners} won {} ({})", r.amount, r.description);
                        self.set_message(msg);
                    }
                }
                true
            }
            Err(err) => {
                self.set_message(err.to_string());
                false
            }
        }
    }

    fn new_hand(&mut self) {
        if self.hand_live() {
            return;
        }
        match self.table.start_hand() {
            Ok(()) => {
                self.history_offset = 0;
                self.clear_message();
            }
            Err(err) => self.set_message(format!("cannot deal: {err}")),
        }
    }

    fn raise_floor(&self) -> Option<u64> {
        self.table.engine().legal_actions(self.table.seats()).and_then(|l| l.min_raise_to)
    }

    fn open_amount_entry(&mut self) -> bool {
        let Some(min) = self.raise_floor() else {
            return false;
        };
        self.amount_entry = Some(min.to_string());
        self.amount_entry_error = None;
        true
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() < 12 {
                buf.push(char::from(b'0' + digit));
            }
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_adjust_bb(&mut self, up: bool) {
        let step = self.table.engine().blinds().big_blind;
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<u64>().unwrap_or(0);
            let next = if up { cur.saturating_add(step) } else { cur.saturating_sub(step) };
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_deref() else {
            return false;
        };
        let Ok(amount) = buf.parse::<u64>() else {
            self.amount_entry_error = Some("Invalid amount".to_string());
            return false;
        };
        match self.table.act_current(Action::Raise(amount)) {
            Ok(_) => {
                self.amount_entry = None;
                self.amount_entry_error = None;
                self.clear_message();
                true
            }
            Err(err) => {
                self.amount_entry_error = Some(err.to_string());
                false
            }
        }
    }

    /// Apply one input; returns whether a player action was accepted.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleHelp => {
                self.history_open = false;
                self.help_open = !self.help_open;
                false
            }
            InputAction::ToggleHistory => {
                self.help_open = false;
                if !self.history_open {
                    self.history_offset = 0;
                }
                self.history_open = !self.history_open;
                false
            }
            InputAction::HistoryUp => {
                let len = self.table.engine().history().len();
                let max_offset = len.saturating_sub(Self::HISTORY_PAGE_SIZE);
                self.history_offset = (self.history_offset + 1).min(max_offset);
                false
            }
            InputAction::HistoryDown => {
                self.history_offset = self.history_offset.saturating_sub(1);
                false
            }
            InputAction::NewHand => {
                self.new_hand();
                false
            }
            InputAction::Fold => self.play(Action::Fold),
            InputAction::Check => self.play(Action::Check),
            InputAction::Call => self.play(Action::Call),
            InputAction::AllIn => self.play(Action::AllIn),
            InputAction::RaiseMin => match self.raise_floor() {
                Some(to) => self.play(Action::Raise(to)),
                None => {
                    self.set_message("no raise available");
                    false
                }
            },
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                self.amount_entry_backspace();
                false
            }
            InputAction::AmountIncBb => {
                self.amount_entry_adjust_bb(true);
                false
            }
            InputAction::AmountDecBb => {
                self.amount_entry_adjust_bb(false);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry = None;
                self.amount_entry_error = None;
                false
            }
        }
    }
}
