use crate::cards::Card;
use crate::config::{BlindConfig, ConfigError, HandRules};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{HandEvaluator, StandardEvaluator};
use crate::hand::{Board, HandError, HoleCards};
use crate::pot::Pot;
use crate::seat::{LastAction, Player, SeatStatus, SeatTable, SEAT_COUNT};
use crate::showdown::{self, Settlement, ShowdownError};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Phase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Waiting => "WAITING",
            Phase::Preflop => "PREFLOP",
            Phase::Flop => "FLOP",
            Phase::Turn => "TURN",
            Phase::River => "RIVER",
            Phase::Showdown => "SHOWDOWN",
        }
    }

    /// Phases in which players act.
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Raise to this total round bet (not an increment).
    Raise(u64),
    AllIn,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("unknown action: '{0}'")]
    Unknown(String),
}

impl Action {
    /// Build an action from the transport's `(name, amount)` pair; the amount
    /// only matters for `raise`.
    ///
    /// ```
    /// use holdem_table::game::Action;
    ///
    /// assert_eq!(Action::from_wire("raise", 60).unwrap(), Action::Raise(60));
    /// assert_eq!(Action::from_wire("allin", 0).unwrap(), Action::AllIn);
    /// ```
    pub fn from_wire(name: &str, amount: u64) -> Result<Self, ActionParseError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "raise" => Ok(Action::Raise(amount)),
            "allin" | "all-in" => Ok(Action::AllIn),
            _ => Err(ActionParseError::Unknown(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    RaiseTo,
    AllIn,
    Deal,
    Win,
    Split,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::SmallBlind => "SB",
            HistoryVerb::BigBlind => "BB",
            HistoryVerb::Fold => "Fold",
            HistoryVerb::Check => "Check",
            HistoryVerb::Call => "Call",
            HistoryVerb::RaiseTo => "Raise to",
            HistoryVerb::AllIn => "All-in",
            HistoryVerb::Deal => "Deal",
            HistoryVerb::Win => "Win",
            HistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    /// Acting seat; `None` for community deals.
    pub seat: Option<usize>,
    pub verb: HistoryVerb,
    pub amount: Option<u64>,
    pub cards: Vec<Card>,
    pub phase: Phase,
}

/// Failures that are not the player's fault: a broken deck, board or evaluator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineFault {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Board(#[from] HandError),
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StartError {
    #[error("need at least two players with chips, have {funded}")]
    NotEnoughPlayers { funded: usize },
    #[error("seat {0} does not exist")]
    InvalidSeat(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fault(#[from] EngineFault),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no betting round in progress")]
    NoBettingRound,
    #[error("not your turn")]
    NotYourTurn { seat: usize, actor: Option<usize> },
    #[error("seat {0} is empty")]
    EmptySeat(usize),
    #[error("seat {0} cannot act")]
    CannotAct(usize),
    #[error("cannot check, must call {owed}")]
    CannotCheck { owed: u64 },
    #[error("raise too small: minimum {min}, got {got}")]
    RaiseTooSmall { min: u64, got: u64 },
    #[error("not enough chips: can raise to at most {max}, got {got}")]
    RaiseTooLarge { max: u64, got: u64 },
    #[error("cannot raise: stack reaches {max}, current bet is {current}")]
    CannotRaise { max: u64, current: u64 },
    #[error(transparent)]
    Fault(#[from] EngineFault),
}

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ActionOutcome {
    pub seat: usize,
    pub action: LastAction,
    /// Chips moved into the pot by this action.
    pub paid: u64,
    /// Phase after the action was resolved.
    pub phase: Phase,
    /// Next seat to act, if any.
    pub actor: Option<usize>,
}

/// Options open to the acting seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct LegalActions {
    pub seat: usize,
    pub to_call: u64,
    pub can_check: bool,
    /// Smallest legal raise-to amount, if the stack exceeds the current bet.
    pub min_raise_to: Option<u64>,
    /// Largest legal raise-to amount (the whole stack).
    pub max_raise_to: Option<u64>,
}

/// Drives one hand at one table: blinds, betting rounds, turn order, showdown.
///
/// The engine owns the deck and hand state; the seat table is passed in on
/// every call and mutated in place. Calls for one table must be serialized.
#[derive(Debug)]
pub struct HandEngine<E = StandardEvaluator> {
    evaluator: E,
    rules: HandRules,
    rng: ChaCha8Rng,
    deck: Deck,
    board: Board,
    pot: Pot,
    phase: Phase,
    blinds: BlindConfig,
    dealer: usize,
    actor: Option<usize>,
    current_bet: u64,
    min_raise: u64,
    small_blind_seat: Option<usize>,
    big_blind_seat: Option<usize>,
    settlement: Option<Settlement>,
    history: Vec<HistoryEntry>,
}

impl Default for HandEngine<StandardEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl HandEngine<StandardEvaluator> {
    pub fn new() -> Self {
        Self::with_evaluator(StandardEvaluator)
    }
}

impl<E: HandEvaluator> HandEngine<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        let seed: u64 = rand::rng().random();
        Self {
            evaluator,
            rules: HandRules::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            deck: Deck::standard(),
            board: Board::new(),
            pot: Pot::new(),
            phase: Phase::Waiting,
            blinds: BlindConfig::default(),
            dealer: 0,
            actor: None,
            current_bet: 0,
            min_raise: 0,
            small_blind_seat: None,
            big_blind_seat: None,
            settlement: None,
            history: Vec::new(),
        }
    }

    /// Reseed the shuffle for reproducible deals.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_rules(mut self, rules: HandRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> u64 {
        self.pot.total()
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// Seat whose turn it is; `None` when nobody can act.
    pub fn actor(&self) -> Option<usize> {
        self.actor
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    pub fn blinds(&self) -> BlindConfig {
        self.blinds
    }

    pub fn rules(&self) -> HandRules {
        self.rules
    }

    pub fn small_blind_seat(&self) -> Option<usize> {
        self.small_blind_seat
    }

    pub fn big_blind_seat(&self) -> Option<usize> {
        self.big_blind_seat
    }

    /// Settlement of the finished hand, once the showdown is reached.
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn to_call(&self, seats: &SeatTable, seat: usize) -> u64 {
        if !self.phase.is_betting() {
            return 0;
        }
        seats.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.bet))
    }

    pub fn legal_actions(&self, seats: &SeatTable) -> Option<LegalActions> {
        let seat = self.actor?;
        let p = seats.get(seat)?;
        let to_call = self.to_call(seats, seat);
        let max = p.chips + p.bet;
        let (min_raise_to, max_raise_to) = if max > self.current_bet {
            (Some((self.current_bet + self.min_raise).min(max)), Some(max))
        } else {
            (None, None)
        };
        Some(LegalActions { seat, to_call, can_check: to_call == 0, min_raise_to, max_raise_to })
    }

    /// Start a new hand with the button at `dealer_seat`.
    ///
    /// Fails without touching the table when fewer than two seated players
    /// have chips.
    pub fn start_new_hand(
        &mut self,
        seats: &mut SeatTable,
        dealer_seat: usize,
        blinds: BlindConfig,
    ) -> Result<(), StartError> {
        if dealer_seat >= SEAT_COUNT {
            return Err(StartError::InvalidSeat(dealer_seat));
        }
        blinds.validate()?;
        let funded = seats.occupied().filter(|(_, p)| p.chips > 0).count();
        if funded < 2 {
            return Err(StartError::NotEnoughPlayers { funded });
        }

        self.reset_hand_state(blinds);
        self.reset_players_for_new_hand(seats).map_err(EngineFault::from)?;
        self.setup_preflop(seats, dealer_seat)?;
        Ok(())
    }

    fn reset_hand_state(&mut self, blinds: BlindConfig) {
        self.deck.reset(&mut self.rng);
        self.board.clear();
        self.pot.clear();
        self.phase = Phase::Preflop;
        self.blinds = blinds;
        self.actor = None;
        self.current_bet = 0;
        self.min_raise = blinds.big_blind;
        self.small_blind_seat = None;
        self.big_blind_seat = None;
        self.settlement = None;
        self.history.clear();
    }

    fn reset_players_for_new_hand(&mut self, seats: &mut SeatTable) -> Result<(), DeckError> {
        for p in seats.players_mut() {
            p.bet = 0;
            p.total_bet = 0;
            p.last_action = None;
            p.is_dealer = false;
            p.is_small_blind = false;
            p.is_big_blind = false;
            if p.chips > 0 {
                p.status = SeatStatus::Active;
                let (a, b) = (self.deck.deal()?, self.deck.deal()?);
                p.hole = Some(HoleCards::dealt(a, b));
            } else {
                p.status = SeatStatus::SittingOut;
                p.hole = None;
            }
        }
        Ok(())
    }

    fn setup_preflop(&mut self, seats: &mut SeatTable, button: usize) -> Result<(), StartError> {
        let contesting = seats.contesting();
        let n = contesting.len();
        let short = || StartError::NotEnoughPlayers { funded: n };
        // An empty or busted button moves to the next seat dealt in.
        let dealer = seats.scan_from(button, Player::is_contesting).ok_or_else(short)?;
        let pos = contesting.iter().position(|&s| s == dealer).ok_or_else(short)?;

        let (sb, bb, first) = if n == 2 {
            (contesting[pos], contesting[(pos + 1) % n], contesting[pos])
        } else {
            (contesting[(pos + 1) % n], contesting[(pos + 2) % n], contesting[(pos + 3) % n])
        };
        self.dealer = dealer;
        self.small_blind_seat = Some(sb);
        self.big_blind_seat = Some(bb);

        if let Some(p) = seats.get_mut(dealer) {
            p.is_dealer = true;
        }
        self.post_blind(seats, sb, HistoryVerb::SmallBlind);
        self.post_blind(seats, bb, HistoryVerb::BigBlind);
        // Short blinds still set the nominal price of the round.
        self.current_bet = self.blinds.big_blind;
        self.min_raise = self.blinds.big_blind;
        info!(
            "hand started: dealer {dealer}, blinds {}/{} from seats {sb}/{bb}, {n} players",
            self.blinds.small_blind, self.blinds.big_blind
        );

        if seats.actionable().is_empty() {
            self.run_out(seats)?;
        } else {
            self.actor = seats.scan_from(first, Player::can_act);
        }
        Ok(())
    }

    fn post_blind(&mut self, seats: &mut SeatTable, seat: usize, verb: HistoryVerb) {
        let Some(p) = seats.get_mut(seat) else {
            return;
        };
        let nominal = match verb {
            HistoryVerb::SmallBlind => {
                p.is_small_blind = true;
                self.blinds.small_blind
            }
            _ => {
                p.is_big_blind = true;
                self.blinds.big_blind
            }
        };
        let paid = self.pot.place_bet(p, nominal);
        debug!("seat {seat} posts {} {paid}", verb.label());
        self.record(Some(seat), verb, Some(paid), Vec::new());
    }

    /// Apply an action for `seat`.
    ///
    /// Rejections leave every piece of state untouched; the error's `Display`
    /// is the reason to show the player.
    pub fn handle_action(
        &mut self,
        seats: &mut SeatTable,
        seat: usize,
        action: Action,
    ) -> Result<ActionOutcome, ActionError> {
        if !self.phase.is_betting() {
            return Err(ActionError::NoBettingRound);
        }
        if self.actor != Some(seat) {
            return Err(ActionError::NotYourTurn { seat, actor: self.actor });
        }
        let current_bet = self.current_bet;
        let p = seats.get_mut(seat).ok_or(ActionError::EmptySeat(seat))?;
        if !p.can_act() {
            return Err(ActionError::CannotAct(seat));
        }
        let owed = current_bet.saturating_sub(p.bet);
        let max = p.chips + p.bet;

        let (paid, verb, amount) = match action {
            Action::Fold => {
                p.status = SeatStatus::Fold;
                p.hole = None;
                (0, HistoryVerb::Fold, None)
            }
            Action::Check => {
                if owed > 0 {
                    return Err(ActionError::CannotCheck { owed });
                }
                (0, HistoryVerb::Check, None)
            }
            Action::Call => {
                let paid = self.pot.place_bet(p, owed);
                (paid, HistoryVerb::Call, Some(paid))
            }
            Action::Raise(to) => {
                if to > max {
                    return Err(ActionError::RaiseTooLarge { max, got: to });
                }
                if max <= current_bet {
                    return Err(ActionError::CannotRaise { max, current: current_bet });
                }
                let floor = current_bet + self.min_raise;
                if to < floor && to != max {
                    return Err(ActionError::RaiseTooSmall { min: floor.min(max), got: to });
                }
                let extra = to - p.bet;
                let paid = self.pot.place_bet(p, extra);
                (paid, HistoryVerb::RaiseTo, Some(to))
            }
            Action::AllIn => {
                let stack = p.chips;
                let paid = self.pot.place_bet(p, stack);
                (paid, HistoryVerb::AllIn, Some(max))
            }
        };

        let last = match (action, p.status) {
            (Action::Fold, _) => LastAction::Fold,
            (_, SeatStatus::AllIn) => LastAction::AllIn,
            (Action::Check, _) => LastAction::Check,
            (Action::Call, _) => LastAction::Call,
            _ => LastAction::Raise,
        };
        p.last_action = Some(last);
        let round_bet = p.bet;
        if round_bet > self.current_bet {
            self.register_raise(round_bet);
        }
        debug!("seat {seat} {} (paid {paid}, round bet {round_bet})", verb.label());
        self.record(Some(seat), verb, amount, Vec::new());

        self.advance(seats, seat)?;
        Ok(ActionOutcome { seat, action: last, paid, phase: self.phase, actor: self.actor })
    }

    /// Lift the price of the round to `to`.
    ///
    /// Only a full raise resets the minimum increment. A short all-in raise
    /// does not stop players who already acted from re-raising; that
    /// restriction of formal rules is not enforced.
    fn register_raise(&mut self, to: u64) {
        let raise_by = to - self.current_bet;
        if raise_by >= self.min_raise {
            self.min_raise = raise_by;
        }
        self.current_bet = to;
    }

    /// Decide what follows an accepted action by `from`.
    fn advance(&mut self, seats: &mut SeatTable, from: usize) -> Result<(), EngineFault> {
        let contesting = seats.contesting();
        if let [winner] = contesting.as_slice() {
            self.award_uncontested(*winner);
            return Ok(());
        }
        let actionable = seats.actionable();
        if actionable.is_empty() {
            return self.run_out(seats);
        }
        let round_done = actionable.iter().all(|&s| {
            seats.get(s).is_some_and(|p| p.bet == self.current_bet && p.last_action.is_some())
        });
        if round_done {
            self.next_phase(seats)
        } else {
            self.actor = seats.next_active_after(from);
            Ok(())
        }
    }

    fn next_phase(&mut self, seats: &mut SeatTable) -> Result<(), EngineFault> {
        for p in seats.players_mut() {
            p.bet = 0;
            p.last_action = None;
        }
        self.current_bet = 0;
        self.min_raise = self.blinds.big_blind;
        self.actor = None;

        let (next, count) = match self.phase {
            Phase::Preflop => (Phase::Flop, 3),
            Phase::Flop => (Phase::Turn, 1),
            Phase::Turn => (Phase::River, 1),
            Phase::River => return self.showdown(seats),
            Phase::Waiting | Phase::Showdown => return Ok(()),
        };
        self.phase = next;
        self.deal_board(count)?;
        debug!("{next}: board {}", crate::cards::format_cards(self.board.as_slice()));

        if seats.actionable().len() < 2 {
            return self.run_out(seats);
        }
        self.actor = seats.scan_from(self.dealer + 1, Player::can_act);
        Ok(())
    }

    fn deal_board(&mut self, count: usize) -> Result<(), EngineFault> {
        let mut dealt = Vec::with_capacity(count);
        for _ in 0..count {
            let card = self.deck.deal()?;
            self.board.push(card)?;
            dealt.push(card);
        }
        if !dealt.is_empty() {
            self.record(None, HistoryVerb::Deal, None, dealt);
        }
        Ok(())
    }

    /// Nobody can usefully bet any more: deal the rest of the board at once.
    fn run_out(&mut self, seats: &mut SeatTable) -> Result<(), EngineFault> {
        self.actor = None;
        let missing = crate::hand::BOARD_SIZE - self.board.len();
        debug!("running out {missing} card(s) to showdown");
        self.deal_board(missing)?;
        self.showdown(seats)
    }

    fn showdown(&mut self, seats: &mut SeatTable) -> Result<(), EngineFault> {
        self.phase = Phase::Showdown;
        self.actor = None;
        let settlement = showdown::settle(
            &self.evaluator,
            seats,
            &self.board,
            self.pot.total(),
            self.dealer,
            self.rules,
        )?;
        self.finish(settlement);
        Ok(())
    }

    fn award_uncontested(&mut self, seat: usize) {
        self.phase = Phase::Showdown;
        self.actor = None;
        self.finish(Settlement::uncontested(seat, self.pot.total()));
    }

    fn finish(&mut self, settlement: Settlement) {
        let verb = if settlement.payouts.len() > 1 { HistoryVerb::Split } else { HistoryVerb::Win };
        for p in &settlement.payouts {
            info!("seat {} wins {} ({})", p.seat, p.amount, p.description);
            self.record(Some(p.seat), verb, Some(p.amount), p.cards.clone());
        }
        self.settlement = Some(settlement);
    }

    fn record(
        &mut self,
        seat: Option<usize>,
        verb: HistoryVerb,
        amount: Option<u64>,
        cards: Vec<Card>,
    ) {
        let entry = HistoryEntry { seat, verb, amount, cards, phase: self.phase };
        self.history.push(entry);
    }
}
