use crate::hand::HoleCards;
use std::fmt;

/// Fixed number of seats at a table.
pub const SEAT_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatStatus {
    /// In the hand and able to act.
    Active,
    Fold,
    AllIn,
    /// Seated but not dealt into the current hand.
    SittingOut,
}

impl SeatStatus {
    pub fn label(self) -> &'static str {
        match self {
            SeatStatus::Active => "ACTIVE",
            SeatStatus::Fold => "FOLD",
            SeatStatus::AllIn => "ALLIN",
            SeatStatus::SittingOut => "SITTING_OUT",
        }
    }

    /// Still holding a claim on the pot.
    pub fn is_contesting(self) -> bool {
        matches!(self, SeatStatus::Active | SeatStatus::AllIn)
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The most recent voluntary action a player took in the current betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LastAction {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl LastAction {
    pub fn label(self) -> &'static str {
        match self {
            LastAction::Fold => "fold",
            LastAction::Check => "check",
            LastAction::Call => "call",
            LastAction::Raise => "raise",
            LastAction::AllIn => "allin",
        }
    }
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seated player's record.
///
/// The seat table owner creates and removes records; the hand engine only
/// mutates the hand-related fields in place.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) session: String,
    pub(crate) nickname: String,
    pub(crate) chips: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) bet: u64,
    pub(crate) total_bet: u64,
    pub(crate) status: SeatStatus,
    pub(crate) last_action: Option<LastAction>,
    pub(crate) is_dealer: bool,
    pub(crate) is_small_blind: bool,
    pub(crate) is_big_blind: bool,
}

impl Player {
    /// A freshly seated player; sits out until the next hand starts.
    pub fn new(session: impl Into<String>, nickname: impl Into<String>, chips: u64) -> Self {
        Self {
            session: session.into(),
            nickname: nickname.into(),
            chips,
            hole: None,
            bet: 0,
            total_bet: 0,
            status: SeatStatus::SittingOut,
            last_action: None,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    /// Opaque session identity supplied by the transport layer.
    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Chips behind (not yet wagered).
    pub fn chips(&self) -> u64 {
        self.chips
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Amount wagered in the current betting round.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Amount wagered over the whole hand.
    pub fn total_bet(&self) -> u64 {
        self.total_bet
    }

    pub fn status(&self) -> SeatStatus {
        self.status
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }

    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }

    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }

    /// Overwrite the stack, e.g. for a re-buy between hands.
    pub fn set_chips(&mut self, chips: u64) {
        self.chips = chips;
    }

    /// Add winnings to the stack.
    pub fn credit(&mut self, amount: u64) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Has a stake in the current hand: not folded or sitting out, and has chips
    /// either behind or in front of them.
    pub(crate) fn is_contesting(&self) -> bool {
        self.status.is_contesting() && self.chips + self.bet + self.total_bet > 0
    }

    pub(crate) fn can_act(&self) -> bool {
        matches!(self.status, SeatStatus::Active)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatError {
    #[error("seat {0} does not exist")]
    InvalidSeat(usize),
    #[error("seat {0} is already taken")]
    Occupied(usize),
}

/// Fixed-size sparse array of player records.
#[derive(Debug, Clone)]
pub struct SeatTable {
    seats: [Option<Player>; SEAT_COUNT],
}

impl Default for SeatTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatTable {
    pub fn new() -> Self {
        Self { seats: std::array::from_fn(|_| None) }
    }

    pub fn sit(&mut self, seat: usize, player: Player) -> Result<(), SeatError> {
        let slot = self.seats.get_mut(seat).ok_or(SeatError::InvalidSeat(seat))?;
        if slot.is_some() {
            return Err(SeatError::Occupied(seat));
        }
        *slot = Some(player);
        Ok(())
    }

    pub fn stand(&mut self, seat: usize) -> Option<Player> {
        self.seats.get_mut(seat).and_then(Option::take)
    }

    pub fn get(&self, seat: usize) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.seats.get_mut(seat).and_then(Option::as_mut)
    }

    pub fn is_occupied(&self, seat: usize) -> bool {
        self.get(seat).is_some()
    }

    /// Occupied seats in seat order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.seats.iter().enumerate().filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    pub(crate) fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.seats.iter_mut().flatten()
    }

    pub fn find_session(&self, session: &str) -> Option<usize> {
        self.occupied().find(|(_, p)| p.session == session).map(|(i, _)| i)
    }

    /// Chips behind across all occupied seats.
    pub fn total_chips(&self) -> u64 {
        self.occupied().map(|(_, p)| p.chips).sum()
    }

    /// Seats still holding a claim on the pot, in seat order.
    pub fn contesting(&self) -> Vec<usize> {
        self.occupied().filter(|(_, p)| p.is_contesting()).map(|(i, _)| i).collect()
    }

    /// Contesting seats that can still act voluntarily.
    pub fn actionable(&self) -> Vec<usize> {
        self.occupied().filter(|(_, p)| p.is_contesting() && p.can_act()).map(|(i, _)| i).collect()
    }

    /// First seat at or after `start`, wrapping, whose player satisfies `pred`.
    pub fn scan_from<F>(&self, start: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        (0..SEAT_COUNT)
            .map(|k| (start + k) % SEAT_COUNT)
            .find(|&i| self.get(i).is_some_and(|p| pred(p)))
    }

    /// Next seat strictly after `seat` that can act voluntarily.
    pub fn next_active_after(&self, seat: usize) -> Option<usize> {
        self.scan_from(seat + 1, Player::can_act)
    }

    /// Dealer button for the next hand: the first occupied seat clockwise after
    /// `previous`, or the lowest occupied seat when there was no previous hand.
    ///
    /// ```
    /// use holdem_table::seat::{Player, SeatTable};
    ///
    /// let mut seats = SeatTable::new();
    /// seats.sit(2, Player::new("a", "A", 100)).unwrap();
    /// seats.sit(6, Player::new("b", "B", 100)).unwrap();
    /// assert_eq!(seats.next_dealer(None), Some(2));
    /// assert_eq!(seats.next_dealer(Some(2)), Some(6));
    /// assert_eq!(seats.next_dealer(Some(6)), Some(2));
    /// ```
    pub fn next_dealer(&self, previous: Option<usize>) -> Option<usize> {
        match previous {
            None => self.scan_from(0, |_| true),
            Some(prev) => self.scan_from(prev + 1, |_| true),
        }
    }
}
