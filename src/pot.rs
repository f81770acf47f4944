use crate::seat::{Player, SeatStatus};

/// Shared pot for the current hand.
///
/// `place_bet` is the only way chips leave a player's stack during a hand, so
/// `stacks + pot` stays constant from blinds to showdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pot {
    total: u64,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn clear(&mut self) {
        self.total = 0;
    }

    /// Move up to `amount` chips from the player's stack into the pot.
    ///
    /// The wager is capped at the player's stack; emptying the stack puts the
    /// player all-in. Returns the amount actually moved.
    ///
    /// ```
    /// use holdem_table::pot::Pot;
    /// use holdem_table::seat::{Player, SeatStatus};
    ///
    /// let mut pot = Pot::new();
    /// let mut p = Player::new("s", "Short", 15);
    /// assert_eq!(pot.place_bet(&mut p, 20), 15);
    /// assert_eq!(p.status(), SeatStatus::AllIn);
    /// assert_eq!(pot.total(), 15);
    /// ```
    pub fn place_bet(&mut self, player: &mut Player, amount: u64) -> u64 {
        let paid = player.chips.min(amount);
        player.chips -= paid;
        player.bet += paid;
        player.total_bet += paid;
        self.total += paid;
        if player.chips == 0 {
            player.status = SeatStatus::AllIn;
        }
        paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(chips: u64) -> Player {
        let mut p = Player::new("s", "P", chips);
        p.status = SeatStatus::Active;
        p
    }

    #[test]
    fn bet_moves_chips_into_both_counters_and_pot() {
        let mut pot = Pot::new();
        let mut p = active(100);
        assert_eq!(pot.place_bet(&mut p, 30), 30);
        assert_eq!(pot.place_bet(&mut p, 10), 10);
        assert_eq!(p.chips(), 60);
        assert_eq!(p.bet(), 40);
        assert_eq!(p.total_bet(), 40);
        assert_eq!(pot.total(), 40);
        assert_eq!(p.status(), SeatStatus::Active);
    }

    #[test]
    fn exact_stack_goes_all_in() {
        let mut pot = Pot::new();
        let mut p = active(50);
        pot.place_bet(&mut p, 50);
        assert_eq!(p.status(), SeatStatus::AllIn);
    }

    #[test]
    fn zero_bet_is_a_no_op() {
        let mut pot = Pot::new();
        let mut p = active(50);
        assert_eq!(pot.place_bet(&mut p, 0), 0);
        assert_eq!(pot.total(), 0);
        assert_eq!(p.status(), SeatStatus::Active);
    }
}
