//! A table session: seats, button rotation and the hand engine in one place.
//!
//! The engine only plays a single hand. `Table` is the caller around it that
//! rotates the dealer between hands, credits settlements to stacks and keeps a
//! log of results, which is what a room server or the terminal front end needs.

use crate::config::{BlindConfig, ConfigError, TableConfig};
use crate::evaluator::{HandEvaluator, StandardEvaluator};
use crate::game::{Action, ActionError, ActionOutcome, HandEngine, Phase, StartError};
use crate::seat::{Player, SeatError, SeatTable};
use crate::showdown::Settlement;
use log::info;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("not allowed while a hand is in progress")]
    HandInProgress,
    #[error("seat {0} is empty")]
    EmptySeat(usize),
    #[error(transparent)]
    Seat(#[from] SeatError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One finished hand as shown in the results log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandResult {
    pub winners: Vec<String>,
    pub amount: u64,
    pub description: String,
}

impl HandResult {
    fn from_settlement(settlement: &Settlement, seats: &SeatTable) -> Self {
        let winners = settlement
            .payouts
            .iter()
            .map(|p| match seats.get(p.seat) {
                Some(player) => player.nickname().to_string(),
                None => format!("seat {}", p.seat),
            })
            .collect();
        let description = settlement
            .payouts
            .first()
            .map(|p| p.description.clone())
            .unwrap_or_default();
        Self { winners, amount: settlement.paid(), description }
    }
}

#[derive(Debug)]
pub struct Table<E = StandardEvaluator> {
    seats: SeatTable,
    engine: HandEngine<E>,
    blinds: BlindConfig,
    button: Option<usize>,
    results: Vec<HandResult>,
}

impl Table<StandardEvaluator> {
    /// Open a table with `players` seated as "P1", "P2", ... on consecutive seats.
    pub fn from_config(cfg: &TableConfig) -> Result<Self, TableError> {
        cfg.validate()?;
        let mut engine = HandEngine::new().with_rules(cfg.rules);
        if let Some(seed) = cfg.seed {
            engine = engine.with_seed(seed);
        }
        let mut table = Table::new(engine, cfg.blinds)?;
        for i in 0..cfg.players {
            let name = format!("P{}", i + 1);
            table.sit_down(i, Player::new(format!("local-{i}"), name, cfg.starting_stack))?;
        }
        Ok(table)
    }
}

impl<E: HandEvaluator> Table<E> {
    pub fn new(engine: HandEngine<E>, blinds: BlindConfig) -> Result<Self, TableError> {
        blinds.validate()?;
        Ok(Self { seats: SeatTable::new(), engine, blinds, button: None, results: Vec::new() })
    }

    pub fn seats(&self) -> &SeatTable {
        &self.seats
    }

    pub fn engine(&self) -> &HandEngine<E> {
        &self.engine
    }

    pub fn blinds(&self) -> BlindConfig {
        self.blinds
    }

    /// Newest first.
    pub fn results(&self) -> &[HandResult] {
        &self.results
    }

    pub fn hand_in_progress(&self) -> bool {
        self.engine.phase().is_betting()
    }

    pub fn sit_down(&mut self, seat: usize, player: Player) -> Result<(), TableError> {
        self.seats.sit(seat, player)?;
        Ok(())
    }

    /// Leave the table. Mid-hand this is refused; the seat must fold out first.
    pub fn stand_up(&mut self, seat: usize) -> Result<Player, TableError> {
        if self.hand_in_progress() {
            return Err(TableError::HandInProgress);
        }
        self.seats.stand(seat).ok_or(TableError::EmptySeat(seat))
    }

    pub fn set_blinds(&mut self, blinds: BlindConfig) -> Result<(), TableError> {
        if self.hand_in_progress() {
            return Err(TableError::HandInProgress);
        }
        blinds.validate()?;
        self.blinds = blinds;
        Ok(())
    }

    pub fn set_chips(&mut self, seat: usize, chips: u64) -> Result<(), TableError> {
        if self.hand_in_progress() {
            return Err(TableError::HandInProgress);
        }
        let player = self.seats.get_mut(seat).ok_or(TableError::EmptySeat(seat))?;
        player.set_chips(chips);
        Ok(())
    }

    /// Move the button and deal the next hand.
    pub fn start_hand(&mut self) -> Result<(), StartError> {
        if self.hand_in_progress() {
            return Ok(());
        }
        let funded = self.seats.occupied().filter(|(_, p)| p.chips() > 0).count();
        let button = self
            .seats
            .next_dealer(self.button)
            .ok_or(StartError::NotEnoughPlayers { funded })?;
        self.engine.start_new_hand(&mut self.seats, button, self.blinds)?;
        self.button = Some(self.engine.dealer());
        // Everyone but one may be all-in on the blinds.
        self.finish_if_settled();
        Ok(())
    }

    pub fn act(&mut self, seat: usize, action: Action) -> Result<ActionOutcome, ActionError> {
        let outcome = self.engine.handle_action(&mut self.seats, seat, action)?;
        if outcome.phase == Phase::Showdown {
            self.finish_if_settled();
        }
        Ok(outcome)
    }

    /// Act for whoever holds the turn.
    pub fn act_current(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        let seat = self.engine.actor().ok_or(ActionError::NoBettingRound)?;
        self.act(seat, action)
    }

    fn finish_if_settled(&mut self) {
        let Some(settlement) = self.engine.settlement() else {
            return;
        };
        settlement.apply(&mut self.seats);
        let result = HandResult::from_settlement(settlement, &self.seats);
        info!("{} won {} with {}", result.winners.join(", "), result.amount, result.description);
        self.results.insert(0, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(players: usize) -> Table {
        let cfg = TableConfig { players, seed: Some(11), ..TableConfig::default() };
        Table::from_config(&cfg).unwrap()
    }

    #[test]
    fn button_rotates_between_hands() {
        let mut t = table(3);
        t.start_hand().unwrap();
        assert_eq!(t.engine().dealer(), 0);
        t.act_current(Action::Fold).unwrap();
        t.act_current(Action::Fold).unwrap();
        assert!(!t.hand_in_progress());
        t.start_hand().unwrap();
        assert_eq!(t.engine().dealer(), 1);
    }

    #[test]
    fn settlement_is_credited_and_logged() {
        let mut t = table(2);
        t.start_hand().unwrap();
        // Heads-up: the dealer posts the small blind and folds it.
        t.act_current(Action::Fold).unwrap();
        assert_eq!(t.seats().get(0).map(|p| p.chips()), Some(1990));
        assert_eq!(t.seats().get(1).map(|p| p.chips()), Some(2010));
        assert_eq!(t.seats().total_chips(), 4000);
        let r = &t.results()[0];
        assert_eq!(r.winners, vec!["P2".to_string()]);
        assert_eq!(r.amount, 30);
        assert_eq!(r.description, "Opponents Folded");
    }

    #[test]
    fn host_edits_wait_for_the_hand_to_end() {
        let mut t = table(2);
        t.start_hand().unwrap();
        assert_eq!(t.set_chips(0, 5000), Err(TableError::HandInProgress));
        assert_eq!(
            t.set_blinds(BlindConfig::new(50, 100).unwrap()),
            Err(TableError::HandInProgress)
        );
        assert!(matches!(t.stand_up(1), Err(TableError::HandInProgress)));
        t.act_current(Action::Fold).unwrap();
        t.set_chips(0, 5000).unwrap();
        t.set_blinds(BlindConfig::new(50, 100).unwrap()).unwrap();
        t.start_hand().unwrap();
        assert_eq!(t.engine().blinds().big_blind, 100);
        assert_eq!(t.engine().min_raise(), 100);
    }

    #[test]
    fn busted_players_are_skipped_and_game_over_is_reported() {
        let mut t = table(2);
        t.set_chips(1, 0).unwrap();
        assert_eq!(t.start_hand(), Err(StartError::NotEnoughPlayers { funded: 1 }));
    }
}
