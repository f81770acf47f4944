//! Pot settlement at the end of a hand.
//!
//! The coordinator decides who contests the pot, asks the evaluator for ranks
//! and produces a [`Settlement`]. It never touches stacks: the caller applies
//! the settlement once it has shown it to the table.

use crate::cards::Card;
use crate::config::{HandRules, OddChipRule, PotRule};
use crate::evaluator::{EvalError, HandEvaluator, RankedHand};
use crate::hand::Board;
use crate::seat::{SeatTable, SEAT_COUNT};
use std::collections::BTreeMap;

/// Description attached to a pot won without a showdown.
pub const FOLD_WIN_DESCRIPTION: &str = "Opponents Folded";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShowdownError {
    #[error("no player is contesting the pot")]
    NoContenders,
    #[error("seat {0} reached showdown without hole cards")]
    MissingHoleCards(usize),
    #[error("showdown needs five community cards, board has {0}")]
    IncompleteBoard(usize),
    #[error("evaluating seat {seat}: {source}")]
    Evaluation { seat: usize, source: EvalError },
    #[error("evaluator named no winner")]
    NoWinner,
}

/// Chips owed to one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Payout {
    pub seat: usize,
    pub amount: u64,
    pub description: String,
    /// Best five cards, empty when the pot was won uncontested.
    pub cards: Vec<Card>,
}

/// Result of a finished hand, for the caller to apply to stacks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Settlement {
    /// Payouts in seat order.
    pub payouts: Vec<Payout>,
    /// Pot size at settlement.
    pub pot: u64,
    /// Odd chips left unpaid under [`OddChipRule::Retain`].
    pub undistributed: u64,
    /// Everyone else folded; no hands were compared.
    pub uncontested: bool,
}

impl Settlement {
    pub fn uncontested(seat: usize, pot: u64) -> Self {
        Self {
            payouts: vec![Payout {
                seat,
                amount: pot,
                description: FOLD_WIN_DESCRIPTION.to_string(),
                cards: Vec::new(),
            }],
            pot,
            undistributed: 0,
            uncontested: true,
        }
    }

    pub fn winners(&self) -> Vec<usize> {
        self.payouts.iter().map(|p| p.seat).collect()
    }

    /// Total chips paid out.
    pub fn paid(&self) -> u64 {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    pub fn payout_for(&self, seat: usize) -> Option<&Payout> {
        self.payouts.iter().find(|p| p.seat == seat)
    }

    /// Credit every payout to its seat. Seats vacated since the showdown are skipped.
    pub fn apply(&self, seats: &mut SeatTable) {
        for p in &self.payouts {
            if let Some(player) = seats.get_mut(p.seat) {
                player.credit(p.amount);
            }
        }
    }
}

/// One slice of the pot and the seats that may win it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layer {
    amount: u64,
    eligible: Vec<usize>,
}

fn layers(seats: &SeatTable, contenders: &[usize], pot: u64, rule: PotRule) -> Vec<Layer> {
    match rule {
        PotRule::Single => vec![Layer { amount: pot, eligible: contenders.to_vec() }],
        PotRule::Layered => {
            let contributions: Vec<(usize, u64)> = seats
                .occupied()
                .map(|(i, p)| (i, p.total_bet()))
                .filter(|&(_, c)| c > 0)
                .collect();
            let mut levels: Vec<u64> = contributions.iter().map(|&(_, c)| c).collect();
            levels.sort_unstable();
            levels.dedup();

            let reached = |seat: usize, lvl: u64| {
                seats.get(seat).is_some_and(|p| p.total_bet() >= lvl)
            };
            let deepest = contenders
                .iter()
                .filter_map(|&s| seats.get(s).map(|p| p.total_bet()))
                .max()
                .unwrap_or(0);

            let mut out = Vec::new();
            let mut prev = 0u64;
            for lvl in levels {
                let payers = contributions.iter().filter(|&&(_, c)| c >= lvl).count() as u64;
                let amount = (lvl - prev) * payers;
                prev = lvl;
                if amount == 0 {
                    continue;
                }
                let mut eligible: Vec<usize> =
                    contenders.iter().copied().filter(|&s| reached(s, lvl)).collect();
                // Only folded players paid this deep: the deepest contenders take it.
                if eligible.is_empty() {
                    eligible =
                        contenders.iter().copied().filter(|&s| reached(s, deepest)).collect();
                }
                out.push(Layer { amount, eligible });
            }
            out
        }
    }
}

/// Clockwise distance from the seat left of the dealer.
fn seat_order(dealer: usize) -> impl Fn(&usize) -> usize {
    let start = (dealer + 1) % SEAT_COUNT;
    move |&seat| (seat + SEAT_COUNT - start) % SEAT_COUNT
}

/// Settle the pot among the players still contesting it.
pub fn settle<E: HandEvaluator + ?Sized>(
    evaluator: &E,
    seats: &SeatTable,
    board: &Board,
    pot: u64,
    dealer: usize,
    rules: HandRules,
) -> Result<Settlement, ShowdownError> {
    let contenders = seats.contesting();
    match contenders.as_slice() {
        [] => return Err(ShowdownError::NoContenders),
        [only] => return Ok(Settlement::uncontested(*only, pot)),
        _ => {}
    }
    if !board.is_complete() {
        return Err(ShowdownError::IncompleteBoard(board.len()));
    }

    let mut ranked: BTreeMap<usize, RankedHand> = BTreeMap::new();
    for &seat in &contenders {
        let hole = seats
            .get(seat)
            .and_then(|p| p.hole())
            .ok_or(ShowdownError::MissingHoleCards(seat))?;
        let mut cards = hole.as_array().to_vec();
        cards.extend_from_slice(board.as_slice());
        let hand = evaluator
            .rank(&cards)
            .map_err(|source| ShowdownError::Evaluation { seat, source })?;
        ranked.insert(seat, hand);
    }

    let mut won: BTreeMap<usize, u64> = BTreeMap::new();
    let mut undistributed = 0u64;
    for layer in layers(seats, &contenders, pot, rules.pot) {
        let hands: Vec<RankedHand> =
            layer.eligible.iter().filter_map(|s| ranked.get(s).cloned()).collect();
        let mut winners: Vec<usize> = evaluator
            .winners(&hands)
            .into_iter()
            .filter_map(|i| layer.eligible.get(i).copied())
            .collect();
        if winners.is_empty() {
            return Err(ShowdownError::NoWinner);
        }
        winners.sort_by_key(seat_order(dealer));

        let share = layer.amount / winners.len() as u64;
        let mut remainder = layer.amount % winners.len() as u64;
        if rules.odd_chips == OddChipRule::Retain {
            undistributed += remainder;
            remainder = 0;
        }
        for seat in winners {
            let extra = u64::from(remainder > 0);
            remainder -= extra;
            *won.entry(seat).or_default() += share + extra;
        }
    }
    if undistributed > 0 {
        log::warn!("{undistributed} odd chip(s) left undistributed");
    }

    let payouts = won
        .into_iter()
        .filter(|&(_, amount)| amount > 0)
        .filter_map(|(seat, amount)| {
            ranked.get(&seat).map(|h| Payout {
                seat,
                amount,
                description: h.description.clone(),
                cards: h.best_five.clone(),
            })
        })
        .collect();
    Ok(Settlement { payouts, pot, undistributed, uncontested: false })
}
