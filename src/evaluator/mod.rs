//! Hand-strength contract used at showdown.
//!
//! The betting engine never ranks hands itself; it hands each contender's seven
//! cards to a [`HandEvaluator`] and trusts the result. [`StandardEvaluator`] is
//! the built-in implementation, and any other ranking service can be plugged in
//! by implementing the trait.

pub(crate) mod combinations;
mod five;

pub use five::{evaluate_five, Category, Evaluation, HandValue};

use crate::cards::Card;
use combinations::FiveOf;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("expected 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card: {0}")]
    Duplicate(Card),
}

/// One contender's ranked hand as returned by an evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RankedHand {
    /// Comparable strength; higher wins, equal values tie.
    pub strength: HandValue,
    /// Human-readable description, e.g. "Two Pair, Aces and Kings".
    pub description: String,
    /// The five cards that make the hand.
    pub best_five: Vec<Card>,
}

impl RankedHand {
    pub fn new(strength: HandValue, description: impl Into<String>, best_five: Vec<Card>) -> Self {
        Self { strength, description: description.into(), best_five }
    }
}

/// External hand-ranking capability.
pub trait HandEvaluator {
    /// Rank the best five-card hand that can be made from `cards`
    /// (two hole cards plus the board).
    fn rank(&self, cards: &[Card]) -> Result<RankedHand, EvalError>;

    /// Indices of the tied-best entries in `hands`.
    fn winners(&self, hands: &[RankedHand]) -> Vec<usize> {
        let Some(best) = hands.iter().map(|h| h.strength).max() else {
            return Vec::new();
        };
        hands.iter().enumerate().filter(|(_, h)| h.strength == best).map(|(i, _)| i).collect()
    }
}

impl<E: HandEvaluator + ?Sized> HandEvaluator for &E {
    fn rank(&self, cards: &[Card]) -> Result<RankedHand, EvalError> {
        (**self).rank(cards)
    }

    fn winners(&self, hands: &[RankedHand]) -> Vec<usize> {
        (**self).winners(hands)
    }
}

/// Best five-card evaluation over every combination of 5 to 7 cards.
///
/// ```
/// use holdem_table::cards::parse_cards;
/// use holdem_table::evaluator::{evaluate_best, Category};
///
/// let cards = parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap();
/// let eval = evaluate_best(&cards).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(EvalError::Duplicate(*dup));
    }
    FiveOf::new(cards.len())
        .map(|ix| evaluate_five(&ix.map(|i| cards[i])))
        .max_by_key(|e| e.value)
        .ok_or(EvalError::CardCount(cards.len()))
}

/// Built-in evaluator backed by [`evaluate_best`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn rank(&self, cards: &[Card]) -> Result<RankedHand, EvalError> {
        let eval = evaluate_best(cards)?;
        Ok(RankedHand::new(eval.value, eval.describe(), eval.best_five.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn rank(s: &str) -> RankedHand {
        StandardEvaluator.rank(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn picks_best_five_of_seven() {
        let h = rank("Ah Kh 2h 7h 9c 9d Qh");
        assert_eq!(h.description, "Flush, A High");
        assert_eq!(h.best_five.len(), 5);
        assert!(h.best_five.iter().all(|c| c.suit() == crate::cards::Suit::Hearts));
    }

    #[test]
    fn rejects_bad_input() {
        let cards = parse_cards("Ah Kh 2h 7h").unwrap();
        assert_eq!(StandardEvaluator.rank(&cards), Err(EvalError::CardCount(4)));
        let cards = parse_cards("Ah Kh 2h 7h Ah").unwrap();
        assert!(matches!(StandardEvaluator.rank(&cards), Err(EvalError::Duplicate(_))));
    }

    #[test]
    fn winners_reports_ties() {
        // Board plays for both.
        let a = rank("2c 3d As Ks Qs Js Ts");
        let b = rank("4c 5d As Ks Qs Js Ts");
        let c = rank("4h 6d Ac Kd Qh Jc 9s");
        assert_eq!(StandardEvaluator.winners(&[a.clone(), b, c.clone()]), vec![0, 1]);
        assert_eq!(StandardEvaluator.winners(&[c, a]), vec![1]);
        assert!(StandardEvaluator.winners(&[]).is_empty());
    }
}
