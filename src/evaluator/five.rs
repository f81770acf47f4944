use crate::cards::{Card, Rank};
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compact, comparable hand strength. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

impl HandValue {
    /// Wrap an evaluator-specific comparable value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five rank tiebreakers, most significant first.
    pub fn from_parts(category: Category, tiebreak: &[Rank]) -> Self {
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v = (category as u64) << CAT_SHIFT;
        for (i, r) in tiebreak.iter().take(5).enumerate() {
            v |= (r.value() as u64) << (CAT_SHIFT - RANK_STRIDE * (i as u32 + 1));
        }
        HandValue(v)
    }
}

/// Best-five evaluation of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    /// Cards ordered by significance (grouped ranks first, then kickers).
    pub best_five: [Card; 5],
    /// Ranks that decide ties within the category, most significant first.
    pub tiebreak: [Option<Rank>; 5],
    pub value: HandValue,
}

impl Evaluation {
    fn primary(&self) -> Rank {
        self.tiebreak[0].unwrap_or(self.best_five[0].rank())
    }

    fn secondary(&self) -> Rank {
        self.tiebreak[1].unwrap_or(self.best_five[1].rank())
    }

    /// Human-readable description, e.g. "Two Pair, Aces and Kings".
    pub fn describe(&self) -> String {
        let a = self.primary();
        match self.category {
            Category::HighCard => format!("High Card, {a}"),
            Category::Pair => format!("Pair of {}", a.plural()),
            Category::TwoPair => {
                format!("Two Pair, {} and {}", a.plural(), self.secondary().plural())
            }
            Category::ThreeOfAKind => format!("Three of a Kind, {}", a.plural()),
            Category::Straight => format!("Straight, {a} High"),
            Category::Flush => format!("Flush, {a} High"),
            Category::FullHouse => {
                format!("Full House, {} over {}", a.plural(), self.secondary().plural())
            }
            Category::FourOfAKind => format!("Four of a Kind, {}", a.plural()),
            Category::StraightFlush if a == Rank::Ace => "Royal Flush".to_string(),
            Category::StraightFlush => format!("Straight Flush, {a} High"),
        }
    }
}

/// Top rank of a straight in descending, distinct `ranks`; the wheel tops at Five.
fn straight_top(ranks: &[Rank; 5]) -> Option<Rank> {
    if ranks.windows(2).all(|w| w[0].value() == w[1].value() + 1) {
        return Some(ranks[0]);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    (*ranks == wheel).then_some(Rank::Five)
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank().value() as usize] += 1;
    }
    // Group ordering: bigger groups first, then higher rank.
    let mut sorted = *cards;
    sorted.sort_by(|a, b| {
        let ca = counts[a.rank().value() as usize];
        let cb = counts[b.rank().value() as usize];
        cb.cmp(&ca).then(b.rank().cmp(&a.rank())).then(b.suit().cmp(&a.suit()))
    });
    let ranks = sorted.map(Card::rank);

    let mut groups: Vec<(u8, Rank)> = Vec::with_capacity(5);
    for r in ranks {
        if groups.last().map_or(true, |&(_, g)| g != r) {
            groups.push((counts[r.value() as usize], r));
        }
    }
    let shape: Vec<u8> = groups.iter().map(|&(n, _)| n).collect();
    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight = if groups.len() == 5 { straight_top(&ranks) } else { None };

    let (category, tiebreak): (Category, Vec<Rank>) = match (straight, flush, shape.as_slice()) {
        (Some(top), true, _) => (Category::StraightFlush, vec![top]),
        (_, _, [4, 1]) => (Category::FourOfAKind, groups.iter().map(|g| g.1).collect()),
        (_, _, [3, 2]) => (Category::FullHouse, groups.iter().map(|g| g.1).collect()),
        (_, true, _) => (Category::Flush, ranks.to_vec()),
        (Some(top), false, _) => (Category::Straight, vec![top]),
        (_, _, [3, 1, 1]) => (Category::ThreeOfAKind, groups.iter().map(|g| g.1).collect()),
        (_, _, [2, 2, 1]) => (Category::TwoPair, groups.iter().map(|g| g.1).collect()),
        (_, _, [2, 1, 1, 1]) => (Category::Pair, groups.iter().map(|g| g.1).collect()),
        _ => (Category::HighCard, ranks.to_vec()),
    };

    // A wheel reads five-high: move the ace to the end.
    if straight == Some(Rank::Five) {
        sorted.rotate_left(1);
    }

    let mut tb = [None; 5];
    for (slot, r) in tb.iter_mut().zip(&tiebreak) {
        *slot = Some(*r);
    }
    Evaluation {
        category,
        best_five: sorted,
        tiebreak: tb,
        value: HandValue::from_parts(category, &tiebreak),
    }
}
