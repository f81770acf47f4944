use holdem_table::cards::{parse_cards, Card};
use holdem_table::deck::Deck;
use holdem_table::evaluator::{
    evaluate_best, evaluate_five, Category, HandEvaluator, StandardEvaluator,
};
use proptest::prelude::*;

fn five(s: &str) -> [Card; 5] {
    parse_cards(s).unwrap().try_into().expect("five cards")
}

#[test]
fn categories_and_descriptions() {
    let cases = [
        ("As Ks Qs Js Ts", Category::StraightFlush, "Royal Flush"),
        ("9c 9d 9h 9s Ac", Category::FourOfAKind, "Four of a Kind, Nines"),
        ("3c 3d 3h Js Jc", Category::FullHouse, "Full House, Threes over Jacks"),
        ("Kh Th 8h 6h 3h", Category::Flush, "Flush, K High"),
        ("Ac 5c 4d 3h 2s", Category::Straight, "Straight, 5 High"),
        ("Qc Qd Qh Ts 2c", Category::ThreeOfAKind, "Three of a Kind, Queens"),
        ("Jc Jd 9h 9s 2c", Category::TwoPair, "Two Pair, Jacks and Nines"),
        ("As Ah Kc Qd 3h", Category::Pair, "Pair of Aces"),
        ("Ah Kd 7s 5c 2d", Category::HighCard, "High Card, A"),
    ];
    for (cards, category, description) in cases {
        let e = evaluate_five(&five(cards));
        assert_eq!(e.category, category, "{cards}");
        assert_eq!(e.describe(), description, "{cards}");
    }
}

#[test]
fn kickers_break_ties_and_suits_do_not() {
    let a = evaluate_five(&five("As Ah Kc Qd 3h"));
    let b = evaluate_five(&five("Ac Ad Kh Qs 2h"));
    assert!(a.value > b.value);
    let c = evaluate_five(&five("Ad Ac Ks Qh 3c"));
    assert_eq!(a.value, c.value);
}

#[test]
fn standard_evaluator_reports_best_five_of_seven() {
    let cards = parse_cards("2c 3d As Ks Qs Js Ts").unwrap();
    let ranked = StandardEvaluator.rank(&cards).unwrap();
    assert_eq!(ranked.description, "Royal Flush");
    let mut best = ranked.best_five.clone();
    best.sort();
    let mut royal = parse_cards("As Ks Qs Js Ts").unwrap();
    royal.sort();
    assert_eq!(best, royal);
}

fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(Deck::standard().as_slice().to_vec(), n).prop_shuffle()
}

proptest! {
    #[test]
    fn best_of_seven_beats_every_five_card_subset(cards in distinct_cards(7)) {
        let best = evaluate_best(&cards).unwrap();
        for skip_a in 0..7 {
            for skip_b in (skip_a + 1)..7 {
                let subset: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip_a && i != skip_b)
                    .map(|(_, c)| *c)
                    .collect();
                let subset: [Card; 5] = subset.try_into().unwrap();
                prop_assert!(best.value >= evaluate_five(&subset).value);
            }
        }
    }

    #[test]
    fn ranking_ignores_card_order(cards in distinct_cards(7), rotate in 0usize..7) {
        let mut rotated = cards.clone();
        rotated.rotate_left(rotate);
        let original = evaluate_best(&cards).unwrap().value;
        prop_assert_eq!(original, evaluate_best(&rotated).unwrap().value);
    }

    #[test]
    fn category_is_monotone_in_value(a in distinct_cards(5), b in distinct_cards(5)) {
        let ea = evaluate_five(&a.clone().try_into().unwrap());
        let eb = evaluate_five(&b.clone().try_into().unwrap());
        if ea.category > eb.category {
            prop_assert!(ea.value > eb.value);
        }
    }
}
