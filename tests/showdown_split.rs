use holdem_table::cards::Card;
use holdem_table::config::{BlindConfig, HandRules, OddChipRule, PotRule};
use holdem_table::evaluator::{EvalError, HandEvaluator, HandValue, RankedHand};
use holdem_table::game::{Action, HandEngine, HistoryVerb, Phase};
use holdem_table::seat::{Player, SeatTable};
use std::cell::RefCell;
use std::rc::Rc;

/// Ranks a hand 1 if it holds any favoured card, else 0. Tests pick the
/// favourites from the dealt hole cards, so ties and winners are exact.
#[derive(Debug, Clone, Default)]
struct Favoured {
    cards: Rc<RefCell<Vec<Card>>>,
}

impl Favoured {
    fn favour(&self, seats: &SeatTable, seat: usize) {
        let hole = seats.get(seat).and_then(|p| p.hole()).expect("dealt in");
        self.cards.borrow_mut().extend(hole.as_array());
    }
}

impl HandEvaluator for Favoured {
    fn rank(&self, cards: &[Card]) -> Result<RankedHand, EvalError> {
        let favoured = self.cards.borrow();
        let hit = cards.iter().any(|c| favoured.contains(c));
        let strength = HandValue::from_raw(u64::from(hit));
        let description = if hit { "Favoured" } else { "Unlucky" };
        Ok(RankedHand::new(strength, description, cards.iter().take(5).copied().collect()))
    }
}

fn mk_table(stacks: &[u64]) -> SeatTable {
    let mut t = SeatTable::new();
    for (s, &chips) in stacks.iter().enumerate() {
        t.sit(s, Player::new(format!("session-{s}"), format!("P{s}"), chips)).expect("free seat");
    }
    t
}

/// Seats 0 and 1 tie over a 101-chip pot; seat 2 loses after posting a 1-chip big blind.
fn odd_pot_hand(rules: HandRules) -> (HandEngine<Favoured>, SeatTable) {
    let eval = Favoured::default();
    let mut g = HandEngine::with_evaluator(eval.clone()).with_seed(7).with_rules(rules);
    let mut seats = mk_table(&[50, 50, 1]);
    g.start_new_hand(&mut seats, 0, BlindConfig::new(5, 10).unwrap()).unwrap();
    eval.favour(&seats, 0);
    eval.favour(&seats, 1);
    g.handle_action(&mut seats, 0, Action::AllIn).unwrap();
    g.handle_action(&mut seats, 1, Action::Call).unwrap();
    assert_eq!(g.phase(), Phase::Showdown);
    assert_eq!(g.pot(), 101);
    (g, seats)
}

#[test]
fn retained_odd_chip_is_reported_not_paid() {
    let rules = HandRules { odd_chips: OddChipRule::Retain, ..HandRules::default() };
    let (g, mut seats) = odd_pot_hand(rules);
    let s = g.settlement().unwrap();
    // Known rounding: floor(101 / 2) each, one chip left on the table.
    assert_eq!(s.payout_for(0).map(|p| p.amount), Some(50));
    assert_eq!(s.payout_for(1).map(|p| p.amount), Some(50));
    assert_eq!(s.undistributed, 1);
    assert_eq!(s.paid(), 100);
    assert!(s.payout_for(2).is_none());

    s.apply(&mut seats);
    assert_eq!(seats.total_chips(), 100);
}

#[test]
fn odd_chip_goes_to_first_winner_left_of_the_button() {
    let (g, mut seats) = odd_pot_hand(HandRules::default());
    let s = g.settlement().unwrap();
    assert_eq!(s.payout_for(1).map(|p| p.amount), Some(51));
    assert_eq!(s.payout_for(0).map(|p| p.amount), Some(50));
    assert_eq!(s.undistributed, 0);
    let splits = g.history().iter().filter(|e| e.verb == HistoryVerb::Split).count();
    assert_eq!(splits, 2);

    s.apply(&mut seats);
    assert_eq!(seats.total_chips(), 101);
}

#[test]
fn single_pot_lets_a_short_all_in_win_everything() {
    let eval = Favoured::default();
    let mut g = HandEngine::with_evaluator(eval.clone()).with_seed(8);
    let mut seats = mk_table(&[100, 1000, 1000]);
    g.start_new_hand(&mut seats, 0, BlindConfig::new(10, 20).unwrap()).unwrap();
    eval.favour(&seats, 0);
    g.handle_action(&mut seats, 0, Action::AllIn).unwrap();
    g.handle_action(&mut seats, 1, Action::Raise(400)).unwrap();
    g.handle_action(&mut seats, 2, Action::Call).unwrap();
    assert_eq!(g.phase(), Phase::Flop);
    while let Some(seat) = g.actor() {
        g.handle_action(&mut seats, seat, Action::Check).unwrap();
    }
    let s = g.settlement().unwrap();
    assert_eq!(s.winners(), vec![0]);
    assert_eq!(s.paid(), 900);
    assert_eq!(s.payouts[0].description, "Favoured");
}

#[test]
fn layered_pots_cap_a_short_all_in_at_what_it_covered() {
    let eval = Favoured::default();
    let rules = HandRules { pot: PotRule::Layered, ..HandRules::default() };
    let mut g = HandEngine::with_evaluator(eval.clone()).with_seed(8).with_rules(rules);
    let mut seats = mk_table(&[100, 1000, 1000]);
    g.start_new_hand(&mut seats, 0, BlindConfig::new(10, 20).unwrap()).unwrap();
    eval.favour(&seats, 0);
    g.handle_action(&mut seats, 0, Action::AllIn).unwrap();
    g.handle_action(&mut seats, 1, Action::Raise(400)).unwrap();
    g.handle_action(&mut seats, 2, Action::Call).unwrap();
    while let Some(seat) = g.actor() {
        g.handle_action(&mut seats, seat, Action::Check).unwrap();
    }
    let s = g.settlement().unwrap();
    // Main pot 3 x 100 to the favourite; the 600 side pot ties between seats 1 and 2.
    assert_eq!(s.payout_for(0).map(|p| p.amount), Some(300));
    assert_eq!(s.payout_for(1).map(|p| p.amount), Some(300));
    assert_eq!(s.payout_for(2).map(|p| p.amount), Some(300));
    assert_eq!(s.paid(), 900);
}
