use holdem_table::config::{BlindConfig, HandRules, PotRule};
use holdem_table::deck::{Deck, DeckError, DECK_SIZE};
use holdem_table::game::{Action, HandEngine, Phase};
use holdem_table::seat::{Player, SeatTable};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn pick_action(choice: u8, min_raise_to: Option<u64>, max_raise_to: Option<u64>) -> Action {
    match choice % 6 {
        0 => Action::Fold,
        1 => Action::Check,
        2 => Action::Call,
        3 => Action::Raise(min_raise_to.unwrap_or(0)),
        4 => {
            // Anywhere between the floor and the stack, or an illegal size.
            let lo = min_raise_to.unwrap_or(0);
            let hi = max_raise_to.unwrap_or(lo);
            Action::Raise(lo + u64::from(choice) * (hi.saturating_sub(lo) + 7) / 255)
        }
        _ => Action::AllIn,
    }
}

fn play_hand(
    stacks: &[u64],
    choices: &[u8],
    seed: u64,
    rules: HandRules,
) -> Result<(), TestCaseError> {
    let mut seats = SeatTable::new();
    for (s, &chips) in stacks.iter().enumerate() {
        seats.sit(s, Player::new(format!("s{s}"), format!("P{s}"), chips)).unwrap();
    }
    let total: u64 = stacks.iter().sum();
    let mut g = HandEngine::new().with_seed(seed).with_rules(rules);
    let dealer = (seed % stacks.len() as u64) as usize;
    if g.start_new_hand(&mut seats, dealer, BlindConfig::new(5, 10).unwrap()).is_err() {
        prop_assert!(stacks.iter().filter(|&&c| c > 0).count() < 2);
        return Ok(());
    }

    let mut steps = choices.iter().cycle();
    let mut guard = 0;
    while let Some(seat) = g.actor() {
        guard += 1;
        prop_assert!(guard < 1000, "hand did not terminate");
        let legal = g.legal_actions(&seats).unwrap();
        prop_assert_eq!(legal.seat, seat);
        let choice = *steps.next().unwrap_or(&2);
        let action = pick_action(choice, legal.min_raise_to, legal.max_raise_to);
        let before = (g.pot(), seats.total_chips(), g.actor());
        if g.handle_action(&mut seats, seat, action).is_err() {
            prop_assert_eq!((g.pot(), seats.total_chips(), g.actor()), before);
            // Calling (or checking for free) is always legal.
            g.handle_action(&mut seats, seat, Action::Call).unwrap();
        }
        prop_assert_eq!(seats.total_chips() + g.pot(), total);
        let wagered: u64 = seats.occupied().map(|(_, p)| p.total_bet()).sum();
        prop_assert_eq!(wagered, g.pot());
    }

    prop_assert_eq!(g.phase(), Phase::Showdown);
    let s = g.settlement().unwrap();
    prop_assert_eq!(s.paid() + s.undistributed, g.pot());
    s.apply(&mut seats);
    prop_assert_eq!(seats.total_chips(), total);
    Ok(())
}

proptest! {
    #[test]
    fn prop_chips_are_conserved_single_pot(
        stacks in prop::collection::vec(0u64..400, 2..=9),
        choices in prop::collection::vec(any::<u8>(), 1..40),
        seed in any::<u64>(),
    ) {
        play_hand(&stacks, &choices, seed, HandRules::default())?;
    }

    #[test]
    fn prop_chips_are_conserved_layered_pots(
        stacks in prop::collection::vec(1u64..400, 2..=9),
        choices in prop::collection::vec(any::<u8>(), 1..40),
        seed in any::<u64>(),
    ) {
        let rules = HandRules { pot: PotRule::Layered, ..HandRules::default() };
        play_hand(&stacks, &choices, seed, rules)?;
    }

    #[test]
    fn prop_shuffled_deck_is_a_permutation(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = Deck::standard();
        deck.reset(&mut rng);
        let mut seen = HashSet::new();
        for _ in 0..DECK_SIZE {
            prop_assert!(seen.insert(deck.deal().unwrap()));
        }
        prop_assert_eq!(deck.deal(), Err(DeckError::Exhausted));
    }
}
