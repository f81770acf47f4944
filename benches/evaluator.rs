use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_table::cards::parse_cards;
use holdem_table::config::BlindConfig;
use holdem_table::evaluator::{evaluate_best, evaluate_five, HandEvaluator, StandardEvaluator};
use holdem_table::game::{Action, HandEngine};
use holdem_table::seat::{Player, SeatTable};

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = parse_cards("Ah Kd 7s 5c 2d").unwrap();
    let sf = parse_cards("As Ks Qs Js Ts").unwrap();
    let hi: [_; 5] = hi.try_into().unwrap();
    let sf: [_; 5] = sf.try_into().unwrap();

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven = parse_cards("As Ah Ks Qs Js Ts 9s").unwrap();
    c.bench_function("evaluate_best_seven", |b| b.iter(|| evaluate_best(black_box(&seven))));
    c.bench_function("standard_evaluator_rank", |b| {
        b.iter(|| StandardEvaluator.rank(black_box(&seven)))
    });
}

fn bench_full_hand(c: &mut Criterion) {
    let blinds = BlindConfig::new(10, 20).unwrap();
    c.bench_function("hand_check_down_6max", |b| {
        let mut engine = HandEngine::new().with_seed(1);
        b.iter(|| {
            let mut seats = SeatTable::new();
            for i in 0..6 {
                seats.sit(i, Player::new(format!("s{i}"), format!("P{i}"), 1000)).unwrap();
            }
            engine.start_new_hand(&mut seats, 0, blinds).unwrap();
            while let Some(seat) = engine.actor() {
                let owed = engine.to_call(&seats, seat);
                let action = if owed > 0 { Action::Call } else { Action::Check };
                engine.handle_action(&mut seats, seat, action).unwrap();
            }
            black_box(engine.settlement().map(|s| s.paid()))
        })
    });
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_full_hand);
criterion_main!(benches);
