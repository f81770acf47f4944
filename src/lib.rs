//! holdem-table: a single-table No-Limit Texas Hold'em hand engine
//!
//! Goals:
//! - One hand at a time: blinds, four betting rounds, turn order and showdown
//! - Chips are conserved: every wager goes through one pot chokepoint
//! - Rejected actions leave no trace; the error says why
//! - Hand ranking is pluggable through [`evaluator::HandEvaluator`]
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_table::config::BlindConfig;
//! use holdem_table::game::{Action, HandEngine, Phase};
//! use holdem_table::seat::{Player, SeatTable};
//!
//! let mut seats = SeatTable::new();
//! seats.sit(0, Player::new("s0", "Ann", 1000)).unwrap();
//! seats.sit(1, Player::new("s1", "Bob", 1000)).unwrap();
//!
//! let mut engine = HandEngine::new().with_seed(42);
//! engine.start_new_hand(&mut seats, 0, BlindConfig::new(10, 20).unwrap()).unwrap();
//! // Heads-up the button posts the small blind and acts first.
//! assert_eq!(engine.actor(), Some(0));
//!
//! engine.handle_action(&mut seats, 0, Action::Fold).unwrap();
//! assert_eq!(engine.phase(), Phase::Showdown);
//! let settlement = engine.settlement().unwrap();
//! assert_eq!(settlement.winners(), vec![1]);
//! settlement.apply(&mut seats);
//! assert_eq!(seats.get(1).unwrap().chips(), 1010);
//! ```
//!
//! ## TUI
//! Run the hot-seat table with:
//! ```sh
//! cargo run --bin holdem-table -- --players 4 --seed 7
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod pot;
pub mod seat;
pub mod showdown;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
