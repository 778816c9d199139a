//! # headsup-engine: Heads-Up Hold'em Core
//!
//! A deterministic no-limit Texas Hold'em engine for two players. Provides
//! exact hand evaluation, strategic hand classification, a betting-round
//! state machine driven by pluggable decision policies, and a hand
//! orchestrator with seeded shuffling for reproducible simulations.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and textual encoding
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Best-five-of-N evaluation, tiebreaks and set/board metadata
//! - [`strength`] - Preflop strength, pair tiers and draw detection
//! - [`player`] - Player state and chip operations
//! - [`policy`] - Decision context and the `DecisionPolicy` trait
//! - [`rules`] - Raise floor and stack clamping
//! - [`betting`] - Betting-round state machine
//! - [`game`] - Table state, blinds, dealing and pot award
//! - [`engine`] - Hand orchestration
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_engine::cards::parse_cards;
//! use headsup_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah 2h 3h 4h 5h Kd Qc").unwrap();
//! let eval = evaluate(&cards).unwrap();
//! assert_eq!(eval.rank.category, Category::StraightFlush);
//! assert_eq!(eval.rank.tiebreak, vec![5]);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All shuffles come from an explicitly seeded RNG:
//!
//! ```rust
//! use headsup_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.cards(), b.cards());
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod policy;
pub mod rules;
pub mod strength;
