//! # pokergym-engine: Texas Hold'em Training Table
//!
//! A deterministic multi-seat Texas Hold'em table used as a reinforcement
//! learning environment. Provides the betting-round state machine, side-pot
//! resolution, hand scoring and an RL-style adapter producing fixed-width
//! state vectors.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`engine`] - The [`engine::Table`] state machine
//! - [`env`] - Reset/step/advance/showdown adapter and state encoding
//! - [`game`] - Table configuration, streets and button positions
//! - [`hand`] - Pluggable hand strength evaluators
//! - [`player`] - Seat state and player actions
//! - [`pot`] - Side pot layering and awarding
//! - [`rules`] - Betting validation and legal action masks
//! - [`logger`] - Hand records and JSONL logging
//! - [`errors`] - Error types for table misuse
//!
//! ## Quick Start
//!
//! ```rust
//! use pokergym_engine::cards::{Card, Rank, Suit};
//! use pokergym_engine::hand::{hand_strength, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let score = hand_strength(&cards);
//! assert_eq!(score.category, Category::StraightFlush);
//! assert_eq!(score.value(), 914);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every table owns its deck and RNG; the same seed replays the same cards:
//!
//! ```rust
//! use pokergym_engine::engine::Table;
//! use pokergym_engine::game::TableConfig;
//!
//! let mut a = Table::new(TableConfig::heads_up(42)).unwrap();
//! let mut b = Table::new(TableConfig::heads_up(42)).unwrap();
//! a.deal().unwrap();
//! b.deal().unwrap();
//! assert_eq!(a.snapshot(), b.snapshot());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod env;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
