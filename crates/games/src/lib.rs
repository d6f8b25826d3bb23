//! Mini-game engines for parlor.
//!
//! Each engine is a self-contained state machine with no knowledge of
//! channels, persistence, or presentation. The router owns wiring them
//! into chat.
//!
//! ## Core Types
//!
//! - [`Pile`] — Draw pile of card values, reshuffled on exhaustion
//! - [`TwentyOne`] — Push-your-luck card game against the house
//! - [`TriviaRound`] — Sudden-death first-correct-answer trivia
//! - [`Oracle`] — Stateless yes/no/maybe fortune telling
//! - [`Duel`] — Single-throw three-sign duel against the house
//! - [`Outcome`] — Shared win/loss/tie settlement vocabulary
mod duel;
mod oracle;
mod outcome;
mod pile;
mod trivia;
mod twentyone;

pub use duel::*;
pub use oracle::*;
pub use outcome::*;
pub use pile::*;
pub use trivia::*;
pub use twentyone::*;
