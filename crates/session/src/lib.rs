//! Per-channel game session registry.
//!
//! The one structure mutated by more than one logical flow: slash-style
//! commands, free-form chat, and the trivia expiry task all race on it.
//! Every mutating operation is a single atomic step under one lock; there
//! is no separate check-then-act anywhere in the contract.
//!
//! ## Core Types
//!
//! - [`Session`] — Closed union of the stateful game kinds
//! - [`Registry`] — Channel → at-most-one live session, atomic admission
mod registry;
mod session;

pub use registry::*;
pub use session::*;
