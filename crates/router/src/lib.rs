//! Inbound event routing for parlor.
//!
//! The router is the single boundary between the platform and everything
//! else: it drops deny-listed users, performs registry admission, drives
//! the game engines, applies reward-point side effects, and converts
//! every handler failure into an inline reply or a silent drop. No event
//! may crash the loop.
//!
//! ## Core Types
//!
//! - [`Router`] — Dispatch for interactions and free-form messages
//! - [`Command`] — The formal command surface
//! - [`Interaction`] / [`ChatMessage`] — Inbound platform events
//! - [`Chat`] — Outbound channel abstraction
//! - [`Scheduler`] — Daily check-in and birthday sweep jobs
//! - [`RouterError`] — Handler failure taxonomy
mod chat;
mod command;
mod error;
mod event;
mod router;
mod scheduler;
#[cfg(test)]
mod testing;

pub use chat::*;
pub use command::*;
pub use error::*;
pub use event::*;
pub use router::*;
pub use scheduler::*;
