//! Record store contract and implementations.
//!
//! What survives process restarts: point balances, birthday dates,
//! their accumulated wish lists, and the deny-list. In-progress game
//! state deliberately does not; see the session registry.
//!
//! ## Core Types
//!
//! - [`RecordStore`] — Object-safe async contract over the persisted records
//! - [`Wish`] — One appended birthday wish
//! - [`MemoryStore`] — In-process store for tests and standalone runs
//! - `PgStore` — tokio-postgres store (behind the `database` feature)
mod memory;
#[cfg(feature = "database")]
mod pg;
mod store;

pub use memory::*;
#[cfg(feature = "database")]
pub use pg::*;
pub use store::*;
