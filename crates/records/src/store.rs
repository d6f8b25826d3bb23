use async_trait::async_trait;
use parlor_core::ID;
use parlor_core::Points;
use parlor_core::User;
use serde::Deserialize;
use serde::Serialize;

/// One birthday wish, appended to the celebrant's record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wish {
    pub wisher: u64,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Wish {
    pub fn new(wisher: ID<User>, text: &str) -> Self {
        Self {
            wisher: wisher.inner(),
            text: text.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Persistence contract for points, birthdays, wishes, and the
/// deny-list.
///
/// Keys are opaque 64-bit user identifiers. Point balances are created
/// lazily on first award and mutated by addition only; `add_points` must
/// be increment-or-create so a balance row is never absent after an
/// award. Setting a birthday overwrites the date and resets the wish
/// list; wishes are ordered and append-only.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Current balance, zero if no row exists.
    async fn points(&self, user: ID<User>) -> anyhow::Result<Points>;
    /// Atomic increment-or-create.
    async fn add_points(&self, user: ID<User>, delta: Points) -> anyhow::Result<()>;
    /// Overwrites the date and resets the wish list.
    async fn set_birthday(&self, user: ID<User>, date: &str) -> anyhow::Result<()>;
    async fn birthday(&self, user: ID<User>) -> anyhow::Result<Option<String>>;
    /// Appends a wish, creating the record if the celebrant has not set
    /// a date yet.
    async fn add_wish(&self, user: ID<User>, wisher: ID<User>, text: &str) -> anyhow::Result<()>;
    /// Wishes in append order.
    async fn wishes(&self, user: ID<User>) -> anyhow::Result<Vec<Wish>>;
    /// Users whose stored date matches any of the given textual keys.
    /// Callers pass every encoding they tolerate (e.g. "3/5" and "03/05").
    async fn birthdays_on(&self, keys: &[String]) -> anyhow::Result<Vec<ID<User>>>;
    async fn is_denied(&self, user: ID<User>) -> anyhow::Result<bool>;
    async fn deny(&self, user: ID<User>) -> anyhow::Result<()>;
    async fn allow(&self, user: ID<User>) -> anyhow::Result<()>;
}
