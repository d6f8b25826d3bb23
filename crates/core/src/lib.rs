//! Core type aliases, traits, and constants for parlor.
//!
//! This crate provides the foundational identifier types and tuning
//! parameters used throughout the parlor workspace.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Reward point balances and deltas.
pub type Points = i64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and simulation.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::sync::atomic::AtomicU64;

/// Marker for platform user identifiers.
pub struct User;
/// Marker for platform channel identifiers.
pub struct Channel;
/// Marker for platform message identifiers.
pub struct Message;
/// Marker for community (guild/server) identifiers.
pub struct Community;
/// Marker for ephemeral game round tokens.
pub struct Round;

/// Generic ID wrapper providing compile-time type safety over u64.
///
/// Platform identifiers (users, channels, messages) arrive as opaque
/// 64-bit integers; round tokens are minted locally from a process-wide
/// counter.
pub struct ID<T> {
    inner: u64,
    marker: PhantomData<T>,
}

static NEXT: AtomicU64 = AtomicU64::new(1);

impl<T> ID<T> {
    pub fn inner(&self) -> u64 {
        self.inner
    }
    /// Mints a fresh process-unique identifier.
    pub fn fresh() -> Self {
        Self::from(NEXT.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
    }
    /// Cast ID<T> to ID<U> while preserving the underlying integer.
    /// Useful for converting between marker types.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for u64 {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<u64> for ID<T> {
    fn from(inner: u64) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::fresh()
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// CARD GAME PARAMETERS
// ============================================================================
/// Busting line: a hand above this total loses outright.
pub const BUST_LINE: u32 = 21;
/// The house keeps drawing while its total is below this.
pub const HOUSE_STAND: u32 = 17;
/// Distinct card values in the draw pile (1 through this, inclusive).
pub const PILE_VALUES: u8 = 10;
/// Copies of each value in a fresh pile.
pub const PILE_COPIES: usize = 4;

// ============================================================================
// REWARD POINT AWARDS
// Fixed per-settlement deltas applied by the router. Addition only.
// ============================================================================
/// Winning a card game.
pub const AWARD_CARDS_WIN: Points = 10;
/// Tying a card game.
pub const AWARD_CARDS_TIE: Points = 7;
/// Losing a card game (busting included).
pub const AWARD_CARDS_LOSS: Points = 5;
/// First correct trivia answer.
pub const AWARD_TRIVIA_WIN: Points = 15;
/// Consulting the oracle.
pub const AWARD_ORACLE: Points = 2;
/// Winning a duel.
pub const AWARD_DUEL_WIN: Points = 5;
/// Tying a duel.
pub const AWARD_DUEL_TIE: Points = 0;
/// Losing a duel.
pub const AWARD_DUEL_LOSS: Points = 3;

// ============================================================================
// TIMING & SCHEDULING
// ============================================================================
/// How long an unanswered trivia round stays open.
pub const TRIVIA_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(90);
/// Interval between scheduler ticks.
pub const SCHEDULER_TICK: std::time::Duration = std::time::Duration::from_secs(60 * 60 * 24);
/// Weekday for the social check-in prompt (0 = Monday, 4 = Friday).
pub const CHECKIN_WEEKDAY: u8 = 4;
/// Pause between scheduled sends, for platform rate limits.
pub const SEND_SPACING: std::time::Duration = std::time::Duration::from_secs(1);

// ============================================================================
// PRESENTATION
// ============================================================================
/// Probability of reacting to an ordinary message with an emoji.
pub const REACTION_CHANCE: f64 = 0.1;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ids_preserve_inner() {
        let id: ID<User> = ID::from(42u64);
        assert_eq!(id.inner(), 42);
        assert_eq!(u64::from(id), 42);
    }
    #[test]
    fn ids_cast_between_markers() {
        let user: ID<User> = ID::from(7u64);
        let channel: ID<Channel> = user.cast();
        assert_eq!(channel.inner(), 7);
    }
    #[test]
    fn fresh_ids_are_distinct() {
        let a: ID<Round> = ID::fresh();
        let b: ID<Round> = ID::fresh();
        assert_ne!(a, b);
    }
}
