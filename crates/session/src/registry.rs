use super::session::Session;
use parlor_core::Channel;
use parlor_core::ID;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::Mutex;

/// Channel → at-most-one live session.
///
/// All entry points share one lock, so admission, in-place mutation, and
/// removal are each a single atomic step. Between a successful
/// [`try_start`](Self::try_start) and the matching terminal remove,
/// exactly one session occupies the channel.
#[derive(Default)]
pub struct Registry {
    sessions: Mutex<HashMap<ID<Channel>, Session>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    /// Installs the session iff the channel is vacant.
    ///
    /// The vacancy check and the install happen under one lock hold, so
    /// two racing callers can never both succeed for the same channel.
    /// On failure the argument is dropped and nothing is mutated.
    pub async fn try_start(&self, channel: ID<Channel>, session: Session) -> bool {
        match self.sessions.lock().await.entry(channel) {
            Entry::Vacant(vacant) => {
                log::debug!("[registry] {} opens in channel {}", session, channel);
                vacant.insert(session);
                true
            }
            Entry::Occupied(held) => {
                log::debug!(
                    "[registry] channel {} already running {}",
                    channel,
                    held.get()
                );
                false
            }
        }
    }
    /// Admission-first start: the session is constructed only after the
    /// vacancy check passes, inside the same lock hold, so a losing race
    /// never builds an engine at all.
    pub async fn admit(&self, channel: ID<Channel>, make: impl FnOnce() -> Session) -> bool {
        match self.sessions.lock().await.entry(channel) {
            Entry::Vacant(vacant) => {
                let session = make();
                log::debug!("[registry] {} opens in channel {}", session, channel);
                vacant.insert(session);
                true
            }
            Entry::Occupied(_) => false,
        }
    }
    /// Runs a closure against the live session, if any, under the lock.
    ///
    /// This is the atomic unit for game moves: a trivia answer check and
    /// its close, or a card draw and its settlement, cannot interleave
    /// with another entry point.
    pub async fn with<R>(
        &self,
        channel: ID<Channel>,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        self.sessions.lock().await.get_mut(&channel).map(f)
    }
    /// Removes and returns the channel's session. Idempotent: removing
    /// from a vacant channel is a no-op, not an error.
    pub async fn remove(&self, channel: ID<Channel>) -> Option<Session> {
        let removed = self.sessions.lock().await.remove(&channel);
        if let Some(ref session) = removed {
            log::debug!("[registry] {} closes in channel {}", session, channel);
        }
        removed
    }
    /// Atomic compare-and-remove for the expiry path.
    ///
    /// Removes the session only if the predicate holds for the one
    /// currently installed; a session that was already replaced or
    /// removed by a concurrent human action is left untouched.
    pub async fn remove_if(
        &self,
        channel: ID<Channel>,
        pred: impl FnOnce(&Session) -> bool,
    ) -> Option<Session> {
        match self.sessions.lock().await.entry(channel) {
            Entry::Occupied(held) => match pred(held.get()) {
                true => Some(held.remove()),
                false => None,
            },
            Entry::Vacant(_) => None,
        }
    }
    /// Whether any session occupies the channel.
    pub async fn occupied(&self, channel: ID<Channel>) -> bool {
        self.sessions.lock().await.contains_key(&channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_games::Pile;
    use parlor_games::QUESTIONS;
    use parlor_games::TriviaRound;
    use parlor_games::TwentyOne;
    use parlor_games::Verdict;
    use std::sync::Arc;

    fn channel(n: u64) -> ID<Channel> {
        ID::from(n)
    }
    fn cards() -> Session {
        Session::Cards(TwentyOne::deal(Pile::stacked(vec![2, 2, 2, 2])))
    }
    fn trivia() -> Session {
        Session::Trivia(TriviaRound::with_question(&QUESTIONS[0]))
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let registry = Registry::new();
        assert!(registry.try_start(channel(1), cards()).await);
        assert!(!registry.try_start(channel(1), trivia()).await);
        assert!(registry.occupied(channel(1)).await);
    }
    #[tokio::test]
    async fn channels_are_independent() {
        let registry = Registry::new();
        assert!(registry.try_start(channel(1), cards()).await);
        assert!(registry.try_start(channel(2), cards()).await);
    }
    #[tokio::test]
    async fn remove_is_idempotent() {
        let registry = Registry::new();
        registry.try_start(channel(1), cards()).await;
        assert!(registry.remove(channel(1)).await.is_some());
        assert!(registry.remove(channel(1)).await.is_none());
        assert!(!registry.occupied(channel(1)).await);
    }
    #[tokio::test]
    async fn start_succeeds_after_remove() {
        let registry = Registry::new();
        registry.try_start(channel(1), cards()).await;
        registry.remove(channel(1)).await;
        assert!(registry.try_start(channel(1), trivia()).await);
    }
    #[tokio::test]
    async fn remove_if_spares_replaced_sessions() {
        let registry = Registry::new();
        let round = TriviaRound::with_question(&QUESTIONS[0]);
        let stale = round.token();
        registry.try_start(channel(1), Session::Trivia(round)).await;
        registry.remove(channel(1)).await;
        registry.try_start(channel(1), trivia()).await;
        let removed = registry
            .remove_if(channel(1), |s| s.trivia_token() == Some(stale))
            .await;
        assert!(removed.is_none());
        assert!(registry.occupied(channel(1)).await);
    }
    #[tokio::test]
    async fn remove_if_takes_matching_session() {
        let registry = Registry::new();
        let round = TriviaRound::with_question(&QUESTIONS[0]);
        let token = round.token();
        registry.try_start(channel(1), Session::Trivia(round)).await;
        let removed = registry
            .remove_if(channel(1), |s| s.trivia_token() == Some(token))
            .await;
        assert!(removed.is_some());
        assert!(!registry.occupied(channel(1)).await);
    }
    #[tokio::test]
    async fn racing_answers_produce_one_winner() {
        let registry = Arc::new(Registry::new());
        registry
            .try_start(channel(1), Session::Trivia(TriviaRound::with_question(&QUESTIONS[0])))
            .await;
        let mut handles = Vec::new();
        for user in 1..=8u64 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry
                    .with(channel(1), |s| {
                        s.as_trivia()
                            .map(|round| round.check_answer("paris", ID::from(user)))
                    })
                    .await
                    .flatten()
            }));
        }
        let mut correct = 0;
        let mut late = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Some(Verdict::Correct) => correct += 1,
                Some(Verdict::TooLate) => late += 1,
                _ => {}
            }
        }
        assert_eq!(correct, 1);
        assert_eq!(late, 7);
        let winner = registry
            .with(channel(1), |s| s.as_trivia().and_then(|r| r.winner()))
            .await
            .flatten();
        assert!(winner.is_some());
    }
}
