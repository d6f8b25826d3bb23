use parlor_core::ID;
use parlor_core::Round;
use parlor_games::TriviaRound;
use parlor_games::TwentyOne;

/// One in-progress game bound to a channel.
///
/// A closed union: the set of stateful game kinds is fixed, and each
/// variant's allowed operations differ, so callers match on the kind
/// rather than dispatching dynamically. The oracle and the duel settle
/// in one call and never appear here.
#[derive(Debug)]
pub enum Session {
    Cards(TwentyOne),
    Trivia(TriviaRound),
}

impl Session {
    /// Human-readable kind for "wrong game" replies.
    pub fn kind(&self) -> &'static str {
        match self {
            Session::Cards(_) => "cards",
            Session::Trivia(_) => "trivia",
        }
    }
    pub fn as_cards(&mut self) -> Option<&mut TwentyOne> {
        match self {
            Session::Cards(game) => Some(game),
            _ => None,
        }
    }
    pub fn as_trivia(&mut self) -> Option<&mut TriviaRound> {
        match self {
            Session::Trivia(round) => Some(round),
            _ => None,
        }
    }
    /// Round token if this is an open trivia session.
    pub fn trivia_token(&self) -> Option<ID<Round>> {
        match self {
            Session::Trivia(round) => Some(round.token()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}
