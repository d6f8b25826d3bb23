use parlor_core::ID;
use parlor_core::Round;
use parlor_core::User;
use rand::Rng;

/// One entry in the fixed trivia catalog.
///
/// `answer` indexes into `options`; prompts and options are stored
/// lowercase so answer matching needs no further folding on this side.
#[derive(Debug)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub answer: usize,
}

pub const QUESTIONS: [Question; 8] = [
    Question {
        prompt: "what's the capital of france?",
        options: ["paris", "london", "berlin", "madrid"],
        answer: 0,
    },
    Question {
        prompt: "how many sides does a triangle have?",
        options: ["3", "4", "5", "6"],
        answer: 0,
    },
    Question {
        prompt: "what planet do we live on?",
        options: ["earth", "mars", "venus", "jupiter"],
        answer: 0,
    },
    Question {
        prompt: "what's 2 + 2?",
        options: ["3", "4", "5", "6"],
        answer: 1,
    },
    Question {
        prompt: "what color do you get when you mix red and blue?",
        options: ["purple", "green", "orange", "yellow"],
        answer: 0,
    },
    Question {
        prompt: "how many hours are in a day?",
        options: ["12", "24", "36", "48"],
        answer: 1,
    },
    Question {
        prompt: "what's the largest ocean?",
        options: ["atlantic", "pacific", "indian", "arctic"],
        answer: 1,
    },
    Question {
        prompt: "what animal says 'meow'?",
        options: ["dog", "cat", "bird", "cow"],
        answer: 1,
    },
];

/// Result of submitting a trivia answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// First correct submission: round is now closed, submitter wins.
    Correct,
    /// Wrong answer: round stays open, no state change.
    Incorrect,
    /// Round was already closed when the submission arrived.
    TooLate,
}

/// Sudden-death trivia: one question, first correct answer wins.
///
/// Once closed the round accepts no further state change; at most one
/// participant is ever recorded as winner. The round token is minted at
/// construction and identifies this exact round for compare-and-remove
/// by the expiry path.
#[derive(Debug)]
pub struct TriviaRound {
    token: ID<Round>,
    question: &'static Question,
    winner: Option<ID<User>>,
}

impl Default for TriviaRound {
    fn default() -> Self {
        let pick = rand::rng().random_range(0..QUESTIONS.len());
        Self::with_question(&QUESTIONS[pick])
    }
}

impl TriviaRound {
    /// Opens a round over a specific catalog entry (deterministic setup).
    pub fn with_question(question: &'static Question) -> Self {
        Self {
            token: ID::fresh(),
            question,
            winner: None,
        }
    }
    pub fn token(&self) -> ID<Round> {
        self.token
    }
    pub fn answered(&self) -> bool {
        self.winner.is_some()
    }
    pub fn winner(&self) -> Option<ID<User>> {
        self.winner
    }
    /// The question plus numbered options, ready to announce.
    pub fn prompt(&self) -> String {
        let options = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(i, opt)| format!("{}. {}", i + 1, opt))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}", self.question.prompt, options)
    }
    /// Checks a submission against the open round.
    ///
    /// Text is trimmed and lowercased; a bare 1-based option number is
    /// accepted as an index shortcut. The first correct submission closes
    /// the round and records the winner; every later submission gets
    /// [`Verdict::TooLate`] even if it is also correct.
    pub fn check_answer(&mut self, text: &str, user: ID<User>) -> Verdict {
        if self.answered() {
            return Verdict::TooLate;
        }
        let submitted = text.trim().to_lowercase();
        let correct = self.question.options[self.question.answer];
        let by_index = submitted
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=self.question.options.len()).contains(n))
            .map(|n| self.question.options[n - 1] == correct)
            .unwrap_or(false);
        if submitted == correct || by_index {
            self.winner = Some(user);
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn round() -> TriviaRound {
        // capital of france: paris, option 1
        TriviaRound::with_question(&QUESTIONS[0])
    }
    #[test]
    fn accepts_answer_text() {
        let mut round = round();
        assert_eq!(round.check_answer("  Paris ", ID::from(1u64)), Verdict::Correct);
        assert_eq!(round.winner(), Some(ID::from(1u64)));
    }
    #[test]
    fn accepts_one_based_index() {
        let mut round = round();
        assert_eq!(round.check_answer("1", ID::from(2u64)), Verdict::Correct);
    }
    #[test]
    fn rejects_wrong_answer_without_closing() {
        let mut round = round();
        assert_eq!(round.check_answer("london", ID::from(3u64)), Verdict::Incorrect);
        assert!(!round.answered());
        assert_eq!(round.winner(), None);
    }
    #[test]
    fn rejects_wrong_index() {
        let mut round = round();
        assert_eq!(round.check_answer("2", ID::from(3u64)), Verdict::Incorrect);
        assert_eq!(round.check_answer("9", ID::from(3u64)), Verdict::Incorrect);
        assert!(!round.answered());
    }
    #[test]
    fn second_correct_answer_is_too_late() {
        let mut round = round();
        assert_eq!(round.check_answer("paris", ID::from(1u64)), Verdict::Correct);
        assert_eq!(round.check_answer("paris", ID::from(2u64)), Verdict::TooLate);
        assert_eq!(round.winner(), Some(ID::from(1u64)));
    }
    #[test]
    fn tokens_distinguish_rounds() {
        assert_ne!(round().token(), round().token());
    }
}
