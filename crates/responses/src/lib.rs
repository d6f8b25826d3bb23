//! Canned response catalogs for parlor.
//!
//! A pure mapping from an event category to one of several phrasings,
//! deterministic modulo the uniform selector. Presentation is lowercase
//! casual throughout; nothing here touches game or chat state.
use rand::Rng;

/// Event categories with a dedicated phrasing catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    /// The player beat the house (or answered first).
    Win,
    /// The player lost to the house.
    Loss,
    /// Dead-even settlement.
    Tie,
    /// The bot got something wrong and owns it.
    Mistake,
    /// A wrong trivia answer worth acknowledging.
    NotIt,
    /// A correct-but-late trivia answer.
    TooLate,
    /// Periodic social check-in prompt.
    CheckIn,
}

const WIN: [&str; 5] = [
    "no way, ok you ate that",
    "wait that was crazy",
    "ok gg that was actually insane",
    "nah you're too good at this",
    "okay okay you got me there",
];

const LOSS: [&str; 5] = [
    "dang... that was close tho",
    "okay okay next time for sure",
    "nah that was still fun tho",
    "ok gg that was close",
    "aw man, but you'll get em next time",
];

const TIE: [&str; 4] = [
    "wait no way, a tie",
    "ok that's actually wild",
    "nah that's too close to call",
    "okay okay we're both winners here",
];

const MISTAKE: [&str; 4] = [
    "wait i was wrong, my bad",
    "ok hold up i messed that up",
    "nah wait that's on me",
    "okay okay i was wrong there",
];

const NOT_IT: [&str; 1] = ["nah that's not it"];

const TOO_LATE: [&str; 1] = ["okay okay someone already got it"];

const CHECK_IN: [&str; 4] = [
    "hey... how's everyone doin lately?\nrandom thought: what song are you stuck on rn?",
    "okay okay who's still alive here?\nwhat's everyone up to?",
    "hey friends, been quiet lately... what's good?",
    "ok random check in time, how's everyone's week been?",
];

/// Emoji palette for probabilistic reactions to ordinary messages.
pub const EMOJIS: [&str; 6] = ["😊", "👀", "😭", "😔", "🎉", "👋"];

/// Picks one phrasing for the given mood, uniformly at random.
pub fn quip(mood: Mood) -> &'static str {
    fn pick(catalog: &'static [&'static str]) -> &'static str {
        catalog[rand::rng().random_range(0..catalog.len())]
    }
    match mood {
        Mood::Win => pick(&WIN),
        Mood::Loss => pick(&LOSS),
        Mood::Tie => pick(&TIE),
        Mood::Mistake => pick(&MISTAKE),
        Mood::NotIt => pick(&NOT_IT),
        Mood::TooLate => pick(&TOO_LATE),
        Mood::CheckIn => pick(&CHECK_IN),
    }
}

/// Birthday announcement with the celebrant's mention spliced in.
pub fn birthday(mention: &str) -> String {
    format!(
        "it's {} day 🎉 everyone say something nice or i will cry",
        mention
    )
}

/// Picks one reaction emoji.
pub fn emoji() -> &'static str {
    EMOJIS[rand::rng().random_range(0..EMOJIS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn quips_come_from_the_right_catalog() {
        for _ in 0..16 {
            assert!(WIN.contains(&quip(Mood::Win)));
            assert!(LOSS.contains(&quip(Mood::Loss)));
            assert!(CHECK_IN.contains(&quip(Mood::CheckIn)));
        }
    }
    #[test]
    fn birthday_mentions_the_celebrant() {
        assert!(birthday("<@42>").contains("<@42>"));
    }
}
