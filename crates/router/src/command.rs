use parlor_core::ID;
use parlor_core::User;
use parlor_games::Sign;

/// The formal command surface.
///
/// Construction is the transport's job; argument validation that can
/// fail with a user-visible hint (the birthday date format) happens in
/// the router so the hint reaches the invoking user inline.
#[derive(Debug, Clone)]
pub enum Command {
    Help,
    BirthdaySet { date: String },
    BirthdayWish { user: ID<User>, message: String },
    GameStart,
    Hit,
    Stand,
    Oracle { question: String },
    TriviaStart,
    TriviaAnswer { text: String },
    Duel { choice: Sign },
    Vibes { user: Option<ID<User>> },
    CheckIn,
    Blacklist { user: ID<User> },
    Unblacklist { user: ID<User> },
}

impl Command {
    /// Whether the caller must hold elevated permission.
    pub fn admin_gated(&self) -> bool {
        matches!(
            self,
            Command::CheckIn | Command::Blacklist { .. } | Command::Unblacklist { .. }
        )
    }
    /// Name as registered on the platform.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::BirthdaySet { .. } => "birthday-set",
            Command::BirthdayWish { .. } => "birthday-wish",
            Command::GameStart => "game-start",
            Command::Hit => "hit",
            Command::Stand => "stand",
            Command::Oracle { .. } => "oracle",
            Command::TriviaStart => "trivia-start",
            Command::TriviaAnswer { .. } => "trivia-answer",
            Command::Duel { .. } => "duel",
            Command::Vibes { .. } => "vibes",
            Command::CheckIn => "checkin",
            Command::Blacklist { .. } => "blacklist",
            Command::Unblacklist { .. } => "unblacklist",
        }
    }
}

/// Validates a "month/day" date string: 1..=12 and 1..=31, either
/// zero-padded or not.
pub fn valid_date(date: &str) -> bool {
    let mut parts = date.split('/');
    let month = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let day = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    match (month, day, parts.next()) {
        (Some(m), Some(d), None) => (1..=12).contains(&m) && (1..=31).contains(&d),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn accepts_both_encodings() {
        assert!(valid_date("3/5"));
        assert!(valid_date("03/05"));
        assert!(valid_date("12/31"));
    }
    #[test]
    fn rejects_out_of_range() {
        assert!(!valid_date("0/5"));
        assert!(!valid_date("13/5"));
        assert!(!valid_date("3/32"));
    }
    #[test]
    fn rejects_malformed() {
        assert!(!valid_date("march 5"));
        assert!(!valid_date("3/5/1990"));
        assert!(!valid_date("3"));
        assert!(!valid_date(""));
    }
    #[test]
    fn admin_gating_covers_moderation() {
        assert!(Command::CheckIn.admin_gated());
        assert!(Command::Blacklist { user: ID::from(1u64) }.admin_gated());
        assert!(!Command::GameStart.admin_gated());
    }
}
