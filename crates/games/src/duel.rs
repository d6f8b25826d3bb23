use super::outcome::Outcome;
use parlor_core::Arbitrary;
use rand::Rng;

/// The three signs of the duel, in cyclic dominance:
/// A beats C, B beats A, C beats B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    A,
    B,
    C,
}

impl Sign {
    /// The sign this one defeats.
    pub fn beats(self) -> Sign {
        match self {
            Sign::A => Sign::C,
            Sign::B => Sign::A,
            Sign::C => Sign::B,
        }
    }
}

impl Arbitrary for Sign {
    fn random() -> Self {
        match rand::rng().random_range(0..3) {
            0 => Sign::A,
            1 => Sign::B,
            _ => Sign::C,
        }
    }
}

impl TryFrom<&str> for Sign {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Sign::A),
            "B" => Ok(Sign::B),
            "C" => Ok(Sign::C),
            other => Err(format!("not a duel sign: {}", other)),
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Sign::A => write!(f, "A"),
            Sign::B => write!(f, "B"),
            Sign::C => write!(f, "C"),
        }
    }
}

/// Single-throw duel against a uniformly random house sign.
/// Stateless: settles in one call and never occupies the registry.
pub struct Duel;

impl Duel {
    /// Throws the player sign against a fresh house sign.
    pub fn throw(player: Sign) -> (Sign, Outcome) {
        let house = Sign::random();
        (house, Self::judge(player, house))
    }
    /// Settles two signs under cyclic dominance.
    pub fn judge(player: Sign, house: Sign) -> Outcome {
        if player == house {
            Outcome::Tie
        } else if player.beats() == house {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn dominance_is_cyclic() {
        assert_eq!(Duel::judge(Sign::A, Sign::C), Outcome::Win);
        assert_eq!(Duel::judge(Sign::B, Sign::A), Outcome::Win);
        assert_eq!(Duel::judge(Sign::C, Sign::B), Outcome::Win);
        assert_eq!(Duel::judge(Sign::C, Sign::A), Outcome::Loss);
        assert_eq!(Duel::judge(Sign::A, Sign::A), Outcome::Tie);
    }
    #[test]
    fn signs_parse_case_insensitively() {
        assert_eq!(Sign::try_from(" a ").unwrap(), Sign::A);
        assert_eq!(Sign::try_from("B").unwrap(), Sign::B);
        assert!(Sign::try_from("rock").is_err());
    }
}
