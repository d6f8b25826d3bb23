use rand::Rng;

/// Canned oracle pronouncements. Roughly balanced between yes, no,
/// and noncommittal.
const ANSWERS: [&str; 20] = [
    "yeah lowkey yes",
    "nah i wouldn't risk it",
    "ask again after snacks",
    "okay okay probably",
    "nah that's a no from me",
    "yeah go for it",
    "ok wait let me think... maybe?",
    "nah that's sus",
    "yeah that sounds good",
    "okay okay i'm not sure but probably yes",
    "nah i'm too sleepy to answer properly",
    "yeah lowkey that's a good idea",
    "okay okay i think so",
    "nah that's not it",
    "yeah probably",
    "ok wait that's actually a maybe",
    "nah i don't think so",
    "yeah go ahead",
    "okay okay i'm feeling yes on this one",
    "nah that's a hard pass",
];

/// Stateless chance oracle: each consultation is an independent uniform
/// pick from the catalog. The question text is never inspected.
pub struct Oracle;

impl Oracle {
    pub fn consult() -> &'static str {
        ANSWERS[rand::rng().random_range(0..ANSWERS.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn consultation_comes_from_catalog() {
        for _ in 0..32 {
            assert!(ANSWERS.contains(&Oracle::consult()));
        }
    }
}
