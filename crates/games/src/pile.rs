use parlor_core::PILE_COPIES;
use parlor_core::PILE_VALUES;
use rand::seq::SliceRandom;

/// An ordered draw pile of card values 1..=10, consumed back-to-front.
///
/// When the pile runs dry it is transparently replaced with a fresh
/// shuffled pile, so card counting across reshuffles is meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile(Vec<u8>);

impl Default for Pile {
    fn default() -> Self {
        Self::fresh()
    }
}

impl Pile {
    /// Creates a full shuffled pile: four copies of each value 1..=10.
    pub fn fresh() -> Self {
        let mut cards = (1..=PILE_VALUES)
            .flat_map(|v| std::iter::repeat_n(v, PILE_COPIES))
            .collect::<Vec<_>>();
        cards.shuffle(&mut rand::rng());
        Self(cards)
    }
    /// Creates a pile that deals the given values back-to-front.
    ///
    /// Unlike [`fresh`](Self::fresh) this performs no shuffle, so game
    /// setups can be scripted deterministically.
    pub fn stacked(cards: Vec<u8>) -> Self {
        Self(cards)
    }
    /// Draws the next card, reshuffling a full fresh pile if exhausted.
    pub fn draw(&mut self) -> u8 {
        if self.0.is_empty() {
            log::debug!("[pile] exhausted, reshuffling");
            *self = Self::fresh();
        }
        self.0.pop().expect("fresh pile is non-empty")
    }
    /// Number of cards left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn fresh_pile_has_forty_cards() {
        let pile = Pile::fresh();
        assert_eq!(pile.remaining(), 40);
    }
    #[test]
    fn stacked_pile_draws_back_to_front() {
        let mut pile = Pile::stacked(vec![1, 2, 3]);
        assert_eq!(pile.draw(), 3);
        assert_eq!(pile.draw(), 2);
        assert_eq!(pile.draw(), 1);
    }
    #[test]
    fn exhausted_pile_reshuffles() {
        let mut pile = Pile::stacked(vec![5]);
        assert_eq!(pile.draw(), 5);
        let card = pile.draw();
        assert!((1..=10).contains(&card));
        assert_eq!(pile.remaining(), 39);
    }
}
