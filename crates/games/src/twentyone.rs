use super::outcome::Outcome;
use super::pile::Pile;
use parlor_core::BUST_LINE;
use parlor_core::HOUSE_STAND;

/// Push-your-luck card game against a fixed-policy house.
///
/// Lifecycle: dealt with two cards per side, then any number of
/// [`hit`](Self::hit) calls, then [`stand`](Self::stand). Busting on a
/// hit settles immediately without the house drawing. Once settled the
/// engine is inert.
///
/// The house policy is fixed: draw while its total is below 17. There is
/// no draw cap beyond pile exhaustion, which triggers a reshuffle.
#[derive(Debug)]
pub struct TwentyOne {
    pile: Pile,
    player: Vec<u8>,
    house: Vec<u8>,
    settled: Option<Outcome>,
}

impl Default for TwentyOne {
    fn default() -> Self {
        Self::deal(Pile::fresh())
    }
}

impl TwentyOne {
    /// Deals two cards to each side from the given pile.
    ///
    /// Draw order is player, player, house, house, which scripted piles
    /// (see [`Pile::stacked`]) must account for.
    pub fn deal(mut pile: Pile) -> Self {
        let player = vec![pile.draw(), pile.draw()];
        let house = vec![pile.draw(), pile.draw()];
        Self {
            pile,
            player,
            house,
            settled: None,
        }
    }
    pub fn player_hand(&self) -> &[u8] {
        &self.player
    }
    pub fn player_total(&self) -> u32 {
        Self::total(&self.player)
    }
    pub fn house_hand(&self) -> &[u8] {
        &self.house
    }
    pub fn house_total(&self) -> u32 {
        Self::total(&self.house)
    }
    /// The one house card shown while the game is in play.
    pub fn house_upcard(&self) -> u8 {
        self.house[0]
    }
    pub fn outcome(&self) -> Option<Outcome> {
        self.settled
    }
    pub fn is_settled(&self) -> bool {
        self.settled.is_some()
    }
}

impl TwentyOne {
    /// Draws one card into the player hand.
    ///
    /// Returns the settlement if the draw busts the hand; otherwise the
    /// game stays in play and returns None. On a settled game this is a
    /// no-op returning the existing settlement.
    pub fn hit(&mut self) -> Option<Outcome> {
        if self.settled.is_some() {
            return self.settled;
        }
        self.player.push(self.pile.draw());
        log::debug!("[21] player drew, total {}", self.player_total());
        if self.player_total() > BUST_LINE {
            // house does not draw against a busted player
            self.settled = Some(Outcome::Loss);
        }
        self.settled
    }
    /// Stops drawing and runs the house policy, then settles.
    pub fn stand(&mut self) -> Outcome {
        if let Some(outcome) = self.settled {
            return outcome;
        }
        while self.house_total() < HOUSE_STAND {
            self.house.push(self.pile.draw());
            log::debug!("[21] house drew, total {}", self.house_total());
        }
        let outcome = Self::compare(self.player_total(), self.house_total());
        self.settled = Some(outcome);
        outcome
    }
    fn total(hand: &[u8]) -> u32 {
        hand.iter().map(|v| *v as u32).sum()
    }
    /// Settlement rule: player bust loses outright, house bust wins,
    /// otherwise strictly greater total wins, equal totals tie.
    fn compare(player: u32, house: u32) -> Outcome {
        if player > BUST_LINE {
            Outcome::Loss
        } else if house > BUST_LINE {
            Outcome::Win
        } else if player > house {
            Outcome::Win
        } else if house > player {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn deal_gives_two_cards_each() {
        let game = TwentyOne::default();
        assert_eq!(game.player_hand().len(), 2);
        assert_eq!(game.house_hand().len(), 2);
        assert!(!game.is_settled());
    }
    #[test]
    fn equal_totals_tie_on_stand() {
        // player 10+10 vs house 10+10, house stands at 20
        let mut game = TwentyOne::deal(Pile::stacked(vec![10, 10, 10, 10]));
        assert_eq!(game.stand(), Outcome::Tie);
        assert_eq!(game.outcome(), Some(Outcome::Tie));
    }
    #[test]
    fn bust_on_hit_loses_without_house_draw() {
        // player 10+10 then draws 5 and busts at 25
        let mut game = TwentyOne::deal(Pile::stacked(vec![5, 10, 10, 10, 10]));
        assert_eq!(game.hit(), Some(Outcome::Loss));
        assert_eq!(game.house_hand().len(), 2);
        assert_eq!(game.player_total(), 25);
    }
    #[test]
    fn house_draws_below_seventeen_and_busts() {
        // player 19, house 16 draws a 10 and busts at 26
        let mut game = TwentyOne::deal(Pile::stacked(vec![10, 6, 10, 9, 10]));
        assert_eq!(game.stand(), Outcome::Win);
        assert_eq!(game.house_total(), 26);
    }
    #[test]
    fn higher_total_wins() {
        // player 20 vs house 10+8, house at 18 stands
        let mut game = TwentyOne::deal(Pile::stacked(vec![8, 10, 10, 10]));
        assert_eq!(game.stand(), Outcome::Win);
    }
    #[test]
    fn settled_game_is_inert() {
        let mut game = TwentyOne::deal(Pile::stacked(vec![5, 10, 10, 10, 10]));
        game.hit();
        let hand = game.player_hand().len();
        assert_eq!(game.hit(), Some(Outcome::Loss));
        assert_eq!(game.stand(), Outcome::Loss);
        assert_eq!(game.player_hand().len(), hand);
    }
}
