use super::chat::Chat;
use super::chat::mention;
use super::command::Command;
use super::command::valid_date;
use super::error::RouterError;
use super::event::ChatMessage;
use super::event::Interaction;
use parlor_core::*;
use parlor_games::Duel;
use parlor_games::Oracle;
use parlor_games::Outcome;
use parlor_games::Sign;
use parlor_games::TriviaRound;
use parlor_games::TwentyOne;
use parlor_games::Verdict;
use parlor_records::RecordStore;
use parlor_responses::Mood;
use parlor_responses::quip;
use parlor_session::Registry;
use parlor_session::Session;
use std::sync::Arc;

const HELP: &str = "parlor commands:\n\n\
`/birthday-set` - set your birthday\n\
`/birthday-wish` - leave a birthday wish\n\
`/game-start` - play a hand of twenty-one\n\
`/hit` `/stand` - play your hand\n\
`/oracle` - ask the oracle a question\n\
`/trivia-start` - start sudden-death trivia\n\
`/trivia-answer` - answer the trivia question\n\
`/duel` - throw a sign (A, B, or C)\n\
`/vibes` - check vibe points\n\
`/checkin` - trigger a check-in (admin)\n\
`/blacklist` `/unblacklist` - manage the deny-list (admin)\n\n\
that's it! keep it simple 😊";

/// Card game state captured under the registry lock for presentation
/// after the lock is released.
struct CardView {
    player: Vec<u8>,
    player_total: u32,
    house: Vec<u8>,
    house_total: u32,
    outcome: Option<Outcome>,
}

impl CardView {
    fn of(game: &TwentyOne) -> Self {
        Self {
            player: game.player_hand().to_vec(),
            player_total: game.player_total(),
            house: game.house_hand().to_vec(),
            house_total: game.house_total(),
            outcome: game.outcome(),
        }
    }
}

/// Result of interpreting text as a trivia answer.
enum Attempt {
    NoSession,
    WrongGame(&'static str),
    Verdict(Verdict),
}

/// Dispatches inbound platform events to the game engines through the
/// session registry, applies reward-point side effects, and reports
/// every failure inline. Nothing thrown past this boundary.
pub struct Router {
    registry: Registry,
    store: Arc<dyn RecordStore>,
    chat: Arc<dyn Chat>,
}

impl Router {
    pub fn new(store: Arc<dyn RecordStore>, chat: Arc<dyn Chat>) -> Self {
        Self {
            registry: Registry::new(),
            store,
            chat,
        }
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Entry points. Both drop deny-listed users before any other processing
/// and never propagate an error.
impl Router {
    /// Handles a formal command invocation.
    pub async fn interaction(self: &Arc<Self>, event: Interaction) {
        match self.store.is_denied(event.user).await {
            Ok(false) => {}
            Ok(true) => {
                log::debug!("[router] dropping event from deny-listed user {}", event.user);
                return;
            }
            Err(e) => {
                log::error!("[router] deny-list lookup failed, dropping event: {}", e);
                return;
            }
        }
        log::debug!(
            "[router] {} from user {} in channel {}",
            event.command.name(),
            event.user,
            event.channel
        );
        let reply = match self.dispatch(&event).await {
            Ok(text) => Some(text),
            Err(error) => self.describe(error),
        };
        if let Some(ref text) = reply {
            if let Err(e) = self.chat.send(event.channel, text).await {
                log::warn!("[router] reply to channel {} failed: {}", event.channel, e);
            }
        }
    }
    /// Handles a free-form chat message: possibly a trivia answer,
    /// possibly worth an emoji, otherwise ignored.
    pub async fn message(self: &Arc<Self>, event: ChatMessage) {
        match self.store.is_denied(event.user).await {
            Ok(false) => {}
            Ok(true) => return,
            Err(e) => {
                log::error!("[router] deny-list lookup failed, dropping message: {}", e);
                return;
            }
        }
        let text = event.text.trim();
        if !text.is_empty() && !text.starts_with('/') && !text.starts_with('!') {
            match self.attempt(event.channel, event.user, text).await {
                Attempt::Verdict(Verdict::Correct) => {
                    if let Err(e) = self.store.add_points(event.user, AWARD_TRIVIA_WIN).await {
                        log::error!("[router] trivia award failed: {}", e);
                    }
                    let announce = format!("{} {}", mention(event.user), quip(Mood::Win));
                    if let Err(e) = self.chat.send(event.channel, &announce).await {
                        log::warn!("[router] winner announcement failed: {}", e);
                    }
                }
                Attempt::Verdict(Verdict::Incorrect) => {
                    if let Err(e) = self.chat.send(event.channel, quip(Mood::NotIt)).await {
                        log::warn!("[router] miss announcement failed: {}", e);
                    }
                }
                // closed rounds and unrelated chatter stay silent
                _ => {}
            }
        }
        if rand::random::<f64>() < REACTION_CHANCE {
            let _ = self
                .chat
                .react(event.channel, event.message, parlor_responses::emoji())
                .await
                .inspect_err(|e| log::debug!("[router] reaction failed: {}", e));
        }
    }
    /// Converts a handler failure into the inline reply, or None for
    /// silently-dropped paths.
    fn describe(&self, error: RouterError) -> Option<String> {
        match error {
            RouterError::Validation(hint) => Some(hint),
            RouterError::AdmissionConflict => {
                Some("okay okay there's already a game going 😔".to_string())
            }
            RouterError::NotFound(what) => Some(what),
            RouterError::PermissionDenied => {
                Some("okay okay only admins can do that 😔".to_string())
            }
            RouterError::Send(e) => {
                log::warn!("[router] send failed: {}", e);
                None
            }
            RouterError::Internal(e) => {
                log::error!("[router] handler failed: {}", e);
                Some(quip(Mood::Mistake).to_string())
            }
        }
    }
}

/// Command handlers. Each returns the inline reply text.
impl Router {
    async fn dispatch(self: &Arc<Self>, event: &Interaction) -> Result<String, RouterError> {
        if event.command.admin_gated() && !event.admin {
            return Err(RouterError::PermissionDenied);
        }
        match &event.command {
            Command::Help => Ok(HELP.to_string()),
            Command::BirthdaySet { date } => self.birthday_set(event, date).await,
            Command::BirthdayWish { user, message } => {
                self.store.add_wish(*user, event.user, message).await?;
                Ok("okay okay wish saved! 🎉".to_string())
            }
            Command::GameStart => self.start_cards(event).await,
            Command::Hit => self.hit(event).await,
            Command::Stand => self.stand(event).await,
            Command::Oracle { .. } => {
                self.store.add_points(event.user, AWARD_ORACLE).await?;
                Ok(Oracle::consult().to_string())
            }
            Command::TriviaStart => self.start_trivia(event).await,
            Command::TriviaAnswer { text } => self.answer(event, text).await,
            Command::Duel { choice } => self.duel(event, *choice).await,
            Command::Vibes { user } => {
                let target = user.unwrap_or(event.user);
                let points = self.store.points(target).await?;
                Ok(format!(
                    "{} has {} vibe points 😊",
                    mention(target),
                    points
                ))
            }
            Command::CheckIn => Ok(quip(Mood::CheckIn).to_string()),
            Command::Blacklist { user } => {
                self.store.deny(*user).await?;
                Ok(format!("okay okay {} is blacklisted", mention(*user)))
            }
            Command::Unblacklist { user } => {
                self.store.allow(*user).await?;
                Ok(format!("okay okay {} is unblacklisted", mention(*user)))
            }
        }
    }
    async fn birthday_set(&self, event: &Interaction, date: &str) -> Result<String, RouterError> {
        if !valid_date(date) {
            return Err(RouterError::Validation(
                "okay okay that's not a valid date 😔 try like 12/25".to_string(),
            ));
        }
        self.store.set_birthday(event.user, date).await?;
        Ok(format!("okay okay your birthday is set to {} 🎉", date))
    }
    async fn duel(&self, event: &Interaction, choice: Sign) -> Result<String, RouterError> {
        let (house, outcome) = Duel::throw(choice);
        let (delta, mood) = match outcome {
            Outcome::Win => (AWARD_DUEL_WIN, Mood::Win),
            Outcome::Loss => (AWARD_DUEL_LOSS, Mood::Loss),
            Outcome::Tie => (AWARD_DUEL_TIE, Mood::Tie),
        };
        if delta != 0 {
            self.store.add_points(event.user, delta).await?;
        }
        Ok(format!(
            "you chose: {}\ni chose: {}\n{}",
            choice,
            house,
            quip(mood)
        ))
    }
}

/// Card game handlers.
impl Router {
    async fn start_cards(&self, event: &Interaction) -> Result<String, RouterError> {
        let mut opening = None;
        let admitted = self
            .registry
            .admit(event.channel, || {
                let game = TwentyOne::default();
                opening = Some((
                    game.player_hand().to_vec(),
                    game.player_total(),
                    game.house_upcard(),
                ));
                Session::Cards(game)
            })
            .await;
        if !admitted {
            return Err(RouterError::AdmissionConflict);
        }
        let (hand, total, upcard) = opening.expect("admitted implies constructed");
        Ok(format!(
            "okay okay let's play twenty-one 🎮\n\
             your hand: {:?} (total: {})\n\
             house shows: {}\n\
             use /hit to draw or /stand to stop",
            hand, total, upcard
        ))
    }
    async fn hit(&self, event: &Interaction) -> Result<String, RouterError> {
        let moved = self
            .registry
            .with(event.channel, |s| match s.as_cards() {
                Some(game) => {
                    game.hit();
                    Ok(CardView::of(game))
                }
                None => Err(s.kind()),
            })
            .await;
        match self.card_view(moved)? {
            view @ CardView { outcome: None, .. } => Ok(format!(
                "you drew a card!\n\
                 your hand: {:?} (total: {})\n\
                 use /hit or /stand",
                view.player, view.player_total
            )),
            view => self.settle_cards(event, view).await,
        }
    }
    async fn stand(&self, event: &Interaction) -> Result<String, RouterError> {
        let moved = self
            .registry
            .with(event.channel, |s| match s.as_cards() {
                Some(game) => {
                    game.stand();
                    Ok(CardView::of(game))
                }
                None => Err(s.kind()),
            })
            .await;
        let view = self.card_view(moved)?;
        self.settle_cards(event, view).await
    }
    fn card_view(
        &self,
        moved: Option<Result<CardView, &'static str>>,
    ) -> Result<CardView, RouterError> {
        match moved {
            None => Err(RouterError::NotFound(
                "okay okay no game active 😔 start with /game-start".to_string(),
            )),
            Some(Err(kind)) => Err(RouterError::NotFound(format!(
                "okay okay that's {} not cards 😔",
                kind
            ))),
            Some(Ok(view)) => Ok(view),
        }
    }
    /// Removes the settled game, awards points, and reports totals.
    async fn settle_cards(
        &self,
        event: &Interaction,
        view: CardView,
    ) -> Result<String, RouterError> {
        let outcome = view.outcome.expect("settle_cards called on live game");
        // whoever removes the settled game owns the award and the report
        let removed = self
            .registry
            .remove_if(event.channel, |s| {
                matches!(s, Session::Cards(game) if game.is_settled())
            })
            .await;
        if removed.is_none() {
            return Err(RouterError::NotFound(
                "okay okay no game active 😔".to_string(),
            ));
        }
        let (delta, mood) = match outcome {
            Outcome::Win => (AWARD_CARDS_WIN, Mood::Win),
            Outcome::Loss => (AWARD_CARDS_LOSS, Mood::Loss),
            Outcome::Tie => (AWARD_CARDS_TIE, Mood::Tie),
        };
        self.store.add_points(event.user, delta).await?;
        Ok(format!(
            "game over!\n\
             your hand: {:?} (total: {})\n\
             house hand: {:?} (total: {})\n\
             {}",
            view.player,
            view.player_total,
            view.house,
            view.house_total,
            quip(mood)
        ))
    }
}

/// Trivia handlers.
impl Router {
    async fn start_trivia(self: &Arc<Self>, event: &Interaction) -> Result<String, RouterError> {
        let mut opened = None;
        let admitted = self
            .registry
            .admit(event.channel, || {
                let round = TriviaRound::default();
                opened = Some((round.token(), round.prompt()));
                Session::Trivia(round)
            })
            .await;
        if !admitted {
            return Err(RouterError::AdmissionConflict);
        }
        let (token, prompt) = opened.expect("admitted implies constructed");
        self.spawn_expiry(event.channel, token);
        Ok(format!(
            "okay okay sudden-death trivia 🎮\n\
             first correct answer wins!\n\n\
             {}\n\n\
             answer with the number or the answer itself!",
            prompt
        ))
    }
    async fn answer(&self, event: &Interaction, text: &str) -> Result<String, RouterError> {
        match self.attempt(event.channel, event.user, text).await {
            Attempt::NoSession => Err(RouterError::NotFound(
                "okay okay no trivia active 😔".to_string(),
            )),
            Attempt::WrongGame(kind) => Err(RouterError::NotFound(format!(
                "okay okay that's {} not trivia 😔",
                kind
            ))),
            Attempt::Verdict(Verdict::Correct) => {
                self.store.add_points(event.user, AWARD_TRIVIA_WIN).await?;
                Ok(format!("{} {}", mention(event.user), quip(Mood::Win)))
            }
            Attempt::Verdict(Verdict::Incorrect) => Ok(quip(Mood::NotIt).to_string()),
            Attempt::Verdict(Verdict::TooLate) => Ok(quip(Mood::TooLate).to_string()),
        }
    }
    /// Runs an answer attempt against the channel's open round. The
    /// check and close are one atomic step under the registry lock; the
    /// first correct submission also removes the session.
    async fn attempt(&self, channel: ID<Channel>, user: ID<User>, text: &str) -> Attempt {
        let result = self
            .registry
            .with(channel, |s| match s.as_trivia() {
                Some(round) => Ok((round.check_answer(text, user), round.token())),
                None => Err(s.kind()),
            })
            .await;
        match result {
            None => Attempt::NoSession,
            Some(Err(kind)) => Attempt::WrongGame(kind),
            Some(Ok((verdict, token))) => {
                if verdict == Verdict::Correct {
                    self.registry
                        .remove_if(channel, |s| s.trivia_token() == Some(token))
                        .await;
                }
                Attempt::Verdict(verdict)
            }
        }
    }
    /// Delayed expiry continuation for an announced round.
    fn spawn_expiry(self: &Arc<Self>, channel: ID<Channel>, token: ID<Round>) {
        let router = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(TRIVIA_TIMEOUT).await;
            router.expire(channel, token).await;
        });
    }
    /// Compare-and-remove keyed by round token: announces the timeout
    /// only if this exact, still-open round was present. A round that
    /// was answered, replaced, or already removed makes this a silent
    /// no-op.
    pub async fn expire(&self, channel: ID<Channel>, token: ID<Round>) {
        let removed = self
            .registry
            .remove_if(channel, |s| match s {
                Session::Trivia(round) => round.token() == token && !round.answered(),
                _ => false,
            })
            .await;
        if removed.is_some() {
            log::debug!("[router] trivia expired in channel {}", channel);
            if let Err(e) = self
                .chat
                .send(channel, "okay okay time's up! no one got it 😔")
                .await
            {
                log::warn!("[router] timeout announcement failed: {}", e);
            }
        }
    }
}
