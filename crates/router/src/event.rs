use super::command::Command;
use parlor_core::Channel;
use parlor_core::ID;
use parlor_core::Message;
use parlor_core::User;

/// A formal command invocation delivered by the platform.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub user: ID<User>,
    pub channel: ID<Channel>,
    /// Caller holds elevated permission in this community.
    pub admin: bool,
    pub command: Command,
}

/// A free-form chat message. Not a command; may still be interpreted as
/// a trivia answer if the channel has an open round.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub user: ID<User>,
    pub channel: ID<Channel>,
    pub message: ID<Message>,
    pub text: String,
}
