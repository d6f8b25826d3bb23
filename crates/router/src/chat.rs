use async_trait::async_trait;
use parlor_core::Channel;
use parlor_core::Community;
use parlor_core::ID;
use parlor_core::Message;
use parlor_core::User;

/// Failed delivery to the platform. Best-effort paths swallow this;
/// nothing retries.
#[derive(Debug, Clone)]
pub struct SendError(pub String);

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "send failed: {}", self.0)
    }
}

impl std::error::Error for SendError {}

/// A channel the bot can see within a community.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub id: ID<Channel>,
    /// Whether the bot has send permission here.
    pub sendable: bool,
}

/// A served community: ordered channels plus the member roster.
#[derive(Debug, Clone)]
pub struct CommunityInfo {
    pub id: ID<Community>,
    pub channels: Vec<ChannelInfo>,
    pub members: Vec<ID<User>>,
}

impl CommunityInfo {
    /// First channel the bot may send to, in platform order.
    pub fn first_sendable(&self) -> Option<ID<Channel>> {
        self.channels.iter().find(|c| c.sendable).map(|c| c.id)
    }
    pub fn has_member(&self, user: ID<User>) -> bool {
        self.members.contains(&user)
    }
}

/// Outbound half of the platform: deliver text, add reactions, and
/// enumerate the served communities for the scheduler.
#[async_trait]
pub trait Chat: Send + Sync {
    async fn send(&self, channel: ID<Channel>, text: &str) -> Result<(), SendError>;
    async fn react(
        &self,
        channel: ID<Channel>,
        message: ID<Message>,
        emoji: &str,
    ) -> Result<(), SendError>;
    async fn communities(&self) -> Vec<CommunityInfo>;
}

/// Platform mention syntax for a user.
pub fn mention(user: ID<User>) -> String {
    format!("<@{}>", user)
}
