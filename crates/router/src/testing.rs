use super::chat::Chat;
use super::chat::ChannelInfo;
use super::chat::CommunityInfo;
use super::chat::SendError;
use async_trait::async_trait;
use parlor_core::Channel;
use parlor_core::ID;
use parlor_core::Message;
use tokio::sync::Mutex;

/// Chat double: records every delivery, optionally refuses some
/// channels to exercise the best-effort paths.
pub struct TestChat {
    sends: Mutex<Vec<(ID<Channel>, String)>>,
    reactions: Mutex<Vec<(ID<Channel>, ID<Message>, String)>>,
    communities: Vec<CommunityInfo>,
    broken: Vec<ID<Channel>>,
}

impl TestChat {
    pub fn new() -> Self {
        Self {
            sends: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
            communities: Vec::new(),
            broken: Vec::new(),
        }
    }
    pub fn with_communities(communities: Vec<CommunityInfo>) -> Self {
        Self {
            communities,
            ..Self::new()
        }
    }
    /// Marks a channel as refusing all deliveries.
    pub fn breaking(mut self, channel: ID<Channel>) -> Self {
        self.broken.push(channel);
        self
    }
    pub async fn sent(&self) -> Vec<(ID<Channel>, String)> {
        self.sends.lock().await.clone()
    }
    pub async fn reacted(&self) -> Vec<(ID<Channel>, ID<Message>, String)> {
        self.reactions.lock().await.clone()
    }
}

/// Shorthand for a community of sendable channels.
pub fn community(id: u64, channels: &[(u64, bool)], members: &[u64]) -> CommunityInfo {
    CommunityInfo {
        id: ID::from(id),
        channels: channels
            .iter()
            .map(|(id, sendable)| ChannelInfo {
                id: ID::from(*id),
                sendable: *sendable,
            })
            .collect(),
        members: members.iter().map(|m| ID::from(*m)).collect(),
    }
}

#[async_trait]
impl Chat for TestChat {
    async fn send(&self, channel: ID<Channel>, text: &str) -> Result<(), SendError> {
        if self.broken.contains(&channel) {
            return Err(SendError("broken test channel".to_string()));
        }
        self.sends.lock().await.push((channel, text.to_string()));
        Ok(())
    }
    async fn react(
        &self,
        channel: ID<Channel>,
        message: ID<Message>,
        emoji: &str,
    ) -> Result<(), SendError> {
        if self.broken.contains(&channel) {
            return Err(SendError("broken test channel".to_string()));
        }
        self.reactions
            .lock()
            .await
            .push((channel, message, emoji.to_string()));
        Ok(())
    }
    async fn communities(&self) -> Vec<CommunityInfo> {
        self.communities.clone()
    }
}
