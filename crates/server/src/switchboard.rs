use super::dto::CommunityDto;
use super::dto::Frame;
use async_trait::async_trait;
use parlor_core::Channel;
use parlor_core::ID;
use parlor_core::Message;
use parlor_router::Chat;
use parlor_router::CommunityInfo;
use parlor_router::SendError;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

type Tx = UnboundedSender<String>;

/// Outbound half of the gateway: per-channel WebSocket subscriber lists
/// plus the community roster the scheduler walks.
///
/// Delivery is fan-out over unbounded senders; a channel with no live
/// subscriber is treated as unsendable.
pub struct Switchboard {
    roster: RwLock<Vec<CommunityInfo>>,
    taps: RwLock<HashMap<ID<Channel>, Vec<Tx>>>,
}

impl Switchboard {
    pub fn new(roster: Vec<CommunityInfo>) -> Self {
        Self {
            roster: RwLock::new(roster),
            taps: RwLock::new(HashMap::new()),
        }
    }
    /// Reads the community roster from the `PARLOR_ROSTER` JSON env var.
    /// An absent var means an empty roster; malformed JSON is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let roster = match std::env::var("PARLOR_ROSTER") {
            Err(_) => {
                log::warn!("[switchboard] PARLOR_ROSTER unset, starting with empty roster");
                Vec::new()
            }
            Ok(json) => serde_json::from_str::<Vec<CommunityDto>>(&json)?
                .into_iter()
                .map(CommunityInfo::from)
                .collect(),
        };
        Ok(Self::new(roster))
    }
    /// Subscribes a new WebSocket to a channel's outbound traffic.
    pub async fn attach(&self, channel: ID<Channel>) -> UnboundedReceiver<String> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        self.taps.write().await.entry(channel).or_default().push(tx);
        log::debug!("[switchboard] subscriber attached to channel {}", channel);
        rx
    }
    /// Pushes one frame to every live subscriber of a channel, pruning
    /// the dead ones. Errors when nobody is left listening.
    async fn push(&self, channel: ID<Channel>, frame: Frame) -> Result<(), SendError> {
        let json = frame.to_json();
        let mut taps = self.taps.write().await;
        let Some(subscribers) = taps.get_mut(&channel) else {
            return Err(SendError(format!("no subscriber on channel {}", channel)));
        };
        subscribers.retain(|tx| tx.send(json.clone()).is_ok());
        if subscribers.is_empty() {
            taps.remove(&channel);
            Err(SendError(format!("no subscriber on channel {}", channel)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Chat for Switchboard {
    async fn send(&self, channel: ID<Channel>, text: &str) -> Result<(), SendError> {
        self.push(
            channel,
            Frame::Say {
                text: text.to_string(),
            },
        )
        .await
    }
    async fn react(
        &self,
        channel: ID<Channel>,
        message: ID<Message>,
        emoji: &str,
    ) -> Result<(), SendError> {
        self.push(
            channel,
            Frame::React {
                message: message.inner(),
                emoji: emoji.to_string(),
            },
        )
        .await
    }
    async fn communities(&self) -> Vec<CommunityInfo> {
        // Sendability is recomputed from live taps so scheduled jobs
        // target channels that actually have a listener.
        let taps = self.taps.read().await;
        self.roster
            .read()
            .await
            .iter()
            .map(|community| {
                let mut community = community.clone();
                for channel in community.channels.iter_mut() {
                    channel.sendable = taps
                        .get(&channel.id)
                        .is_some_and(|subs| subs.iter().any(|tx| !tx.is_closed()));
                }
                community
            })
            .collect()
    }
}
