use super::chat::Chat;
use super::chat::mention;
use chrono::Datelike;
use parlor_core::CHECKIN_WEEKDAY;
use parlor_core::SCHEDULER_TICK;
use parlor_core::SEND_SPACING;
use parlor_records::RecordStore;
use parlor_responses::Mood;
use parlor_responses::quip;
use std::sync::Arc;

/// Two independent daily jobs: the weekly social check-in and the
/// birthday sweep. Each firing is idempotent; a firing missed while the
/// process was down is simply lost, never backfilled.
pub struct Scheduler {
    store: Arc<dyn RecordStore>,
    chat: Arc<dyn Chat>,
}

impl Scheduler {
    pub fn new(store: Arc<dyn RecordStore>, chat: Arc<dyn Chat>) -> Self {
        Self { store, chat }
    }
    /// Daily tick loop. Never returns.
    pub async fn run(self) {
        let mut tick = tokio::time::interval(SCHEDULER_TICK);
        loop {
            tick.tick().await;
            let today = chrono::Local::now();
            log::debug!("[scheduler] daily tick on {}", today.format("%Y-%m-%d"));
            if today.weekday().num_days_from_monday() == CHECKIN_WEEKDAY as u32 {
                self.check_in().await;
            }
            self.sweep_birthdays(today.month(), today.day()).await;
        }
    }
    /// Sends one social prompt per community, to the first channel the
    /// bot may send to, then stops scanning that community. Failed sends
    /// are not retried on other channels.
    pub async fn check_in(&self) {
        for community in self.chat.communities().await {
            let Some(channel) = community.first_sendable() else {
                log::debug!("[scheduler] community {} has no sendable channel", community.id);
                continue;
            };
            if let Err(e) = self.chat.send(channel, quip(Mood::CheckIn)).await {
                log::warn!("[scheduler] check-in to channel {} failed: {}", channel, e);
            }
            tokio::time::sleep(SEND_SPACING).await;
        }
    }
    /// Announces every birthday stored under today's month/day, in
    /// either textual encoding, to the first community containing the
    /// celebrant.
    pub async fn sweep_birthdays(&self, month: u32, day: u32) {
        let mut keys = vec![
            format!("{}/{}", month, day),
            format!("{:02}/{:02}", month, day),
        ];
        keys.dedup();
        let celebrants = match self.store.birthdays_on(&keys).await {
            Ok(celebrants) => celebrants,
            Err(e) => {
                log::error!("[scheduler] birthday lookup failed: {}", e);
                return;
            }
        };
        for user in celebrants {
            let wishes = self.store.wishes(user).await.unwrap_or_default();
            for community in self.chat.communities().await {
                if !community.has_member(user) {
                    continue;
                }
                if let Some(channel) = community.first_sendable() {
                    let mut text = parlor_responses::birthday(&mention(user));
                    if !wishes.is_empty() {
                        let list = wishes
                            .iter()
                            .map(|w| format!("- {}", w.text))
                            .collect::<Vec<_>>()
                            .join("\n");
                        text = format!("{}\n\nwishes:\n{}", text, list);
                    }
                    if let Err(e) = self.chat.send(channel, &text).await {
                        log::warn!(
                            "[scheduler] birthday announcement to channel {} failed: {}",
                            channel,
                            e
                        );
                    }
                    tokio::time::sleep(SEND_SPACING).await;
                }
                // first community containing the member only
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestChat;
    use crate::testing::community;
    use parlor_core::ID;
    use parlor_records::MemoryStore;

    fn scheduler(chat: TestChat) -> (Scheduler, Arc<MemoryStore>, Arc<TestChat>) {
        let store = Arc::new(MemoryStore::new());
        let chat = Arc::new(chat);
        (
            Scheduler::new(store.clone(), chat.clone()),
            store,
            chat,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn check_in_hits_first_sendable_channel_only() {
        let chat = TestChat::with_communities(vec![
            community(1, &[(10, false), (11, true), (12, true)], &[]),
            community(2, &[(20, true)], &[]),
        ]);
        let (scheduler, _, chat) = scheduler(chat);
        scheduler.check_in().await;
        let sends = chat.sent().await;
        assert_eq!(sends.len(), 2);
        assert_eq!(sends[0].0, ID::from(11u64));
        assert_eq!(sends[1].0, ID::from(20u64));
    }
    #[tokio::test(start_paused = true)]
    async fn check_in_skips_unsendable_communities() {
        let chat = TestChat::with_communities(vec![community(1, &[(10, false)], &[])]);
        let (scheduler, _, chat) = scheduler(chat);
        scheduler.check_in().await;
        assert!(chat.sent().await.is_empty());
    }
    #[tokio::test(start_paused = true)]
    async fn failed_check_in_is_not_retried_elsewhere() {
        let chat = TestChat::with_communities(vec![community(
            1,
            &[(10, true), (11, true)],
            &[],
        )])
        .breaking(ID::from(10u64));
        let (scheduler, _, chat) = scheduler(chat);
        scheduler.check_in().await;
        assert!(chat.sent().await.is_empty());
    }
    #[tokio::test(start_paused = true)]
    async fn sweep_matches_either_encoding() {
        let chat = TestChat::with_communities(vec![community(1, &[(10, true)], &[5, 6])]);
        let (scheduler, store, chat) = scheduler(chat);
        store.set_birthday(ID::from(5u64), "3/5").await.unwrap();
        store.set_birthday(ID::from(6u64), "03/05").await.unwrap();
        scheduler.sweep_birthdays(3, 5).await;
        assert_eq!(chat.sent().await.len(), 2);
    }
    #[tokio::test(start_paused = true)]
    async fn sweep_announces_wishes_in_order() {
        let chat = TestChat::with_communities(vec![community(1, &[(10, true)], &[5])]);
        let (scheduler, store, chat) = scheduler(chat);
        store.set_birthday(ID::from(5u64), "12/25").await.unwrap();
        store
            .add_wish(ID::from(5u64), ID::from(6u64), "happy day")
            .await
            .unwrap();
        store
            .add_wish(ID::from(5u64), ID::from(7u64), "cake time")
            .await
            .unwrap();
        scheduler.sweep_birthdays(12, 25).await;
        let sends = chat.sent().await;
        assert_eq!(sends.len(), 1);
        let text = &sends[0].1;
        assert!(text.contains(&mention(ID::from(5u64))));
        assert!(text.find("happy day").unwrap() < text.find("cake time").unwrap());
    }
    #[tokio::test(start_paused = true)]
    async fn sweep_stops_at_first_community_with_member() {
        let chat = TestChat::with_communities(vec![
            community(1, &[(10, true)], &[5]),
            community(2, &[(20, true)], &[5]),
        ]);
        let (scheduler, store, chat) = scheduler(chat);
        store.set_birthday(ID::from(5u64), "1/1").await.unwrap();
        scheduler.sweep_birthdays(1, 1).await;
        let sends = chat.sent().await;
        assert_eq!(sends.len(), 1);
        assert_eq!(sends[0].0, ID::from(10u64));
    }
    #[tokio::test(start_paused = true)]
    async fn sweep_ignores_other_dates() {
        let chat = TestChat::with_communities(vec![community(1, &[(10, true)], &[5])]);
        let (scheduler, store, chat) = scheduler(chat);
        store.set_birthday(ID::from(5u64), "3/5").await.unwrap();
        scheduler.sweep_birthdays(3, 6).await;
        assert!(chat.sent().await.is_empty());
    }
}
