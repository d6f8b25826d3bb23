use super::store::RecordStore;
use super::store::Wish;
use async_trait::async_trait;
use parlor_core::ID;
use parlor_core::Points;
use parlor_core::User;
use std::collections::HashMap;
use std::collections::HashSet;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Birthday {
    date: Option<String>,
    wishes: Vec<Wish>,
}

#[derive(Debug, Default)]
struct Tables {
    points: HashMap<u64, Points>,
    birthdays: HashMap<u64, Birthday>,
    denied: HashSet<u64>,
}

/// In-process record store for tests and standalone runs.
/// One lock around all tables; every operation is a single atomic step.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn points(&self, user: ID<User>) -> anyhow::Result<Points> {
        Ok(self
            .tables
            .read()
            .await
            .points
            .get(&user.inner())
            .copied()
            .unwrap_or(0))
    }
    async fn add_points(&self, user: ID<User>, delta: Points) -> anyhow::Result<()> {
        *self
            .tables
            .write()
            .await
            .points
            .entry(user.inner())
            .or_insert(0) += delta;
        Ok(())
    }
    async fn set_birthday(&self, user: ID<User>, date: &str) -> anyhow::Result<()> {
        self.tables.write().await.birthdays.insert(
            user.inner(),
            Birthday {
                date: Some(date.to_string()),
                wishes: Vec::new(),
            },
        );
        Ok(())
    }
    async fn birthday(&self, user: ID<User>) -> anyhow::Result<Option<String>> {
        Ok(self
            .tables
            .read()
            .await
            .birthdays
            .get(&user.inner())
            .and_then(|b| b.date.clone()))
    }
    async fn add_wish(&self, user: ID<User>, wisher: ID<User>, text: &str) -> anyhow::Result<()> {
        self.tables
            .write()
            .await
            .birthdays
            .entry(user.inner())
            .or_default()
            .wishes
            .push(Wish::new(wisher, text));
        Ok(())
    }
    async fn wishes(&self, user: ID<User>) -> anyhow::Result<Vec<Wish>> {
        Ok(self
            .tables
            .read()
            .await
            .birthdays
            .get(&user.inner())
            .map(|b| b.wishes.clone())
            .unwrap_or_default())
    }
    async fn birthdays_on(&self, keys: &[String]) -> anyhow::Result<Vec<ID<User>>> {
        Ok(self
            .tables
            .read()
            .await
            .birthdays
            .iter()
            .filter(|(_, b)| b.date.as_ref().map(|d| keys.contains(d)).unwrap_or(false))
            .map(|(user, _)| ID::from(*user))
            .collect())
    }
    async fn is_denied(&self, user: ID<User>) -> anyhow::Result<bool> {
        Ok(self.tables.read().await.denied.contains(&user.inner()))
    }
    async fn deny(&self, user: ID<User>) -> anyhow::Result<()> {
        self.tables.write().await.denied.insert(user.inner());
        Ok(())
    }
    async fn allow(&self, user: ID<User>) -> anyhow::Result<()> {
        self.tables.write().await.denied.remove(&user.inner());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn user(n: u64) -> ID<User> {
        ID::from(n)
    }
    #[tokio::test]
    async fn balance_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.points(user(1)).await.unwrap(), 0);
    }
    #[tokio::test]
    async fn awards_accumulate() {
        let store = MemoryStore::new();
        store.add_points(user(1), 5).await.unwrap();
        assert_eq!(store.points(user(1)).await.unwrap(), 5);
        store.add_points(user(1), 5).await.unwrap();
        assert_eq!(store.points(user(1)).await.unwrap(), 10);
    }
    #[tokio::test]
    async fn setting_birthday_resets_wishes() {
        let store = MemoryStore::new();
        store.set_birthday(user(1), "3/5").await.unwrap();
        store.add_wish(user(1), user(2), "have a good one").await.unwrap();
        assert_eq!(store.wishes(user(1)).await.unwrap().len(), 1);
        store.set_birthday(user(1), "3/6").await.unwrap();
        assert!(store.wishes(user(1)).await.unwrap().is_empty());
    }
    #[tokio::test]
    async fn wishes_keep_append_order() {
        let store = MemoryStore::new();
        store.add_wish(user(1), user(2), "first").await.unwrap();
        store.add_wish(user(1), user(3), "second").await.unwrap();
        let wishes = store.wishes(user(1)).await.unwrap();
        assert_eq!(wishes[0].text, "first");
        assert_eq!(wishes[1].text, "second");
    }
    #[tokio::test]
    async fn lookup_matches_either_encoding() {
        let store = MemoryStore::new();
        store.set_birthday(user(1), "3/5").await.unwrap();
        store.set_birthday(user(2), "03/05").await.unwrap();
        let keys = vec!["3/5".to_string(), "03/05".to_string()];
        let mut found = store.birthdays_on(&keys).await.unwrap();
        found.sort();
        assert_eq!(found, vec![user(1), user(2)]);
    }
    #[tokio::test]
    async fn deny_list_round_trip() {
        let store = MemoryStore::new();
        assert!(!store.is_denied(user(1)).await.unwrap());
        store.deny(user(1)).await.unwrap();
        assert!(store.is_denied(user(1)).await.unwrap());
        store.allow(user(1)).await.unwrap();
        assert!(!store.is_denied(user(1)).await.unwrap());
    }
}
