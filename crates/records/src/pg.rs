use super::store::RecordStore;
use super::store::Wish;
use async_trait::async_trait;
use parlor_core::ID;
use parlor_core::Points;
use parlor_core::User;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::NoTls;

const POINTS: &str = "parlor_points";
const BIRTHDAYS: &str = "parlor_birthdays";
const DENYLIST: &str = "parlor_denylist";

/// tokio-postgres record store.
///
/// Identifiers are stored as BIGINT (bit-cast from u64); wish lists live
/// in a JSONB column and are appended server-side so concurrent wishers
/// never clobber each other.
pub struct PgStore {
    client: Arc<Client>,
}

impl PgStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
    /// Connects using DATABASE_URL and spawns the connection task.
    pub async fn connect() -> anyhow::Result<Self> {
        let url = std::env::var("DATABASE_URL")?;
        let (client, connection) = tokio_postgres::connect(&url, NoTls).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("[records] connection error: {}", e);
            }
        });
        Ok(Self::new(Arc::new(client)))
    }
    /// Creates the three tables if absent.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        self.client
            .batch_execute(const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                POINTS,
                " (
                    user_id  BIGINT PRIMARY KEY,
                    points   BIGINT NOT NULL DEFAULT 0
                );
                CREATE TABLE IF NOT EXISTS ",
                BIRTHDAYS,
                " (
                    user_id  BIGINT PRIMARY KEY,
                    birthday TEXT,
                    wishes   JSONB NOT NULL DEFAULT '[]'::jsonb
                );
                CREATE TABLE IF NOT EXISTS ",
                DENYLIST,
                " (
                    user_id  BIGINT PRIMARY KEY
                );"
            ))
            .await?;
        Ok(())
    }
    fn key(user: ID<User>) -> i64 {
        user.inner() as i64
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn points(&self, user: ID<User>) -> anyhow::Result<Points> {
        self.client
            .query_opt(
                const_format::concatcp!("SELECT points FROM ", POINTS, " WHERE user_id = $1"),
                &[&Self::key(user)],
            )
            .await
            .map(|opt| opt.map(|row| row.get::<_, i64>(0)).unwrap_or(0))
            .map_err(Into::into)
    }
    async fn add_points(&self, user: ID<User>, delta: Points) -> anyhow::Result<()> {
        self.client
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    POINTS,
                    " (user_id, points) VALUES ($1, $2)
                     ON CONFLICT (user_id)
                     DO UPDATE SET points = ",
                    POINTS,
                    ".points + EXCLUDED.points"
                ),
                &[&Self::key(user), &delta],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
    async fn set_birthday(&self, user: ID<User>, date: &str) -> anyhow::Result<()> {
        self.client
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    BIRTHDAYS,
                    " (user_id, birthday, wishes) VALUES ($1, $2, '[]'::jsonb)
                     ON CONFLICT (user_id)
                     DO UPDATE SET birthday = EXCLUDED.birthday, wishes = '[]'::jsonb"
                ),
                &[&Self::key(user), &date],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
    async fn birthday(&self, user: ID<User>) -> anyhow::Result<Option<String>> {
        self.client
            .query_opt(
                const_format::concatcp!("SELECT birthday FROM ", BIRTHDAYS, " WHERE user_id = $1"),
                &[&Self::key(user)],
            )
            .await
            .map(|opt| opt.and_then(|row| row.get::<_, Option<String>>(0)))
            .map_err(Into::into)
    }
    async fn add_wish(&self, user: ID<User>, wisher: ID<User>, text: &str) -> anyhow::Result<()> {
        let wish = serde_json::to_value(Wish::new(wisher, text))?;
        self.client
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    BIRTHDAYS,
                    " (user_id, birthday, wishes) VALUES ($1, NULL, jsonb_build_array($2::jsonb))
                     ON CONFLICT (user_id)
                     DO UPDATE SET wishes = ",
                    BIRTHDAYS,
                    ".wishes || $2::jsonb"
                ),
                &[&Self::key(user), &wish],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
    async fn wishes(&self, user: ID<User>) -> anyhow::Result<Vec<Wish>> {
        match self
            .client
            .query_opt(
                const_format::concatcp!("SELECT wishes FROM ", BIRTHDAYS, " WHERE user_id = $1"),
                &[&Self::key(user)],
            )
            .await?
        {
            Some(row) => Ok(serde_json::from_value(row.get::<_, serde_json::Value>(0))?),
            None => Ok(Vec::new()),
        }
    }
    async fn birthdays_on(&self, keys: &[String]) -> anyhow::Result<Vec<ID<User>>> {
        self.client
            .query(
                const_format::concatcp!(
                    "SELECT user_id FROM ",
                    BIRTHDAYS,
                    " WHERE birthday = ANY($1)"
                ),
                &[&keys],
            )
            .await
            .map(|rows| {
                rows.iter()
                    .map(|row| ID::from(row.get::<_, i64>(0) as u64))
                    .collect()
            })
            .map_err(Into::into)
    }
    async fn is_denied(&self, user: ID<User>) -> anyhow::Result<bool> {
        self.client
            .query_opt(
                const_format::concatcp!("SELECT 1 FROM ", DENYLIST, " WHERE user_id = $1"),
                &[&Self::key(user)],
            )
            .await
            .map(|opt| opt.is_some())
            .map_err(Into::into)
    }
    async fn deny(&self, user: ID<User>) -> anyhow::Result<()> {
        self.client
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    DENYLIST,
                    " (user_id) VALUES ($1) ON CONFLICT DO NOTHING"
                ),
                &[&Self::key(user)],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
    async fn allow(&self, user: ID<User>) -> anyhow::Result<()> {
        self.client
            .execute(
                const_format::concatcp!("DELETE FROM ", DENYLIST, " WHERE user_id = $1"),
                &[&Self::key(user)],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}
