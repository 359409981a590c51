//! Login sessions in Redis.
//!
//! Each session lives under `session:{token}` with a TTL matching its expiry.
//! A per-account set `account_sessions:{id}` tracks the tokens so that
//! deactivating an account can revoke all of them.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::instrument;

use rollcall_core::entities::Session;
use rollcall_core::traits::{RepoResult, SessionStore};
use rollcall_core::value_objects::Snowflake;

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for sessions
const SESSION_PREFIX: &str = "session:";

/// Key prefix for the per-account token index
const ACCOUNT_SESSIONS_PREFIX: &str = "account_sessions:";

/// Redis implementation of SessionStore
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
    /// Lifetime of the per-account index; matches the session TTL
    index_ttl_seconds: i64,
}

impl RedisSessionStore {
    #[must_use]
    pub fn new(pool: RedisPool, ttl_seconds: i64) -> Self {
        Self {
            pool,
            index_ttl_seconds: ttl_seconds,
        }
    }

    fn key(token: &str) -> String {
        format!("{SESSION_PREFIX}{token}")
    }

    fn index_key(account_id: Snowflake) -> String {
        format!("{ACCOUNT_SESSIONS_PREFIX}{account_id}")
    }

    async fn store(&self, session: &Session) -> RedisResult<()> {
        let ttl = session.remaining_seconds();
        if ttl == 0 {
            return Ok(());
        }
        self.pool.set_json(&Self::key(&session.token), session, ttl).await?;

        let index = Self::index_key(session.account_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&index, &session.token).await?;
        conn.expire::<_, ()>(&index, self.index_ttl_seconds).await?;
        Ok(())
    }

    async fn remove(&self, token: &str) -> RedisResult<()> {
        if let Some(session) = self.pool.get_json::<Session>(&Self::key(token)).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::index_key(session.account_id), token)
                .await?;
        }
        self.pool.delete_many(&[Self::key(token)]).await?;
        Ok(())
    }

    async fn remove_all(&self, account_id: Snowflake) -> RedisResult<u64> {
        let index = Self::index_key(account_id);
        let mut conn = self.pool.get().await?;
        let tokens: Vec<String> = conn.smembers(&index).await?;

        let keys: Vec<String> = tokens.iter().map(|t| Self::key(t)).collect();
        let removed = self.pool.delete_many(&keys).await?;
        conn.del::<_, ()>(&index).await?;
        Ok(removed)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    async fn put(&self, session: &Session) -> RepoResult<()> {
        self.store(session).await?;
        tracing::debug!("Stored session");
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get(&self, token: &str) -> RepoResult<Option<Session>> {
        let session: Option<Session> = self.pool.get_json(&Self::key(token)).await?;
        Ok(session.filter(|s| !s.is_expired()))
    }

    #[instrument(skip(self, token))]
    async fn revoke(&self, token: &str) -> RepoResult<()> {
        self.remove(token).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_all(&self, account_id: Snowflake) -> RepoResult<u64> {
        let count = self.remove_all(account_id).await?;
        tracing::info!(count, "Revoked all sessions for account");
        Ok(count)
    }
}
