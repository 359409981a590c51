//! Process-local session store

use async_trait::async_trait;
use dashmap::DashMap;

use rollcall_core::entities::Session;
use rollcall_core::traits::{RepoResult, SessionStore};
use rollcall_core::value_objects::Snowflake;

/// Sessions keyed by token. Expired entries are dropped when read.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session: &Session) -> RepoResult<()> {
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> RepoResult<Option<Session>> {
        let session = self.sessions.get(token).map(|entry| entry.value().clone());
        match session {
            Some(s) if s.is_expired() => {
                self.sessions.remove(token);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn revoke(&self, token: &str) -> RepoResult<()> {
        self.sessions.remove(token);
        Ok(())
    }

    async fn revoke_all(&self, account_id: Snowflake) -> RepoResult<u64> {
        let mut removed = 0u64;
        self.sessions.retain(|_, s| {
            let keep = s.account_id != account_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}
