//! In-memory AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use rollcall_core::entities::Account;
use rollcall_core::error::DomainError;
use rollcall_core::traits::{AccountRepository, RepoResult};
use rollcall_core::value_objects::Snowflake;

struct StoredAccount {
    account: Account,
    password_hash: String,
}

#[derive(Default)]
pub struct MemoryAccountRepository {
    rows: RwLock<HashMap<Snowflake, StoredAccount>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, pred: impl Fn(&Account) -> bool) -> Option<Account> {
        self.rows
            .read()
            .values()
            .map(|row| &row.account)
            .find(|a| pred(a))
            .cloned()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Account>> {
        Ok(self.rows.read().get(&id).map(|row| row.account.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        Ok(self.find(|a| a.username == username))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        Ok(self.find(|a| a.email.eq_ignore_ascii_case(email)))
    }

    async fn list(&self) -> RepoResult<Vec<Account>> {
        let mut accounts: Vec<Account> =
            self.rows.read().values().map(|row| row.account.clone()).collect();
        accounts.sort_by_key(|a| (a.created_at, a.id));
        Ok(accounts)
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.find(|a| a.username == username).is_some())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find(|a| a.email.eq_ignore_ascii_case(email)).is_some())
    }

    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.write();
        for row in rows.values() {
            if row.account.username == account.username {
                return Err(DomainError::DuplicateIdentity("username"));
            }
            if row.account.email.eq_ignore_ascii_case(&account.email) {
                return Err(DomainError::DuplicateIdentity("email"));
            }
        }
        rows.insert(
            account.id,
            StoredAccount {
                account: account.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id).ok_or(DomainError::NotFound("Account"))?;
        row.account.set_active(active);
        Ok(())
    }

    async fn touch_last_login(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        if let Some(row) = self.rows.write().get_mut(&id) {
            row.account.record_login(at);
        }
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.rows.read().get(&id).map(|row| row.password_hash.clone()))
    }
}
