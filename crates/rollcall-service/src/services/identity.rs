//! Identity service
//!
//! Accounts, password authentication, and server-side sessions.

use chrono::Utc;
use rollcall_common::{generate_session_token, validate_password_strength, AdminBootstrap};
use rollcall_core::entities::{Account, Session};
use rollcall_core::{Actions, Actor, DomainError, Role, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AccountResponse, LoginRequest, LoginResponse, RegisterRequest};

use super::access::{AccessService, Resource};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public registration; only teacher and student accounts
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AccountResponse> {
        if !request.role.is_self_service() {
            return Err(ServiceError::validation(
                "Only teacher and student accounts can self-register",
            ));
        }
        let account = self.create_account(request).await?;
        Ok(AccountResponse::from(&account))
    }

    /// Admin-provisioned account of any role
    #[instrument(skip(self, actor, request), fields(username = %request.username))]
    pub async fn provision(
        &self,
        actor: &Actor,
        request: RegisterRequest,
    ) -> ServiceResult<AccountResponse> {
        AccessService::enforce(actor, Resource::System, Actions::MANAGE_ACCOUNTS)?;
        let account = self.create_account(request).await?;
        Ok(AccountResponse::from(&account))
    }

    /// Ensure the configured admin exists; a no-op when the username is taken
    #[instrument(skip(self, admin), fields(username = %admin.username))]
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> ServiceResult<()> {
        if self.ctx.account_repo().username_exists(&admin.username).await? {
            return Ok(());
        }
        self.create_account(RegisterRequest {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
            full_name: "Administrator".to_string(),
            role: Role::Admin,
        })
        .await?;
        Ok(())
    }

    async fn create_account(&self, request: RegisterRequest) -> ServiceResult<Account> {
        request.validate()?;
        validate_password_strength(&request.password)?;

        let repo = self.ctx.account_repo();
        if repo.username_exists(&request.username).await? {
            return Err(DomainError::DuplicateIdentity("username").into());
        }
        if repo.email_exists(&request.email).await? {
            return Err(DomainError::DuplicateIdentity("email").into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let account = Account::new(
            self.ctx.generate_id(),
            request.username,
            request.email.trim().to_lowercase(),
            request.full_name.trim().to_string(),
            request.role,
        );
        repo.create(&account, &password_hash).await?;

        info!(account_id = %account.id, role = %account.role, "Account created");
        Ok(account)
    }

    /// Check credentials.
    ///
    /// Unknown login, wrong password and deactivated account all yield
    /// `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, login: &str, password: &str) -> ServiceResult<Account> {
        let repo = self.ctx.account_repo();
        let login = login.trim();

        let found = match repo.find_by_username(login).await? {
            Some(account) => Some(account),
            None if login.contains('@') => repo.find_by_email(login).await?,
            None => None,
        };

        let Some(mut account) = found.filter(|a| a.active) else {
            self.ctx.password_service().verify_decoy(password);
            warn!("Failed login attempt");
            return Err(DomainError::InvalidCredentials.into());
        };

        let Some(hash) = repo.get_password_hash(account.id).await? else {
            self.ctx.password_service().verify_decoy(password);
            return Err(DomainError::InvalidCredentials.into());
        };
        if self
            .ctx
            .password_service()
            .verify_or_error(password, &hash)
            .is_err()
        {
            warn!(account_id = %account.id, "Failed login attempt");
            return Err(DomainError::InvalidCredentials.into());
        }

        let now = Utc::now();
        repo.touch_last_login(account.id, now).await?;
        account.record_login(now);
        Ok(account)
    }

    /// Authenticate and issue a session
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request.validate()?;
        let account = self.authenticate(&request.login, &request.password).await?;

        let session = Session::new(generate_session_token(), account.id, self.ctx.session_ttl());
        self.ctx.session_store().put(&session).await?;

        info!(account_id = %account.id, "Login succeeded");
        Ok(LoginResponse {
            token: session.token,
            expires_at: session.expires_at,
            account: AccountResponse::from(&account),
        })
    }

    /// Account behind a session token
    ///
    /// Expired, revoked, and deactivated sessions are `Unauthenticated`.
    #[instrument(skip(self, token))]
    pub async fn resolve_session(&self, token: &str) -> ServiceResult<Account> {
        let session = self
            .ctx
            .session_store()
            .get(token)
            .await?
            .filter(|s| !s.is_expired())
            .ok_or(DomainError::Unauthenticated)?;

        let account = self
            .ctx
            .account_repo()
            .find_by_id(session.account_id)
            .await?
            .filter(|a| a.active)
            .ok_or(DomainError::Unauthenticated)?;

        Ok(account)
    }

    /// Revoke one session
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        self.ctx.session_store().revoke(token).await?;
        Ok(())
    }

    /// Disable an account and revoke its sessions; the record is kept
    #[instrument(skip(self, actor))]
    pub async fn deactivate(
        &self,
        actor: &Actor,
        account_id: Snowflake,
    ) -> ServiceResult<AccountResponse> {
        AccessService::enforce(actor, Resource::System, Actions::MANAGE_ACCOUNTS)?;
        if actor.account_id() == Some(account_id) {
            return Err(ServiceError::validation("Cannot deactivate your own account"));
        }

        let account = self.set_active(account_id, false).await?;
        let revoked = self.ctx.session_store().revoke_all(account_id).await?;

        info!(account_id = %account_id, revoked, "Account deactivated");
        Ok(account)
    }

    #[instrument(skip(self, actor))]
    pub async fn reactivate(
        &self,
        actor: &Actor,
        account_id: Snowflake,
    ) -> ServiceResult<AccountResponse> {
        AccessService::enforce(actor, Resource::System, Actions::MANAGE_ACCOUNTS)?;
        let account = self.set_active(account_id, true).await?;
        info!(account_id = %account_id, "Account reactivated");
        Ok(account)
    }

    async fn set_active(
        &self,
        account_id: Snowflake,
        active: bool,
    ) -> ServiceResult<AccountResponse> {
        let repo = self.ctx.account_repo();
        let mut account = repo
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account"))?;

        if account.active != active {
            repo.set_active(account_id, active).await?;
            account.set_active(active);
        }
        Ok(AccountResponse::from(&account))
    }

    /// Every account, oldest first
    #[instrument(skip(self, actor))]
    pub async fn list_accounts(&self, actor: &Actor) -> ServiceResult<Vec<AccountResponse>> {
        AccessService::enforce(actor, Resource::System, Actions::MANAGE_ACCOUNTS)?;
        let accounts = self.ctx.account_repo().list().await?;
        Ok(accounts.iter().map(AccountResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, role: Role) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password: "secret123".to_string(),
            full_name: "Test User".to_string(),
            role,
        }
    }

    fn login(login: &str, password: &str) -> LoginRequest {
        LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_admin_role() {
        let ctx = ServiceContext::in_memory(0);
        let err = IdentityService::new(&ctx)
            .register(registration("boss", Role::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_duplicate_identity() {
        let ctx = ServiceContext::in_memory(0);
        let identity = IdentityService::new(&ctx);
        identity.register(registration("tara", Role::Teacher)).await.unwrap();

        let err = identity
            .register(registration("tara", Role::Student))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::DuplicateIdentity("username"))
        ));

        let mut other = registration("tara2", Role::Student);
        other.email = "TARA@school.test".to_string();
        let err = identity.register(other).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::DuplicateIdentity("email"))
        ));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let ctx = ServiceContext::in_memory(0);
        let mut request = registration("tara", Role::Teacher);
        request.password = "onlyletters".to_string();
        let err = IdentityService::new(&ctx).register(request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let ctx = ServiceContext::in_memory(0);
        let identity = IdentityService::new(&ctx);
        identity.register(registration("tara", Role::Teacher)).await.unwrap();

        let wrong_password = identity.login(login("tara", "secret999")).await.unwrap_err();
        let unknown_user = identity.login(login("nobody", "secret123")).await.unwrap_err();
        assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_login_by_email_and_resolve() {
        let ctx = ServiceContext::in_memory(0);
        let identity = IdentityService::new(&ctx);
        identity.register(registration("tara", Role::Teacher)).await.unwrap();

        let session = identity
            .login(login("tara@school.test", "secret123"))
            .await
            .unwrap();
        assert!(session.account.last_login.is_some());

        let account = identity.resolve_session(&session.token).await.unwrap();
        assert_eq!(account.username, "tara");

        identity.logout(&session.token).await.unwrap();
        assert!(identity.resolve_session(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn test_deactivation_blocks_login_and_sessions() {
        let ctx = ServiceContext::in_memory(0);
        let identity = IdentityService::new(&ctx);
        let admin = Actor::account(Snowflake::new(1), Role::Admin);

        let account = identity.register(registration("tara", Role::Teacher)).await.unwrap();
        let session = identity.login(login("tara", "secret123")).await.unwrap();

        let updated = identity.deactivate(&admin, account.id).await.unwrap();
        assert!(!updated.active);

        let err = identity.resolve_session(&session.token).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
        let err = identity.login(login("tara", "secret123")).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");

        identity.reactivate(&admin, account.id).await.unwrap();
        assert!(identity.login(login("tara", "secret123")).await.is_ok());
    }

    #[tokio::test]
    async fn test_account_management_requires_admin() {
        let ctx = ServiceContext::in_memory(0);
        let identity = IdentityService::new(&ctx);
        let teacher = Actor::account(Snowflake::new(2), Role::Teacher);

        let err = identity.list_accounts(&teacher).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
        let err = identity
            .provision(&teacher, registration("boss", Role::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let ctx = ServiceContext::in_memory(0);
        let identity = IdentityService::new(&ctx);
        let admin = AdminBootstrap {
            username: "root".to_string(),
            email: "root@school.test".to_string(),
            password: "changeme1".to_string(),
        };

        identity.bootstrap_admin(&admin).await.unwrap();
        identity.bootstrap_admin(&admin).await.unwrap();

        let session = identity.login(login("root", "changeme1")).await.unwrap();
        assert_eq!(session.account.role, Role::Admin);
        let all = identity
            .list_accounts(&Actor::account(session.account.id, Role::Admin))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }
}
