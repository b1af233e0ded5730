//! Main authentication service implementation

use std::sync::Arc;

use ea_shared::utils::{is_valid_email, is_valid_password, is_valid_phone, is_valid_username, mask_email};

use crate::domain::entities::token::{IssuedToken, TokenPayload};
use crate::domain::entities::user::{Role, User, UserProfileUpdate};
use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::domain::events::UserRegisteredEvent;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;
use crate::services::verification::{EmailSender, VerificationCodeStore, VerificationService};

use super::config::AuthServiceConfig;
use super::traits::{PasswordHasher, UserEventPublisher};

/// Successful login outcome
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: IssuedToken,
    pub payload: TokenPayload,
}

/// Authentication service orchestrating accounts, tokens and one-time codes
pub struct AuthService<U, H, P, C, E>
where
    U: UserRepository,
    H: PasswordHasher,
    P: UserEventPublisher,
    C: VerificationCodeStore,
    E: EmailSender,
{
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Password hashing
    password_hasher: Arc<H>,
    /// Publisher for "user registered" events
    event_publisher: Arc<P>,
    /// One-time code issuing and checking
    verification_service: Arc<VerificationService<C, E>>,
    /// Token signing and verification
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, H, P, C, E> AuthService<U, H, P, C, E>
where
    U: UserRepository,
    H: PasswordHasher,
    P: UserEventPublisher,
    C: VerificationCodeStore,
    E: EmailSender,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `password_hasher` - Password hashing implementation
    /// * `event_publisher` - Publisher for account events
    /// * `verification_service` - Service for one-time codes
    /// * `token_service` - Service for JWT tokens
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<H>,
        event_publisher: Arc<P>,
        verification_service: Arc<VerificationService<C, E>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            event_publisher,
            verification_service,
            token_service,
            config,
        }
    }

    /// Token service shared with the transport layer
    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    /// Register a new account
    ///
    /// The "user registered" event is published best-effort: a publish
    /// failure is logged and the created user is kept.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(AuthError::InvalidRole)` - Role is not admin, teacher or student
    /// * `Err(AuthError::EmailAlreadyExists)` - Email is taken
    /// * `Err(DomainError::Validation)` - Malformed email or short password
    pub async fn register(&self, email: &str, password: &str, role: Role) -> DomainResult<User> {
        if !role.is_valid() {
            return Err(AuthError::InvalidRole.into());
        }
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(DomainError::validation("email address is malformed"));
        }
        self.check_password_strength(password)?;

        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(password).await?;
        let user = self
            .user_repository
            .create(User::new(email.to_string(), password_hash, role))
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            role = %user.role,
            event = "user_registered",
            "User registered"
        );

        let event = UserRegisteredEvent::from(&user);
        if let Err(e) = self.event_publisher.publish_user_registered(&event).await {
            tracing::warn!(
                user_id = %user.id,
                error = %e,
                event = "user_registered_publish_failed",
                "Failed to publish user registered event"
            );
        }

        Ok(user)
    }

    /// Authenticate with email and password and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let user = self.find_user_by_email(email.trim()).await?;

        if !self.password_hasher.verify(password, &user.password_hash).await? {
            tracing::warn!(
                user_id = %user.id,
                event = "login_failed",
                "Invalid password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.generate(&user.id, user.role)?;
        let payload = TokenPayload {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            issued_at: token.issued_at,
            expires_at: token.expires_at,
        };

        tracing::info!(user_id = %user.id, event = "login_succeeded", "User logged in");

        Ok(LoginResult {
            user,
            token,
            payload,
        })
    }

    /// Check a bearer token and return the identity it carries
    pub fn validate_token(&self, token: &str) -> DomainResult<TokenPayload> {
        self.token_service.validate(token)
    }

    /// Look up a user by id
    pub async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Update username and/or phone of a user
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: UserProfileUpdate,
    ) -> DomainResult<User> {
        if let Some(username) = &update.username {
            if !is_valid_username(username) {
                return Err(DomainError::validation("username is malformed"));
            }
        }
        if let Some(phone) = &update.phone {
            if !is_valid_phone(phone) {
                return Err(DomainError::validation("phone number is malformed"));
            }
        }

        let mut user = self.get_user(user_id).await?;
        if update.is_empty() {
            return Ok(user);
        }
        user.apply_profile(&update);
        let user = self.user_repository.update(user).await?;

        tracing::info!(user_id = %user.id, event = "profile_updated", "User profile updated");
        Ok(user)
    }

    /// Replace a user's password
    ///
    /// The new password must differ from the old one. When configured, the
    /// old password is also checked against the stored hash.
    pub async fn change_password(
        &self,
        user_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if old_password == new_password {
            return Err(AuthError::PasswordUnchanged.into());
        }
        self.check_password_strength(new_password)?;

        let mut user = self.get_user(user_id).await?;

        if self.config.require_current_password
            && !self
                .password_hasher
                .verify(old_password, &user.password_hash)
                .await?
        {
            tracing::warn!(user_id = %user.id, event = "password_change_rejected", "Current password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let password_hash = self.password_hasher.hash(new_password).await?;
        user.set_password_hash(password_hash);
        self.user_repository.update(user).await?;

        tracing::info!(user_id = %user_id, event = "password_changed", "Password changed");
        Ok(())
    }

    /// Issue a one-time code for `purpose` to the account behind `email`
    pub async fn send_verification_code(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> DomainResult<VerificationCode> {
        let user = self.find_user_by_email(email.trim()).await?;
        self.verification_service.issue(&user, purpose).await
    }

    /// Check and consume a one-time code
    ///
    /// An `email_verification` code marks the user verified. A
    /// `reset_password` code changes nothing here; the password is set by
    /// [`Self::confirm_reset_password`]. The code is consumed only after the
    /// side effect is stored, so a failed write leaves it usable.
    pub async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> DomainResult<User> {
        let mut user = self.checked_user(email, code, purpose).await?;

        if purpose == CodePurpose::EmailVerification && !user.verified {
            user.verify();
            user = self.user_repository.update(user).await?;
            tracing::info!(user_id = %user.id, event = "account_verified", "Account verified");
        }

        self.verification_service.consume(&user.id, purpose).await?;
        Ok(user)
    }

    /// Verify the account's email address with a code
    pub async fn verify_account(&self, email: &str, code: &str) -> DomainResult<User> {
        self.verify_code(email, code, CodePurpose::EmailVerification)
            .await
    }

    /// Start password recovery by emailing a reset code
    pub async fn start_reset_password(&self, email: &str) -> DomainResult<VerificationCode> {
        self.send_verification_code(email, CodePurpose::ResetPassword)
            .await
    }

    /// Finish password recovery with the emailed code
    pub async fn confirm_reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.check_password_strength(new_password)?;

        let mut user = self
            .checked_user(email, code, CodePurpose::ResetPassword)
            .await?;

        let password_hash = self.password_hasher.hash(new_password).await?;
        user.set_password_hash(password_hash);
        let user = self.user_repository.update(user).await?;

        self.verification_service
            .consume(&user.id, CodePurpose::ResetPassword)
            .await?;

        tracing::info!(user_id = %user.id, event = "password_reset", "Password reset");
        Ok(())
    }

    /// Resolves the account behind `email` and checks its pending code
    async fn checked_user(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> DomainResult<User> {
        let user = self.find_user_by_email(email.trim()).await?;
        self.verification_service
            .check(&user.id, code.trim(), purpose)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    fn check_password_strength(&self, password: &str) -> DomainResult<()> {
        if !is_valid_password(password, self.config.min_password_length) {
            return Err(DomainError::validation(format!(
                "password must be at least {} characters",
                self.config.min_password_length
            )));
        }
        Ok(())
    }
}
