//! `auth.AuthService` RPC handlers.
//!
//! Handlers decode wire messages, apply per-endpoint role checks against the
//! [`AuthContext`] injected by the authentication layer, delegate to the
//! domain [`AuthService`] and map failures through [`StatusMapper`].

use std::sync::Arc;

use tonic::{Request, Response, Status};

use ea_core::domain::entities::token::TOKEN_TYPE;
use ea_core::domain::entities::user::UserProfileUpdate;
use ea_core::errors::{AuthError, DomainError};
use ea_core::repositories::UserRepository;
use ea_core::services::{
    AuthService, EmailSender, PasswordHasher, UserEventPublisher, VerificationCodeStore,
};
use ea_shared::config::DuplicateEmailStatus;

use crate::middleware::AuthContext;
use crate::proto::auth_service_server::AuthService as AuthRpc;
use crate::proto::{
    self, purpose_from_wire, role_from_wire, ChangePasswordRequest, ConfirmResetPasswordRequest,
    GetUserByIdRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, SendVerificationCodeRequest, StatusResponse, UpdateUserProfileRequest,
    UserResponse, ValidateTokenRequest, ValidateTokenResponse, VerifyAccountRequest,
};

use super::error::StatusMapper;

/// gRPC front of the authentication service
pub struct AuthHandler<U, H, P, C, E>
where
    U: UserRepository,
    H: PasswordHasher,
    P: UserEventPublisher,
    C: VerificationCodeStore,
    E: EmailSender,
{
    auth: Arc<AuthService<U, H, P, C, E>>,
    errors: StatusMapper,
}

impl<U, H, P, C, E> AuthHandler<U, H, P, C, E>
where
    U: UserRepository,
    H: PasswordHasher,
    P: UserEventPublisher,
    C: VerificationCodeStore,
    E: EmailSender,
{
    pub fn new(auth: Arc<AuthService<U, H, P, C, E>>, duplicate_email: DuplicateEmailStatus) -> Self {
        Self {
            auth,
            errors: StatusMapper::new(duplicate_email),
        }
    }

    fn status(&self, err: DomainError) -> Status {
        self.errors.map(err)
    }
}

/// Identity injected by the authentication layer
#[allow(clippy::result_large_err)]
fn caller<T>(request: &Request<T>) -> Result<AuthContext, Status> {
    request
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or_else(|| Status::unauthenticated("invalid context claims"))
}

/// Self-service endpoints accept the account owner or an admin
fn require_self_or_admin(context: &AuthContext, user_id: &str) -> Result<(), DomainError> {
    if context.can_act_for(user_id) {
        Ok(())
    } else {
        tracing::warn!(
            caller = %context.user_id(),
            target = %user_id,
            "Caller may not act on another account"
        );
        Err(AuthError::PermissionDenied.into())
    }
}

fn require_admin(context: &AuthContext) -> Result<(), DomainError> {
    if context.is_admin() {
        Ok(())
    } else {
        tracing::warn!(caller = %context.user_id(), "Admin access required");
        Err(AuthError::PermissionDenied.into())
    }
}

#[tonic::async_trait]
impl<U, H, P, C, E> AuthRpc for AuthHandler<U, H, P, C, E>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
    P: UserEventPublisher + 'static,
    C: VerificationCodeStore + 'static,
    E: EmailSender + 'static,
{
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        match self.auth.login(&req.email, &req.password).await {
            Ok(result) => Ok(Response::new(LoginResponse {
                access_token: result.token.token,
                refresh_token: String::new(),
                expires_at: result.payload.expires_at,
                token_type: TOKEN_TYPE.to_string(),
            })),
            // Unknown email and wrong password look the same to the client
            Err(DomainError::Auth(AuthError::UserNotFound | AuthError::InvalidCredentials)) => {
                Err(Status::unauthenticated("invalid email or password"))
            }
            Err(e) => Err(self.status(e)),
        }
    }

    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();

        let role = role_from_wire(req.role);
        if !role.is_valid() {
            return Err(Status::invalid_argument("invalid role"));
        }

        let user = self
            .auth
            .register(&req.email, &req.password, role)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(RegisterResponse {
            success: true,
            message: "user registered".to_string(),
            access_token: String::new(),
            user_id: user.id,
        }))
    }

    async fn validate_token(
        &self,
        request: Request<ValidateTokenRequest>,
    ) -> Result<Response<ValidateTokenResponse>, Status> {
        let req = request.into_inner();

        let payload = self
            .auth
            .validate_token(req.jwt.trim())
            .map_err(|_| Status::invalid_argument("invalid token"))?;

        Ok(Response::new(ValidateTokenResponse {
            valid: true,
            user_id: payload.user_id,
            role: proto::Role::from(payload.role) as i32,
            expires_at: payload.expires_at,
        }))
    }

    async fn get_user_by_id(
        &self,
        request: Request<GetUserByIdRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let context = caller(&request)?;
        require_admin(&context).map_err(|e| self.status(e))?;

        let req = request.into_inner();
        let user = self
            .auth
            .get_user(&req.user_id)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(UserResponse {
            success: true,
            message: "user found".to_string(),
            user: Some(proto::User::from(&user)),
        }))
    }

    async fn update_user_profile(
        &self,
        request: Request<UpdateUserProfileRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let context = caller(&request)?;
        let req = request.into_inner();
        require_self_or_admin(&context, &req.user_id).map_err(|e| self.status(e))?;

        let update = UserProfileUpdate {
            username: req.username,
            phone: req.phone,
        };
        let user = self
            .auth
            .update_profile(&req.user_id, update)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(UserResponse {
            success: true,
            message: "user updated".to_string(),
            user: Some(proto::User::from(&user)),
        }))
    }

    async fn change_password(
        &self,
        request: Request<ChangePasswordRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let context = caller(&request)?;
        let req = request.into_inner();
        require_self_or_admin(&context, &req.user_id).map_err(|e| self.status(e))?;

        self.auth
            .change_password(&req.user_id, &req.old_password, &req.new_password)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(StatusResponse::ok("password changed")))
    }

    async fn reset_password(
        &self,
        request: Request<ResetPasswordRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let req = request.into_inner();

        self.auth
            .start_reset_password(&req.email)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(StatusResponse::ok("reset code sent to email")))
    }

    async fn confirm_reset_password(
        &self,
        request: Request<ConfirmResetPasswordRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let req = request.into_inner();

        self.auth
            .confirm_reset_password(&req.email, &req.code, &req.new_password)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(StatusResponse::ok("password has been reset")))
    }

    async fn send_verification_code(
        &self,
        request: Request<SendVerificationCodeRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let req = request.into_inner();

        let purpose =
            purpose_from_wire(req.purpose).ok_or_else(|| Status::invalid_argument("invalid purpose"))?;

        self.auth
            .send_verification_code(&req.email, purpose)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(StatusResponse::ok("verification code sent")))
    }

    async fn verify_account(
        &self,
        request: Request<VerifyAccountRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let req = request.into_inner();

        self.auth
            .verify_account(&req.email, &req.code)
            .await
            .map_err(|e| self.status(e))?;

        Ok(Response::new(StatusResponse::ok("account verified")))
    }
}
