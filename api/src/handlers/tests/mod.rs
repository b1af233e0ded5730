mod error_mapping_tests;

use std::sync::Arc;

use ea_core::domain::entities::token::TokenPayload;
use ea_core::domain::entities::user::{Role, User};
use ea_core::repositories::InMemoryUserRepository;
use ea_core::services::{
    AuthService, FakePasswordHasher, InMemoryCodeStore, RecordingEmailSender,
    RecordingEventPublisher,
};
use ea_shared::config::{AppConfig, DuplicateEmailStatus};
use tonic::Request;

use crate::app::build_auth_service;
use crate::handlers::AuthHandler;
use crate::middleware::AuthContext;

pub(super) type TestAuthService = AuthService<
    InMemoryUserRepository,
    FakePasswordHasher,
    RecordingEventPublisher,
    InMemoryCodeStore,
    RecordingEmailSender,
>;

pub(super) type TestHandler = AuthHandler<
    InMemoryUserRepository,
    FakePasswordHasher,
    RecordingEventPublisher,
    InMemoryCodeStore,
    RecordingEmailSender,
>;

pub(super) struct Fixture {
    pub auth: Arc<TestAuthService>,
    pub codes: InMemoryCodeStore,
    pub handler: TestHandler,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_duplicate_status(DuplicateEmailStatus::AlreadyExists)
    }

    pub fn with_duplicate_status(status: DuplicateEmailStatus) -> Self {
        let codes = InMemoryCodeStore::new();
        let auth = build_auth_service(
            &AppConfig::default(),
            InMemoryUserRepository::new(),
            FakePasswordHasher,
            RecordingEventPublisher::new(),
            codes.clone(),
            RecordingEmailSender::new(),
        );
        let handler = AuthHandler::new(auth.clone(), status);
        Self {
            auth,
            codes,
            handler,
        }
    }

    pub async fn user(&self, email: &str, role: Role) -> User {
        self.auth.register(email, "pw", role).await.unwrap()
    }
}

/// Wraps `message` as if the authentication layer had admitted `user`
pub(super) fn as_caller<T>(user: &User, message: T) -> Request<T> {
    let mut request = Request::new(message);
    request.extensions_mut().insert(AuthContext::new(TokenPayload {
        user_id: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        issued_at: chrono::Utc::now(),
        expires_at: chrono::Utc::now().timestamp() + 60,
    }));
    request
}
