//! Bearer-token authentication for gRPC calls.
//!
//! Every call whose path is not in the public method set must carry
//! `authorization: Bearer <token>`. A verified token becomes an
//! [`AuthContext`] in the request extensions, where handlers read it back
//! through `tonic::Request::extensions`. Per-endpoint role checks are left to
//! the handlers.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Request, Response};
use tonic::{Code, Status};
use tower::{Layer, Service};

use ea_core::domain::entities::token::TokenPayload;
use ea_core::domain::entities::user::Role;
use ea_core::services::TokenService;

/// Verified identity of the caller, attached to authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    payload: TokenPayload,
}

impl AuthContext {
    pub fn new(payload: TokenPayload) -> Self {
        Self { payload }
    }

    pub fn user_id(&self) -> &str {
        &self.payload.user_id
    }

    pub fn role(&self) -> Role {
        self.payload.role
    }

    pub fn is_admin(&self) -> bool {
        self.payload.is_admin()
    }

    /// Callers may act on their own account; admins on any account
    pub fn can_act_for(&self, user_id: &str) -> bool {
        self.is_admin() || self.payload.user_id == user_id
    }

    pub fn payload(&self) -> &TokenPayload {
        &self.payload
    }
}

/// Layer installing [`AuthMiddleware`]
#[derive(Clone)]
pub struct AuthLayer {
    token_service: Arc<TokenService>,
    public_methods: Arc<HashSet<String>>,
}

impl AuthLayer {
    /// Builds the layer; the public method set is fixed from here on
    pub fn new<I, S>(token_service: Arc<TokenService>, public_methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token_service,
            public_methods: Arc::new(public_methods.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_methods.contains(path)
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            token_service: self.token_service.clone(),
            public_methods: self.public_methods.clone(),
        }
    }
}

/// Service enforcing authentication in front of `S`
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    token_service: Arc<TokenService>,
    public_methods: Arc<HashSet<String>>,
}

impl<S> AuthMiddleware<S> {
    fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, Status> {
        let raw = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| Status::unauthenticated("authorization header not supplied"))?;

        let token = raw
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or_else(|| Status::unauthenticated("invalid token"))?;

        // Expired, malformed and forged tokens are indistinguishable here
        let payload = self
            .token_service
            .validate(token)
            .map_err(|_| Status::unauthenticated("invalid token"))?;

        Ok(AuthContext::new(payload))
    }
}

/// Extracts the token from an `authorization` value; the `Bearer` scheme
/// prefix is optional
pub fn bearer_token(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value,
    };
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Trailers-only gRPC response carrying `status`
fn status_response<B: Default>(status: &Status) -> Response<B> {
    let mut response = Response::new(B::default());
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/grpc"));
    if status.add_header(headers).is_err() {
        headers.insert("grpc-status", HeaderValue::from(Code::Unauthenticated as i32));
    }
    response
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AuthMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let path = request.uri().path().to_string();

        if !self.public_methods.contains(&path) {
            match self.authenticate(request.headers()) {
                Ok(context) => {
                    tracing::debug!(method = %path, user_id = %context.user_id(), "Call authenticated");
                    request.extensions_mut().insert(context);
                }
                Err(status) => {
                    tracing::warn!(method = %path, reason = %status.message(), "Call rejected");
                    let response = status_response(&status);
                    return Box::pin(async move { Ok(response) });
                }
            }
        }

        // The clone is not guaranteed ready; keep the one poll_ready was called on
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}
