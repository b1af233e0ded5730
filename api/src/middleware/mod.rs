//! Tower layers wrapped around the gRPC router

pub mod auth;
pub mod request_log;

pub use auth::{AuthContext, AuthLayer, AuthMiddleware};
pub use request_log::{RequestLogLayer, RequestLogService, REQUEST_ID_HEADER};
