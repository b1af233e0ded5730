//! gRPC API layer for the EduAuth backend
//!
//! - `proto`: wire messages and the generated service trait
//! - `middleware`: request logging and bearer authentication layers
//! - `handlers`: RPC handlers and error mapping
//! - `server` / `app`: adapter wiring and the tonic server

pub mod app;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod proto;
pub mod server;
