//! HTTP API for the gateway

pub mod handlers;
pub mod server;

pub use server::{build_router, serve, AppState};
