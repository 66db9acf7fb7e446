//! chat-gateway: quota-gated chat completion gateway
//!
//! Accepts a chat request over HTTP, enforces a per-user daily quota,
//! forwards the request to an upstream chat-completion API, records
//! usage, and returns the result.
//!
//! # Features
//!
//! - Per-user daily usage counters with lazy day-rollover reset
//! - Free and premium quota tiers
//! - Post-success usage accounting (failed generations consume no quota)
//! - SQLite-backed usage ledger
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8080"
//!
//! [upstream]
//! base_url = "https://api.openai.com"
//! model = "gpt-3.5-turbo"
//!
//! [quota]
//! free_daily_limit = 30
//! premium_daily_limit = 150
//!
//! [database]
//! url = "sqlite://chat-gateway.db?mode=rwc"
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod llm;
pub mod usage;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
