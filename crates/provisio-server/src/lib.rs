//! Provisio Server — HTTP admin API, employee portal, and the
//! spreadsheet file watcher.
//!
//! The admin API sits behind API-key authentication plus a per-key
//! rate limit. The employee portal authenticates with an emailed
//! one-time code exchanged for a short-lived portal token. Both share
//! one [`state::AppState`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod otp;
pub mod router;
pub mod state;
pub mod watcher;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
