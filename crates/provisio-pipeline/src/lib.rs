//! Provisio Pipeline — turns an uploaded spreadsheet into a
//! deterministic set of create/deactivate/skip decisions against the
//! directory store.
//!
//! Flow: raw bytes → [`loader`] → [`validator`] (per row) →
//! [`reconciler`] (duplicate detection + ordered mutation) → notifier
//! and audit sink.

pub mod config;
pub mod credentials;
pub mod error;
pub mod loader;
pub mod reconciler;
pub mod templates;
pub mod validator;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use reconciler::Reconciler;
