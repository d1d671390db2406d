//! Provisio Store — JSON-file-backed implementation of
//! [`provisio_core::repository::DirectoryStore`].
//!
//! The entire user collection lives in one JSON document with a
//! top-level `users` array. Every mutation reads the document, applies
//! the change in memory, and rewrites the file through a
//! write-temp-then-rename replace, so readers always see either the
//! pre- or post-mutation snapshot.

mod error;
mod json;

pub use error::StoreError;
pub use json::JsonDirectoryStore;
