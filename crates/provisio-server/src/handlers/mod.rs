//! HTTP request handlers.

pub mod audit;
pub mod imports;
pub mod notifications;
pub mod portal;
pub mod users;
