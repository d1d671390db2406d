//! Provisio Core — shared domain models, errors, the department
//! catalog, and the repository traits every backend implements.

pub mod catalog;
pub mod error;
pub mod models;
pub mod repository;

pub use catalog::{DepartmentAccess, DepartmentCatalog, ResolvedAccess};
pub use error::{ProvisioError, ProvisioResult};
