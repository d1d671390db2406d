//! JSON-file directory store.

use std::path::{Path, PathBuf};

use provisio_core::catalog::DepartmentCatalog;
use provisio_core::error::ProvisioResult;
use provisio_core::models::user::{DirectoryUser, UpdateUser, UserStatus};
use provisio_core::repository::DirectoryStore;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Persisted document layout: a single top-level `users` array.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    users: Vec<DirectoryUser>,
}

/// A thin abstraction over a JSON "directory" of users.
///
/// Mutations within one process are serialized by an internal mutex;
/// cross-process writers are out of scope (single-writer assumption).
pub struct JsonDirectoryStore {
    path: PathBuf,
    catalog: DepartmentCatalog,
    write_lock: Mutex<()>,
}

impl JsonDirectoryStore {
    /// Open a store at `path`, creating an empty document when the
    /// file does not exist yet.
    pub async fn open(
        path: impl Into<PathBuf>,
        catalog: DepartmentCatalog,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let store = Self {
            path,
            catalog,
            write_lock: Mutex::new(()),
        };
        if tokio::fs::metadata(&store.path).await.is_err() {
            store.write_document(&Document::default()).await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.
    ///
    /// A document that fails to parse is reset to an empty valid store.
    /// That is silent data loss, so it is escalated to the operator
    /// through an error-level log line rather than swallowed.
    async fn read_document(&self) -> Result<Document, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "directory document is corrupt; resetting to an empty store"
                );
                let doc = Document::default();
                self.write_document(&doc).await?;
                Ok(doc)
            }
        }
    }

    /// Atomic replace: write a sibling temp file, then rename it over
    /// the live document.
    async fn write_document(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("tmp.json");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn find<'a>(doc: &'a Document, username: &str) -> Option<&'a DirectoryUser> {
        doc.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }

    fn find_mut<'a>(doc: &'a mut Document, username: &str) -> Option<&'a mut DirectoryUser> {
        doc.users
            .iter_mut()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }
}

impl DirectoryStore for JsonDirectoryStore {
    async fn list(&self) -> ProvisioResult<Vec<DirectoryUser>> {
        let doc = self.read_document().await?;
        Ok(doc.users)
    }

    async fn get(&self, username: &str) -> ProvisioResult<Option<DirectoryUser>> {
        let doc = self.read_document().await?;
        Ok(Self::find(&doc, username).cloned())
    }

    async fn create(&self, user: DirectoryUser) -> ProvisioResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        if Self::find(&doc, &user.username).is_some() {
            return Err(StoreError::AlreadyExists {
                username: user.username,
            }
            .into());
        }
        doc.users.push(user);
        Ok(self.write_document(&doc).await?)
    }

    async fn update(&self, username: &str, input: UpdateUser) -> ProvisioResult<DirectoryUser> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        let Some(user) = Self::find_mut(&mut doc, username) else {
            return Err(StoreError::NotFound {
                username: username.to_string(),
            }
            .into());
        };

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(department) = input.department {
            user.department = department;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(status) = input.status {
            user.status = status;
        }

        // The access invariant is re-derived on every update, not just
        // at creation: department and status changes recompute or
        // clear groups/permissions immediately. `created_at` is
        // untouched.
        let access = self.catalog.resolve(&user.department, user.status);
        user.organizational_unit = access.organizational_unit;
        user.groups = access.groups;
        user.permissions = access.permissions;

        let updated = user.clone();
        self.write_document(&doc).await?;
        Ok(updated)
    }

    async fn deactivate(&self, username: &str) -> ProvisioResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        let Some(user) = Self::find_mut(&mut doc, username) else {
            return Err(StoreError::NotFound {
                username: username.to_string(),
            }
            .into());
        };
        user.status = UserStatus::Inactive;
        user.groups.clear();
        user.permissions.clear();
        Ok(self.write_document(&doc).await?)
    }

    async fn delete(&self, username: &str) -> ProvisioResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        let before = doc.users.len();
        doc.users
            .retain(|u| !u.username.eq_ignore_ascii_case(username));
        if doc.users.len() == before {
            return Err(StoreError::NotFound {
                username: username.to_string(),
            }
            .into());
        }
        Ok(self.write_document(&doc).await?)
    }

    async fn clear_all(&self) -> ProvisioResult<()> {
        let _guard = self.write_lock.lock().await;
        Ok(self.write_document(&Document::default()).await?)
    }
}
