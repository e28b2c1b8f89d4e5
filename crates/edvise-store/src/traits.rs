//! Storage abstraction the workflow layer is written against.

use async_trait::async_trait;

use edvise_core::{College, CollegeDraft, Logo, LogoDraft, Result};

/// CRUD contract for the two entity tables.
///
/// Implementations validate and normalize drafts before touching the wire;
/// a draft that fails validation must produce no remote call.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the full college set. No store-side filtering or pagination.
    async fn list_colleges(&self) -> Result<Vec<College>>;

    /// Insert a new college from a validated, normalized draft.
    async fn create_college(&self, draft: &CollegeDraft) -> Result<College>;

    /// Full-field overwrite of the mutable columns of `id`.
    async fn update_college(&self, id: &str, draft: &CollegeDraft) -> Result<College>;

    /// Delete by id. Deleting an absent id is not distinguished from
    /// deleting a present one unless the store itself errors.
    async fn delete_college(&self, id: &str) -> Result<()>;

    /// Fetch the full logo set, ordered by id ascending.
    async fn list_logos(&self) -> Result<Vec<Logo>>;

    /// Insert a new partner logo.
    async fn create_logo(&self, draft: &LogoDraft) -> Result<Logo>;

    /// Full-field overwrite of logo `id`.
    async fn update_logo(&self, id: i64, draft: &LogoDraft) -> Result<Logo>;

    /// Delete logo by id.
    async fn delete_logo(&self, id: i64) -> Result<()>;
}
