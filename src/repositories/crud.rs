//! The repository contract shared by every resource.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Resource;

/// Timestamp layout stored in every `created_at` column.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage operations for one resource.
///
/// Methods take already-validated parameter models. Identifiers and creation
/// timestamps are assigned here, never by callers.
#[async_trait]
pub trait CrudRepository<R: Resource>: Send + Sync {
    /// Persists a new row built from `params` and returns it.
    async fn create(&self, params: R::Params) -> AppResult<R::Entity>;

    /// Rows matching every present attribute of `filter`.
    async fn get_all(&self, filter: R::Params) -> AppResult<Vec<R::Entity>>;

    /// Fails with `NotFound` when no row has this id.
    async fn get_one(&self, id: &str) -> AppResult<R::Entity>;

    /// Removes one row. Fails with `NotFound` when nothing was deleted.
    async fn delete_one(&self, id: &str) -> AppResult<usize>;

    /// Removes every row matching `filter` and returns how many went.
    async fn delete_all(&self, filter: R::Params) -> AppResult<usize>;

    /// Reads the stored row, merges `params` over it and writes it back.
    ///
    /// When [`Resource::discards_on_update`] holds for the merged row, the row
    /// is deleted instead and [`Resource::empty`] is returned.
    async fn update(&self, id: &str, params: R::Params) -> AppResult<R::Entity>;
}

/// Fresh identifier and creation timestamp for a new row.
pub fn new_identity() -> (String, String) {
    let created_at = jiff::Zoned::now().strftime(CREATED_AT_FORMAT).to_string();
    (Uuid::new_v4().to_string(), created_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_shape() {
        let (id, created_at) = new_identity();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(created_at.len(), 19);
        assert_eq!(&created_at[4..5], "-");
        assert_eq!(&created_at[10..11], " ");
    }

    #[test]
    fn test_identities_are_unique() {
        let (a, _) = new_identity();
        let (b, _) = new_identity();
        assert_ne!(a, b);
    }
}
