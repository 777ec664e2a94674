//! Application state for Axum web framework.
//!
//! Contains shared repositories and resources that are accessible
//! across all request handlers.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;

/// Application state shared by the router.
///
/// Cloning is cheap: the repositories are `Arc`s and the pool is a bb8 handle.
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    /// `None` when rows live in process memory.
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// State backed by PostgreSQL. Missing tables are created here.
    pub async fn postgres(pool: AsyncDbPool) -> crate::error::AppResult<Self> {
        let repositories = Repositories::postgres(pool.clone()).await?;
        Ok(Self {
            repositories,
            db_pool: Some(pool),
        })
    }

    /// State with empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            repositories: Repositories::in_memory(),
            db_pool: None,
        }
    }
}
