//! Process-local storage with the same observable behavior as the
//! PostgreSQL repositories, minus foreign keys and cascades.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AppError, AppResult};
use crate::models::Resource;
use crate::repositories::crud::{CrudRepository, new_identity};

/// Extra predicate for filters that depend on other tables.
pub type RelationFilter<R> =
    Arc<dyn Fn(&<R as Resource>::Entity, &<R as Resource>::Params) -> bool + Send + Sync>;

/// Rows keyed by id. Listing returns them in insertion order.
pub struct InMemoryRepository<R: Resource> {
    rows: Arc<DashMap<String, (u64, R::Entity)>>,
    sequence: Arc<AtomicU64>,
    relation: Option<RelationFilter<R>>,
}

impl<R: Resource> Clone for InMemoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            sequence: Arc::clone(&self.sequence),
            relation: self.relation.clone(),
        }
    }
}

impl<R: Resource> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> InMemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicU64::new(0)),
            relation: None,
        }
    }

    /// Adds a predicate evaluated after [`Resource::matches`].
    pub fn with_relation(mut self, relation: RelationFilter<R>) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Whether any stored row satisfies `predicate`.
    pub fn any(&self, predicate: impl Fn(&R::Entity) -> bool) -> bool {
        self.rows.iter().any(|entry| predicate(&entry.value().1))
    }

    fn is_match(&self, entity: &R::Entity, filter: &R::Params) -> bool {
        R::matches(entity, filter)
            && self
                .relation
                .as_ref()
                .is_none_or(|relation| relation(entity, filter))
    }

    fn matching_ids(&self, filter: &R::Params) -> Vec<String> {
        self.rows
            .iter()
            .filter(|entry| self.is_match(&entry.value().1, filter))
            .map(|entry| entry.key().clone())
            .collect()
    }
}

#[async_trait]
impl<R: Resource> CrudRepository<R> for InMemoryRepository<R> {
    async fn create(&self, params: R::Params) -> AppResult<R::Entity> {
        let (id, created_at) = new_identity();
        let row = R::build(id.clone(), created_at, params);
        let position = self.sequence.fetch_add(1, Ordering::Relaxed);

        self.rows.insert(id.clone(), (position, row.clone()));
        tracing::debug!(resource = R::NAME, id = %id, "Row created in memory");
        Ok(row)
    }

    async fn get_all(&self, filter: R::Params) -> AppResult<Vec<R::Entity>> {
        let mut rows: Vec<(u64, R::Entity)> = self
            .rows
            .iter()
            .filter(|entry| self.is_match(&entry.value().1, &filter))
            .map(|entry| entry.value().clone())
            .collect();

        rows.sort_by_key(|(position, _)| *position);
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn get_one(&self, id: &str) -> AppResult<R::Entity> {
        self.rows
            .get(id)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| AppError::not_found(R::NAME, id))
    }

    async fn delete_one(&self, id: &str) -> AppResult<usize> {
        self.rows
            .remove(id)
            .map(|_| 1)
            .ok_or_else(|| AppError::not_found(R::NAME, id))
    }

    async fn delete_all(&self, filter: R::Params) -> AppResult<usize> {
        // Collect first: removing while iterating a DashMap deadlocks its shard.
        let ids = self.matching_ids(&filter);
        Ok(ids
            .iter()
            .filter(|id| self.rows.remove(id.as_str()).is_some())
            .count())
    }

    async fn update(&self, id: &str, params: R::Params) -> AppResult<R::Entity> {
        let mut entry = self
            .rows
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(R::NAME, id))?;

        let (position, previous) = entry.value().clone();
        let merged = R::merge(previous, params);
        R::check(&merged)?;

        if R::discards_on_update(&merged) {
            drop(entry);
            self.rows.remove(id);
            return Ok(R::empty());
        }

        *entry.value_mut() = (position, merged.clone());
        Ok(merged)
    }
}
