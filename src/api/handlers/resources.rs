//! Generic CRUD handlers shared by every resource.
//!
//! Each handler is instantiated per [`Resource`] and receives that resource's
//! repository as router state.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::models::Resource;
use crate::models::resource::{filter_from_query, validate_first};
use crate::repositories::CrudRepository;

/// Repository handle stored as router state.
pub type RepoState<R> = Arc<dyn CrudRepository<R>>;

type QueryPairs = Query<Vec<(String, String)>>;

/// Routes for one resource, meant to be nested under [`Resource::BASE_PATH`].
///
/// `PUT /{id}` is registered only when [`Resource::SUPPORTS_UPDATE`] holds;
/// otherwise the method is answered with 405.
pub fn resource_routes<R, S>(repo: RepoState<R>) -> Router<S>
where
    R: Resource,
    S: Clone + Send + Sync + 'static,
{
    let item = if R::SUPPORTS_UPDATE {
        get(get_one::<R>).delete(delete_one::<R>).put(update::<R>)
    } else {
        get(get_one::<R>).delete(delete_one::<R>)
    };

    Router::new()
        .route(
            "/",
            get(get_all::<R>).post(create::<R>).delete(delete_all::<R>),
        )
        .route("/{id}", item)
        .with_state(repo)
}

pub async fn create<R: Resource>(
    State(repo): State<RepoState<R>>,
    payload: Result<Json<R::Params>, JsonRejection>,
) -> AppResult<(StatusCode, Json<R::Output>)> {
    let Json(params) = payload?;
    validate_first::<R>(&params)?;

    let created = repo.create(params).await?;
    Ok((StatusCode::CREATED, Json(R::Output::from(created))))
}

pub async fn get_all<R: Resource>(
    State(repo): State<RepoState<R>>,
    query: Result<QueryPairs, QueryRejection>,
) -> AppResult<Json<Vec<R::Output>>> {
    let Query(pairs) = query?;
    let filter = filter_from_query::<R>(&pairs)?;

    let rows = repo.get_all(filter).await?;
    Ok(Json(rows.into_iter().map(R::Output::from).collect()))
}

/// Any failure is reported as 404.
pub async fn get_one<R: Resource>(
    State(repo): State<RepoState<R>>,
    Path(id): Path<String>,
) -> AppResult<Json<R::Output>> {
    repo.get_one(&id)
        .await
        .map(|row| Json(R::Output::from(row)))
        .map_err(|e| as_not_found::<R>(e, &id))
}

/// Any failure is reported as 404.
pub async fn delete_one<R: Resource>(
    State(repo): State<RepoState<R>>,
    Path(id): Path<String>,
) -> AppResult<Json<usize>> {
    repo.delete_one(&id)
        .await
        .map(Json)
        .map_err(|e| as_not_found::<R>(e, &id))
}

/// Applies the same query-key rules as [`get_all`]. An empty filter deletes
/// every row.
pub async fn delete_all<R: Resource>(
    State(repo): State<RepoState<R>>,
    query: Result<QueryPairs, QueryRejection>,
) -> AppResult<Json<usize>> {
    let Query(pairs) = query?;
    let filter = filter_from_query::<R>(&pairs)?;

    let deleted = repo.delete_all(filter).await?;
    Ok(Json(deleted))
}

/// Partial update: absent fields keep their stored values, so the creation
/// rules are not re-applied here.
pub async fn update<R: Resource>(
    State(repo): State<RepoState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<R::Params>, JsonRejection>,
) -> AppResult<Json<R::Output>> {
    let Json(params) = payload?;

    let updated = repo.update(&id, params).await?;
    Ok(Json(R::Output::from(updated)))
}

fn as_not_found<R: Resource>(error: AppError, id: &str) -> AppError {
    if error.is_not_found() {
        return error;
    }
    tracing::warn!(resource = R::NAME, id = %id, error = %error, "Lookup failed");
    AppError::not_found(R::NAME, id)
}
