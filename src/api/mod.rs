//! HTTP API layer: request handlers, middleware, DTOs and the router.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
