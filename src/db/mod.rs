//! Database connection pool module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! plus the table bootstrap run by each repository.

pub mod bootstrap;
mod pool;

pub use pool::{AsyncDbPool, establish_async_connection_pool};
