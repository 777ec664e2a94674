//! Idempotent table creation.
//!
//! Each repository runs its own statement when it is constructed, so the
//! statements below only ever use `CREATE TABLE IF NOT EXISTS`. Tables with
//! foreign keys must be created after the tables they reference; see
//! [`TABLE_ORDER`].

use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};

pub const USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id VARCHAR(36) PRIMARY KEY,
    is_active BOOLEAN NOT NULL DEFAULT FALSE,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    created_at VARCHAR(19) NOT NULL,
    email TEXT NOT NULL DEFAULT '',
    cpf TEXT NOT NULL DEFAULT '',
    name TEXT NOT NULL DEFAULT ''
)"#;

pub const PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id VARCHAR(36) PRIMARY KEY,
    is_active BOOLEAN NOT NULL DEFAULT FALSE,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    created_at VARCHAR(19) NOT NULL,
    weight_grams DOUBLE PRECISION NOT NULL DEFAULT 0,
    price DOUBLE PRECISION NOT NULL DEFAULT 0,
    name TEXT NOT NULL DEFAULT ''
)"#;

pub const ADDRESSES: &str = r#"
CREATE TABLE IF NOT EXISTS addresses (
    id VARCHAR(36) PRIMARY KEY,
    is_active BOOLEAN NOT NULL DEFAULT FALSE,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    created_at VARCHAR(19) NOT NULL,
    street TEXT NOT NULL DEFAULT '',
    number TEXT NOT NULL DEFAULT '',
    neighborhood TEXT NOT NULL DEFAULT '',
    complement TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    state TEXT NOT NULL DEFAULT '',
    country TEXT NOT NULL DEFAULT '',
    latitude DOUBLE PRECISION NOT NULL DEFAULT 0,
    longitude DOUBLE PRECISION NOT NULL DEFAULT 0,
    name TEXT NOT NULL DEFAULT ''
)"#;

pub const DELIVERIES: &str = r#"
CREATE TABLE IF NOT EXISTS deliveries (
    id VARCHAR(36) PRIMARY KEY,
    is_active BOOLEAN NOT NULL DEFAULT FALSE,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    created_at VARCHAR(19) NOT NULL,
    user_id VARCHAR(36) NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    address_id VARCHAR(36) NOT NULL REFERENCES addresses(id) ON DELETE CASCADE
)"#;

pub const PAYMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS payments (
    id VARCHAR(36) PRIMARY KEY,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    created_at VARCHAR(19) NOT NULL,
    delivery_id VARCHAR(36) NOT NULL REFERENCES deliveries(id) ON DELETE CASCADE,
    value DOUBLE PRECISION NOT NULL DEFAULT 0
)"#;

pub const SHOPPING_CART: &str = r#"
CREATE TABLE IF NOT EXISTS shopping_cart (
    id VARCHAR(36) PRIMARY KEY,
    user_id VARCHAR(36) NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    product_id VARCHAR(36) NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    product_amount INTEGER NOT NULL DEFAULT 0 CHECK (product_amount >= 0)
)"#;

pub const USER_ADDRESS: &str = r#"
CREATE TABLE IF NOT EXISTS user_address (
    id VARCHAR(36) PRIMARY KEY,
    user_id VARCHAR(36) NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    address_id VARCHAR(36) NOT NULL REFERENCES addresses(id) ON DELETE CASCADE
)"#;

pub const USER_DELIVERY: &str = r#"
CREATE TABLE IF NOT EXISTS user_delivery (
    id VARCHAR(36) PRIMARY KEY,
    delivery_id VARCHAR(36) NOT NULL REFERENCES deliveries(id) ON DELETE CASCADE,
    user_id VARCHAR(36) NOT NULL REFERENCES users(id) ON DELETE CASCADE
)"#;

pub const DELIVERY_PRODUCT: &str = r#"
CREATE TABLE IF NOT EXISTS delivery_product (
    id VARCHAR(36) PRIMARY KEY,
    delivery_id VARCHAR(36) NOT NULL REFERENCES deliveries(id) ON DELETE CASCADE,
    product_id VARCHAR(36) NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    product_amount INTEGER NOT NULL DEFAULT 0 CHECK (product_amount >= 0)
)"#;

/// Creation order that satisfies every foreign key above.
pub const TABLE_ORDER: &[(&str, &str)] = &[
    ("users", USERS),
    ("products", PRODUCTS),
    ("addresses", ADDRESSES),
    ("deliveries", DELIVERIES),
    ("payments", PAYMENTS),
    ("shopping_cart", SHOPPING_CART),
    ("user_address", USER_ADDRESS),
    ("user_delivery", USER_DELIVERY),
    ("delivery_product", DELIVERY_PRODUCT),
];

/// Runs one `CREATE TABLE IF NOT EXISTS` statement.
pub async fn ensure_table(pool: &AsyncDbPool, table: &str, ddl: &str) -> Result<(), AppError> {
    let mut conn = pool.get().await?;

    diesel::sql_query(ddl)
        .execute(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, &format!("create table {table}")))?;

    tracing::debug!(table = %table, "Table ensured");
    Ok(())
}
