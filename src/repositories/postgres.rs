//! PostgreSQL repositories over the shared bb8 pool.
//!
//! Each repository differs only in its table, its entity and its predicate
//! builder, so the bodies come from one macro.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{AsyncDbPool, bootstrap};
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{
    Address, AddressResource, Delivery, DeliveryProduct, DeliveryProductResource,
    DeliveryResource, Payment, PaymentResource, Product, ProductResource, Resource, ShoppingCart,
    ShoppingCartResource, User, UserAddress, UserAddressResource, UserDelivery,
    UserDeliveryResource, UserResource,
};
use crate::repositories::crud::{CrudRepository, new_identity};
use crate::repositories::filters;

macro_rules! pg_repository {
    (
        $(#[$meta:meta])*
        $name:ident, $resource:ty, $entity:ty, $table:ident, $ddl:expr, $predicates:path
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: AsyncDbPool,
        }

        impl $name {
            /// Creates the repository, ensuring its table exists first.
            pub async fn new(pool: AsyncDbPool) -> AppResult<Self> {
                bootstrap::ensure_table(&pool, stringify!($table), $ddl).await?;
                Ok(Self { pool })
            }
        }

        #[async_trait]
        impl CrudRepository<$resource> for $name {
            async fn create(
                &self,
                params: <$resource as Resource>::Params,
            ) -> AppResult<$entity> {
                use crate::schema::$table;

                let (id, created_at) = new_identity();
                let row = <$resource>::build(id, created_at, params);
                let mut conn = self.pool.get().await?;

                let created = diesel::insert_into($table::table)
                    .values(&row)
                    .returning(<$entity>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("insert ", stringify!($table)),
                        )
                    })?;

                let row_id = <$resource>::id(&created);
                tracing::info!(table = stringify!($table), id = %row_id, "Row created");
                Ok(created)
            }

            async fn get_all(
                &self,
                filter: <$resource as Resource>::Params,
            ) -> AppResult<Vec<$entity>> {
                use crate::schema::$table;

                let mut query = $table::table.select(<$entity>::as_select()).into_boxed();
                for predicate in $predicates(&filter) {
                    query = query.filter(predicate);
                }

                let mut conn = self.pool.get().await?;
                query.load(&mut conn).await.map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(
                        e,
                        concat!("select ", stringify!($table)),
                    )
                })
            }

            async fn get_one(&self, id: &str) -> AppResult<$entity> {
                use crate::schema::$table;
                let mut conn = self.pool.get().await?;

                $table::table
                    .find(id)
                    .select(<$entity>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("select ", stringify!($table)),
                        )
                    })?
                    .ok_or_else(|| AppError::not_found(<$resource>::NAME, id))
            }

            async fn delete_one(&self, id: &str) -> AppResult<usize> {
                use crate::schema::$table;
                let mut conn = self.pool.get().await?;

                let deleted = diesel::delete($table::table.find(id))
                    .execute(&mut conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("delete ", stringify!($table)),
                        )
                    })?;

                if deleted == 0 {
                    return Err(AppError::not_found(<$resource>::NAME, id));
                }
                Ok(deleted)
            }

            async fn delete_all(
                &self,
                filter: <$resource as Resource>::Params,
            ) -> AppResult<usize> {
                use crate::schema::$table;

                let mut statement = diesel::delete($table::table).into_boxed();
                for predicate in $predicates(&filter) {
                    statement = statement.filter(predicate);
                }

                let mut conn = self.pool.get().await?;
                let deleted = statement.execute(&mut conn).await.map_err(|e| {
                    DatabaseErrorConverter::convert_diesel_error(
                        e,
                        concat!("delete ", stringify!($table)),
                    )
                })?;

                tracing::info!(table = stringify!($table), deleted, "Rows deleted");
                Ok(deleted)
            }

            async fn update(
                &self,
                id: &str,
                params: <$resource as Resource>::Params,
            ) -> AppResult<$entity> {
                use crate::schema::$table;

                let previous = self.get_one(id).await?;
                let merged = <$resource>::merge(previous, params);
                <$resource>::check(&merged)?;

                if <$resource>::discards_on_update(&merged) {
                    self.delete_one(id).await?;
                    return Ok(<$resource>::empty());
                }

                let mut conn = self.pool.get().await?;
                diesel::update($table::table.find(id))
                    .set(&merged)
                    .returning(<$entity>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("update ", stringify!($table)),
                        )
                    })
            }
        }
    };
}

pg_repository!(
    PgProductRepository,
    ProductResource,
    Product,
    products,
    bootstrap::PRODUCTS,
    filters::product
);

pg_repository!(
    PgUserRepository,
    UserResource,
    User,
    users,
    bootstrap::USERS,
    filters::user
);

pg_repository!(
    PgAddressRepository,
    AddressResource,
    Address,
    addresses,
    bootstrap::ADDRESSES,
    filters::address
);

pg_repository!(
    PgDeliveryRepository,
    DeliveryResource,
    Delivery,
    deliveries,
    bootstrap::DELIVERIES,
    filters::delivery
);

pg_repository!(
    /// `UserID` filters through `user_delivery`; see [`filters::payment`].
    PgPaymentRepository,
    PaymentResource,
    Payment,
    payments,
    bootstrap::PAYMENTS,
    filters::payment
);

pg_repository!(
    /// A zero `ProductAmount` on update removes the cart line.
    PgShoppingCartRepository,
    ShoppingCartResource,
    ShoppingCart,
    shopping_cart,
    bootstrap::SHOPPING_CART,
    filters::shopping_cart
);

pg_repository!(
    PgUserAddressRepository,
    UserAddressResource,
    UserAddress,
    user_address,
    bootstrap::USER_ADDRESS,
    filters::user_address
);

pg_repository!(
    PgUserDeliveryRepository,
    UserDeliveryResource,
    UserDelivery,
    user_delivery,
    bootstrap::USER_DELIVERY,
    filters::user_delivery
);

pg_repository!(
    PgDeliveryProductRepository,
    DeliveryProductResource,
    DeliveryProduct,
    delivery_product,
    bootstrap::DELIVERY_PRODUCT,
    filters::delivery_product
);
