//! Repository layer for data access operations.
//!
//! Every resource is served through [`CrudRepository`], backed either by
//! PostgreSQL or by process memory.

mod crud;
pub mod filters;
mod memory;
mod postgres;

pub use crud::{CREATED_AT_FORMAT, CrudRepository, new_identity};
pub use memory::{InMemoryRepository, RelationFilter};
pub use postgres::{
    PgAddressRepository, PgDeliveryProductRepository, PgDeliveryRepository, PgPaymentRepository,
    PgProductRepository, PgShoppingCartRepository, PgUserAddressRepository,
    PgUserDeliveryRepository, PgUserRepository,
};

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{
    AddressResource, DeliveryProductResource, DeliveryResource, PaymentResource,
    ProductResource, ShoppingCartResource, UserAddressResource, UserDeliveryResource,
    UserResource,
};

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn CrudRepository<UserResource>>,
    pub products: Arc<dyn CrudRepository<ProductResource>>,
    pub addresses: Arc<dyn CrudRepository<AddressResource>>,
    pub deliveries: Arc<dyn CrudRepository<DeliveryResource>>,
    pub payments: Arc<dyn CrudRepository<PaymentResource>>,
    pub shopping_cart: Arc<dyn CrudRepository<ShoppingCartResource>>,
    pub user_address: Arc<dyn CrudRepository<UserAddressResource>>,
    pub user_delivery: Arc<dyn CrudRepository<UserDeliveryResource>>,
    pub delivery_product: Arc<dyn CrudRepository<DeliveryProductResource>>,
}

impl Repositories {
    /// Builds the PostgreSQL repositories, creating missing tables in
    /// foreign-key order.
    pub async fn postgres(pool: AsyncDbPool) -> AppResult<Self> {
        let users = PgUserRepository::new(pool.clone()).await?;
        let products = PgProductRepository::new(pool.clone()).await?;
        let addresses = PgAddressRepository::new(pool.clone()).await?;
        let deliveries = PgDeliveryRepository::new(pool.clone()).await?;
        let payments = PgPaymentRepository::new(pool.clone()).await?;
        let shopping_cart = PgShoppingCartRepository::new(pool.clone()).await?;
        let user_address = PgUserAddressRepository::new(pool.clone()).await?;
        let user_delivery = PgUserDeliveryRepository::new(pool.clone()).await?;
        let delivery_product = PgDeliveryProductRepository::new(pool).await?;

        Ok(Self {
            users: Arc::new(users),
            products: Arc::new(products),
            addresses: Arc::new(addresses),
            deliveries: Arc::new(deliveries),
            payments: Arc::new(payments),
            shopping_cart: Arc::new(shopping_cart),
            user_address: Arc::new(user_address),
            user_delivery: Arc::new(user_delivery),
            delivery_product: Arc::new(delivery_product),
        })
    }

    /// Builds empty in-memory repositories.
    ///
    /// The payment `UserID` filter looks up `user_delivery` links whose
    /// delivery still exists, like the SQL subselect does.
    pub fn in_memory() -> Self {
        let deliveries = InMemoryRepository::<DeliveryResource>::new();
        let user_delivery = InMemoryRepository::<UserDeliveryResource>::new();

        let links = user_delivery.clone();
        let known = deliveries.clone();
        let payments = InMemoryRepository::<PaymentResource>::new().with_relation(Arc::new(
            move |payment: &crate::models::Payment, filter: &crate::models::PaymentParams| {
                filter.user_id.as_ref().is_none_or(|user_id| {
                    known.contains(&payment.delivery_id)
                        && links.any(|link| {
                            &link.user_id == user_id && link.delivery_id == payment.delivery_id
                        })
                })
            },
        ));

        Self {
            users: Arc::new(InMemoryRepository::<UserResource>::new()),
            products: Arc::new(InMemoryRepository::<ProductResource>::new()),
            addresses: Arc::new(InMemoryRepository::<AddressResource>::new()),
            deliveries: Arc::new(deliveries),
            payments: Arc::new(payments),
            shopping_cart: Arc::new(InMemoryRepository::<ShoppingCartResource>::new()),
            user_address: Arc::new(InMemoryRepository::<UserAddressResource>::new()),
            user_delivery: Arc::new(user_delivery),
            delivery_product: Arc::new(InMemoryRepository::<DeliveryProductResource>::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryParams, PaymentParams, UserDeliveryParams};

    #[tokio::test]
    async fn test_in_memory_payment_user_filter_follows_links() {
        let repos = Repositories::in_memory();

        let delivery = repos
            .deliveries
            .create(DeliveryParams {
                user_id: Some("u1".to_string()),
                address_id: Some("a1".to_string()),
                ..DeliveryParams::default()
            })
            .await
            .unwrap();
        repos
            .user_delivery
            .create(UserDeliveryParams {
                delivery_id: Some(delivery.id.clone()),
                user_id: Some("u1".to_string()),
            })
            .await
            .unwrap();

        for delivery_id in [delivery.id.clone(), "unlinked".to_string()] {
            repos
                .payments
                .create(PaymentParams {
                    delivery_id: Some(delivery_id),
                    value: Some(10.0),
                    ..PaymentParams::default()
                })
                .await
                .unwrap();
        }

        let for_user = repos
            .payments
            .get_all(PaymentParams {
                user_id: Some("u1".to_string()),
                ..PaymentParams::default()
            })
            .await
            .unwrap();
        assert_eq!(for_user.len(), 1);
        assert_eq!(for_user[0].delivery_id, delivery.id);

        let nobody = repos
            .payments
            .get_all(PaymentParams {
                user_id: Some("u2".to_string()),
                ..PaymentParams::default()
            })
            .await
            .unwrap();
        assert!(nobody.is_empty());

        let all = repos.payments.get_all(PaymentParams::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
