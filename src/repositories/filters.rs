//! SQL predicates built from parameter models.
//!
//! One function per table. Each present attribute becomes one predicate;
//! absent attributes add nothing, so an empty filter selects every row.

use diesel::expression::BoxableExpression;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::models::resource::{like_pattern, round2};
use crate::models::{
    AddressParams, DeliveryParams, DeliveryProductParams, PaymentParams, ProductParams,
    ShoppingCartParams, UserAddressParams, UserDeliveryParams, UserParams,
};
use crate::schema::{
    addresses, deliveries, delivery_product, payments, products, shopping_cart, user_address,
    user_delivery, users,
};

/// A single boxed `WHERE` term over `T`.
pub type Predicate<T> = Box<dyn BoxableExpression<T, Pg, SqlType = Bool>>;

macro_rules! push_eq {
    ($predicates:ident, $value:expr, $column:expr) => {
        if let Some(value) = $value {
            $predicates.push(Box::new($column.eq(value)));
        }
    };
}

macro_rules! push_like {
    ($predicates:ident, $value:expr, $column:expr) => {
        if let Some(value) = $value {
            $predicates.push(Box::new($column.like(like_pattern(value))));
        }
    };
}

pub fn product(filter: &ProductParams) -> Vec<Predicate<products::table>> {
    let mut predicates: Vec<Predicate<products::table>> = Vec::new();
    push_eq!(predicates, filter.is_active, products::is_active);
    push_eq!(predicates, filter.is_deleted, products::is_deleted);
    push_eq!(predicates, filter.created_at.clone(), products::created_at);
    push_eq!(predicates, filter.weight_grams.map(round2), products::weight_grams);
    push_eq!(predicates, filter.price.map(round2), products::price);
    push_like!(predicates, &filter.name, products::name);
    predicates
}

pub fn user(filter: &UserParams) -> Vec<Predicate<users::table>> {
    let mut predicates: Vec<Predicate<users::table>> = Vec::new();
    push_eq!(predicates, filter.is_active, users::is_active);
    push_eq!(predicates, filter.is_deleted, users::is_deleted);
    push_eq!(predicates, filter.created_at.clone(), users::created_at);
    push_like!(predicates, &filter.email, users::email);
    push_eq!(predicates, filter.cpf.clone(), users::cpf);
    push_like!(predicates, &filter.name, users::name);
    predicates
}

pub fn address(filter: &AddressParams) -> Vec<Predicate<addresses::table>> {
    let mut predicates: Vec<Predicate<addresses::table>> = Vec::new();
    push_eq!(predicates, filter.is_active, addresses::is_active);
    push_eq!(predicates, filter.is_deleted, addresses::is_deleted);
    push_eq!(predicates, filter.created_at.clone(), addresses::created_at);
    push_like!(predicates, &filter.street, addresses::street);
    push_eq!(predicates, filter.number.clone(), addresses::number);
    push_like!(predicates, &filter.neighborhood, addresses::neighborhood);
    push_like!(predicates, &filter.complement, addresses::complement);
    push_like!(predicates, &filter.city, addresses::city);
    push_eq!(predicates, filter.state.clone(), addresses::state);
    push_like!(predicates, &filter.country, addresses::country);
    push_eq!(predicates, filter.latitude, addresses::latitude);
    push_eq!(predicates, filter.longitude, addresses::longitude);
    push_like!(predicates, &filter.name, addresses::name);
    predicates
}

pub fn delivery(filter: &DeliveryParams) -> Vec<Predicate<deliveries::table>> {
    let mut predicates: Vec<Predicate<deliveries::table>> = Vec::new();
    push_eq!(predicates, filter.is_active, deliveries::is_active);
    push_eq!(predicates, filter.is_deleted, deliveries::is_deleted);
    push_eq!(predicates, filter.created_at.clone(), deliveries::created_at);
    push_eq!(predicates, filter.user_id.clone(), deliveries::user_id);
    push_eq!(predicates, filter.address_id.clone(), deliveries::address_id);
    predicates
}

/// `UserID` keeps payments whose delivery is linked to that user in
/// `user_delivery` and still exists in `deliveries`.
pub fn payment(filter: &PaymentParams) -> Vec<Predicate<payments::table>> {
    let mut predicates: Vec<Predicate<payments::table>> = Vec::new();
    push_eq!(predicates, filter.is_deleted, payments::is_deleted);
    push_eq!(predicates, filter.created_at.clone(), payments::created_at);
    push_eq!(predicates, filter.delivery_id.clone(), payments::delivery_id);
    push_eq!(predicates, filter.value.map(round2), payments::value);

    if let Some(user_id) = filter.user_id.clone() {
        let linked = user_delivery::table
            .inner_join(deliveries::table)
            .filter(user_delivery::user_id.eq(user_id))
            .select(deliveries::id);
        predicates.push(Box::new(payments::delivery_id.eq_any(linked)));
    }
    predicates
}

pub fn shopping_cart(filter: &ShoppingCartParams) -> Vec<Predicate<shopping_cart::table>> {
    let mut predicates: Vec<Predicate<shopping_cart::table>> = Vec::new();
    push_eq!(predicates, filter.user_id.clone(), shopping_cart::user_id);
    push_eq!(predicates, filter.product_id.clone(), shopping_cart::product_id);
    predicates
}

pub fn user_address(filter: &UserAddressParams) -> Vec<Predicate<user_address::table>> {
    let mut predicates: Vec<Predicate<user_address::table>> = Vec::new();
    push_eq!(predicates, filter.user_id.clone(), user_address::user_id);
    push_eq!(predicates, filter.address_id.clone(), user_address::address_id);
    predicates
}

pub fn user_delivery(filter: &UserDeliveryParams) -> Vec<Predicate<user_delivery::table>> {
    let mut predicates: Vec<Predicate<user_delivery::table>> = Vec::new();
    push_eq!(predicates, filter.delivery_id.clone(), user_delivery::delivery_id);
    push_eq!(predicates, filter.user_id.clone(), user_delivery::user_id);
    predicates
}

pub fn delivery_product(
    filter: &DeliveryProductParams,
) -> Vec<Predicate<delivery_product::table>> {
    let mut predicates: Vec<Predicate<delivery_product::table>> = Vec::new();
    push_eq!(predicates, filter.delivery_id.clone(), delivery_product::delivery_id);
    push_eq!(predicates, filter.product_id.clone(), delivery_product::product_id);
    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    fn product_sql(filter: &ProductParams) -> String {
        let mut query = products::table.select(products::id).into_boxed();
        for predicate in product(filter) {
            query = query.filter(predicate);
        }
        debug_query::<Pg, _>(&query).to_string()
    }

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        assert!(product(&ProductParams::default()).is_empty());
        assert!(!product_sql(&ProductParams::default()).contains("WHERE"));
    }

    #[test]
    fn test_name_uses_like_with_wildcards() {
        let sql = product_sql(&ProductParams {
            name: Some("Coffee".to_string()),
            ..ProductParams::default()
        });
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("%Coffee%"));
    }

    #[test]
    fn test_price_is_rounded_before_comparison() {
        let sql = product_sql(&ProductParams {
            price: Some(1.239),
            ..ProductParams::default()
        });
        assert!(sql.contains("1.24"));
    }

    #[test]
    fn test_one_predicate_per_present_attribute() {
        let filter = AddressParams {
            city: Some("Recife".to_string()),
            state: Some("PE".to_string()),
            latitude: Some(-8.05),
            ..AddressParams::default()
        };
        assert_eq!(address(&filter).len(), 3);
    }

    #[test]
    fn test_filtered_delete_statement() {
        let filter = ProductParams {
            name: Some("Tea".to_string()),
            is_active: Some(true),
            ..ProductParams::default()
        };
        let mut statement = diesel::delete(products::table).into_boxed();
        for predicate in product(&filter) {
            statement = statement.filter(predicate);
        }
        let sql = debug_query::<Pg, _>(&statement).to_string();

        assert!(sql.starts_with("DELETE FROM \"products\""));
        assert!(sql.contains("\"is_active\" = $1"));
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("%Tea%"));
    }

    #[test]
    fn test_unfiltered_delete_statement_has_no_where_clause() {
        let mut statement = diesel::delete(payments::table).into_boxed();
        for predicate in payment(&PaymentParams::default()) {
            statement = statement.filter(predicate);
        }
        let sql = debug_query::<Pg, _>(&statement).to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_update_statement_keeps_id_out_of_set_clause() {
        let row = crate::models::Product {
            id: "p1".to_string(),
            is_active: true,
            is_deleted: false,
            created_at: "2024-01-01 00:00:00".to_string(),
            weight_grams: 250.0,
            price: 4.56,
            name: "Tea".to_string(),
        };
        let statement = diesel::update(products::table.find("p1"))
            .set(&row)
            .returning(crate::models::Product::as_returning());
        let sql = debug_query::<Pg, _>(&statement).to_string();

        assert!(sql.starts_with("UPDATE \"products\" SET"));
        assert!(sql.contains("\"price\" = $"));
        assert!(!sql.contains("SET \"id\""));
        assert!(sql.contains("WHERE"));
        assert!(sql.contains("\"products\".\"id\" = $"));
        assert!(sql.contains("RETURNING"));
    }

    #[test]
    fn test_payment_user_filter_uses_subselect() {
        let filter = PaymentParams {
            user_id: Some("u1".to_string()),
            ..PaymentParams::default()
        };
        let mut query = payments::table.select(payments::id).into_boxed();
        for predicate in payment(&filter) {
            query = query.filter(predicate);
        }
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"user_delivery\""));
        assert!(sql.contains("\"deliveries\""));
    }
}
