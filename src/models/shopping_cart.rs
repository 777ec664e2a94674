use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ShoppingCartResponse;
use crate::error::{AppError, AppResult};
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, resolve};

/// One product line in a user's cart.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::shopping_cart)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShoppingCart {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub product_amount: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ShoppingCartParams {
    #[serde(rename = "UserID")]
    #[validate(required(message = "UserID is required"))]
    pub user_id: Option<String>,
    #[serde(rename = "ProductID")]
    #[validate(required(message = "ProductID is required"))]
    pub product_id: Option<String>,
    #[serde(rename = "ProductAmount")]
    #[validate(
        required(message = "ProductAmount is required"),
        range(min = 0, message = "ProductAmount must not be negative")
    )]
    pub product_amount: Option<i32>,
}

pub struct ShoppingCartResource;

impl Resource for ShoppingCartResource {
    const NAME: &'static str = "shopping_cart";
    const BASE_PATH: &'static str = "/cart";
    const FIELDS: &'static [Field] = &[
        Field::new("UserID", "user_id", FieldKind::Text),
        Field::new("ProductID", "product_id", FieldKind::Text),
        Field::input("ProductAmount", "product_amount", FieldKind::Int),
    ];
    const VALIDATION_ORDER: &'static [&'static str] = &["user_id", "product_id", "product_amount"];

    type Params = ShoppingCartParams;
    type Entity = ShoppingCart;
    type Output = ShoppingCartResponse;

    fn id(entity: &ShoppingCart) -> &str {
        &entity.id
    }

    fn build(id: String, _created_at: String, params: ShoppingCartParams) -> ShoppingCart {
        ShoppingCart {
            id,
            user_id: params.user_id.unwrap_or_default(),
            product_id: params.product_id.unwrap_or_default(),
            product_amount: params.product_amount.unwrap_or_default(),
        }
    }

    fn merge(previous: ShoppingCart, params: ShoppingCartParams) -> ShoppingCart {
        ShoppingCart {
            id: previous.id,
            user_id: resolve(params.user_id, previous.user_id),
            product_id: resolve(params.product_id, previous.product_id),
            product_amount: resolve(params.product_amount, previous.product_amount),
        }
    }

    fn matches(entity: &ShoppingCart, filter: &ShoppingCartParams) -> bool {
        matches_eq(&filter.user_id, &entity.user_id)
            && matches_eq(&filter.product_id, &entity.product_id)
    }

    fn check(merged: &ShoppingCart) -> AppResult<()> {
        if merged.product_amount < 0 {
            return Err(AppError::Validation {
                field: "ProductAmount".to_string(),
                reason: "ProductAmount must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Setting the amount to zero removes the line from the cart.
    fn discards_on_update(merged: &ShoppingCart) -> bool {
        merged.product_amount == 0
    }

    fn empty() -> ShoppingCart {
        ShoppingCart {
            id: String::new(),
            user_id: String::new(),
            product_id: String::new(),
            product_amount: 0,
        }
    }
}
