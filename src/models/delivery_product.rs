use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::DeliveryProductResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, resolve};

/// A product line shipped in a delivery.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::delivery_product)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryProduct {
    pub id: String,
    pub delivery_id: String,
    pub product_id: String,
    pub product_amount: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct DeliveryProductParams {
    #[serde(rename = "DeliveryID")]
    #[validate(required(message = "DeliveryID is required"))]
    pub delivery_id: Option<String>,
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

pub struct DeliveryProductResource;

impl Resource for DeliveryProductResource {
    const NAME: &'static str = "delivery_product";
    const BASE_PATH: &'static str = "/delivery_product";
    const SUPPORTS_UPDATE: bool = false;
    const FIELDS: &'static [Field] = &[
        Field::new("DeliveryID", "delivery_id", FieldKind::Text),
        Field::new("ProductID", "product_id", FieldKind::Text),
        Field::input("ProductAmount", "product_amount", FieldKind::Int),
    ];
    const VALIDATION_ORDER: &'static [&'static str] =
        &["delivery_id", "product_id", "product_amount"];

    type Params = DeliveryProductParams;
    type Entity = DeliveryProduct;
    type Output = DeliveryProductResponse;

    fn id(entity: &DeliveryProduct) -> &str {
        &entity.id
    }

    fn build(id: String, _created_at: String, params: DeliveryProductParams) -> DeliveryProduct {
        DeliveryProduct {
            id,
            delivery_id: params.delivery_id.unwrap_or_default(),
            product_id: params.product_id.unwrap_or_default(),
            product_amount: params.product_amount.unwrap_or_default(),
        }
    }

    /// Unreachable over HTTP: `SUPPORTS_UPDATE` is false, so no `PUT` route exists.
    fn merge(previous: DeliveryProduct, params: DeliveryProductParams) -> DeliveryProduct {
        DeliveryProduct {
            id: previous.id,
            delivery_id: resolve(params.delivery_id, previous.delivery_id),
            product_id: resolve(params.product_id, previous.product_id),
            product_amount: resolve(params.product_amount, previous.product_amount),
        }
    }

    fn matches(entity: &DeliveryProduct, filter: &DeliveryProductParams) -> bool {
        matches_eq(&filter.delivery_id, &entity.delivery_id)
            && matches_eq(&filter.product_id, &entity.product_id)
    }

    fn empty() -> DeliveryProduct {
        DeliveryProduct {
            id: String::new(),
            delivery_id: String::new(),
            product_id: String::new(),
            product_amount: 0,
        }
    }
}
