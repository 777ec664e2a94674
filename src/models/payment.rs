use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::PaymentResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, resolve, round2};

/// Payment for a delivery. Payments are never updated in place.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Payment {
    pub id: String,
    pub is_deleted: bool,
    pub created_at: String,
    pub delivery_id: String,
    pub value: f64,
}

/// `UserID` is filter-only: it selects payments whose delivery is linked to
/// the user through `user_delivery`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PaymentParams {
    #[serde(rename = "IsDeleted")]
    pub is_deleted: Option<bool>,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
    #[serde(rename = "DeliveryID")]
    #[validate(required(message = "DeliveryID is required"))]
    pub delivery_id: Option<String>,
    #[serde(rename = "Value")]
    #[validate(
        required(message = "Value is required"),
        range(exclusive_min = 0.0, message = "Value must be greater than 0")
    )]
    pub value: Option<f64>,
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
}

pub struct PaymentResource;

impl Resource for PaymentResource {
    const NAME: &'static str = "payment";
    const BASE_PATH: &'static str = "/payment";
    const SUPPORTS_UPDATE: bool = false;
    const FIELDS: &'static [Field] = &[
        Field::new("IsDeleted", "is_deleted", FieldKind::Bool),
        Field::new("CreatedAt", "created_at", FieldKind::Text),
        Field::new("DeliveryID", "delivery_id", FieldKind::Text),
        Field::new("Value", "value", FieldKind::Float),
        Field::new("UserID", "user_id", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] = &["delivery_id", "value"];

    type Params = PaymentParams;
    type Entity = Payment;
    type Output = PaymentResponse;

    fn id(entity: &Payment) -> &str {
        &entity.id
    }

    fn build(id: String, created_at: String, params: PaymentParams) -> Payment {
        Payment {
            id,
            is_deleted: params.is_deleted.unwrap_or_default(),
            created_at,
            delivery_id: params.delivery_id.unwrap_or_default(),
            value: round2(params.value.unwrap_or_default()),
        }
    }

    /// Unreachable over HTTP: `SUPPORTS_UPDATE` is false, so no `PUT` route exists.
    fn merge(previous: Payment, params: PaymentParams) -> Payment {
        Payment {
            id: previous.id,
            is_deleted: resolve(params.is_deleted, previous.is_deleted),
            created_at: previous.created_at,
            delivery_id: resolve(params.delivery_id, previous.delivery_id),
            value: round2(resolve(params.value, previous.value)),
        }
    }

    /// `UserID` is resolved through `user_delivery` by the repository, not here.
    fn matches(entity: &Payment, filter: &PaymentParams) -> bool {
        matches_eq(&filter.is_deleted, &entity.is_deleted)
            && matches_eq(&filter.created_at, &entity.created_at)
            && matches_eq(&filter.delivery_id, &entity.delivery_id)
            && matches_eq(&filter.value.map(round2), &entity.value)
    }

    fn empty() -> Payment {
        Payment {
            id: String::new(),
            is_deleted: false,
            created_at: String::new(),
            delivery_id: String::new(),
            value: 0.0,
        }
    }
}
