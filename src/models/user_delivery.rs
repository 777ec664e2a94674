use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::UserDeliveryResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, resolve};

/// Links a user to a delivery.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_delivery)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserDelivery {
    pub id: String,
    pub delivery_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserDeliveryParams {
    #[serde(rename = "DeliveryID")]
    #[validate(
        required(message = "DeliveryID is required"),
        length(min = 1, message = "DeliveryID must not be empty")
    )]
    pub delivery_id: Option<String>,
    #[serde(rename = "UserID")]
    #[validate(
        required(message = "UserID is required"),
        length(min = 1, message = "UserID must not be empty")
    )]
    pub user_id: Option<String>,
}

pub struct UserDeliveryResource;

impl Resource for UserDeliveryResource {
    const NAME: &'static str = "user_delivery";
    const BASE_PATH: &'static str = "/user_delivery";
    const SUPPORTS_UPDATE: bool = false;
    const FIELDS: &'static [Field] = &[
        Field::new("DeliveryID", "delivery_id", FieldKind::Text),
        Field::new("UserID", "user_id", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] = &["delivery_id", "user_id"];

    type Params = UserDeliveryParams;
    type Entity = UserDelivery;
    type Output = UserDeliveryResponse;

    fn id(entity: &UserDelivery) -> &str {
        &entity.id
    }

    fn build(id: String, _created_at: String, params: UserDeliveryParams) -> UserDelivery {
        UserDelivery {
            id,
            delivery_id: params.delivery_id.unwrap_or_default(),
            user_id: params.user_id.unwrap_or_default(),
        }
    }

    /// Unreachable over HTTP: `SUPPORTS_UPDATE` is false, so no `PUT` route exists.
    fn merge(previous: UserDelivery, params: UserDeliveryParams) -> UserDelivery {
        UserDelivery {
            id: previous.id,
            delivery_id: resolve(params.delivery_id, previous.delivery_id),
            user_id: resolve(params.user_id, previous.user_id),
        }
    }

    fn matches(entity: &UserDelivery, filter: &UserDeliveryParams) -> bool {
        matches_eq(&filter.delivery_id, &entity.delivery_id)
            && matches_eq(&filter.user_id, &entity.user_id)
    }

    fn empty() -> UserDelivery {
        UserDelivery {
            id: String::new(),
            delivery_id: String::new(),
            user_id: String::new(),
        }
    }
}
