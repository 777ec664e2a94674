use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::DeliveryResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, resolve};

/// Delivery of an order to one of a user's addresses.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Delivery {
    pub id: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: String,
    pub user_id: String,
    pub address_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct DeliveryParams {
    #[serde(rename = "IsActive")]
    pub is_active: Option<bool>,
    #[serde(rename = "IsDeleted")]
    pub is_deleted: Option<bool>,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
    #[serde(rename = "UserID")]
    #[validate(required(message = "UserID is required"))]
    pub user_id: Option<String>,
    #[serde(rename = "AddressID")]
    #[validate(required(message = "AddressID is required"))]
    pub address_id: Option<String>,
}

pub struct DeliveryResource;

impl Resource for DeliveryResource {
    const NAME: &'static str = "delivery";
    const BASE_PATH: &'static str = "/deliveries";
    const FIELDS: &'static [Field] = &[
        Field::new("IsActive", "is_active", FieldKind::Bool),
        Field::new("IsDeleted", "is_deleted", FieldKind::Bool),
        Field::new("CreatedAt", "created_at", FieldKind::Text),
        Field::new("UserID", "user_id", FieldKind::Text),
        Field::new("AddressID", "address_id", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] = &["user_id", "address_id"];

    type Params = DeliveryParams;
    type Entity = Delivery;
    type Output = DeliveryResponse;

    fn id(entity: &Delivery) -> &str {
        &entity.id
    }

    fn build(id: String, created_at: String, params: DeliveryParams) -> Delivery {
        Delivery {
            id,
            is_active: params.is_active.unwrap_or_default(),
            is_deleted: params.is_deleted.unwrap_or_default(),
            created_at,
            user_id: params.user_id.unwrap_or_default(),
            address_id: params.address_id.unwrap_or_default(),
        }
    }

    fn merge(previous: Delivery, params: DeliveryParams) -> Delivery {
        Delivery {
            id: previous.id,
            is_active: resolve(params.is_active, previous.is_active),
            is_deleted: resolve(params.is_deleted, previous.is_deleted),
            created_at: previous.created_at,
            user_id: resolve(params.user_id, previous.user_id),
            address_id: resolve(params.address_id, previous.address_id),
        }
    }

    fn matches(entity: &Delivery, filter: &DeliveryParams) -> bool {
        matches_eq(&filter.is_active, &entity.is_active)
            && matches_eq(&filter.is_deleted, &entity.is_deleted)
            && matches_eq(&filter.created_at, &entity.created_at)
            && matches_eq(&filter.user_id, &entity.user_id)
            && matches_eq(&filter.address_id, &entity.address_id)
    }

    fn empty() -> Delivery {
        Delivery {
            id: String::new(),
            is_active: false,
            is_deleted: false,
            created_at: String::new(),
            user_id: String::new(),
            address_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::validate_first;

    #[test]
    fn test_flags_default_to_false() {
        let delivery = DeliveryResource::build(
            "d1".into(),
            "2024-01-01 00:00:00".into(),
            DeliveryParams {
                user_id: Some("u1".to_string()),
                address_id: Some("a1".to_string()),
                ..DeliveryParams::default()
            },
        );
        assert!(!delivery.is_active);
        assert!(!delivery.is_deleted);
    }

    #[test]
    fn test_user_can_be_reassigned() {
        let previous = DeliveryResource::build(
            "d1".into(),
            "2024-01-01 00:00:00".into(),
            DeliveryParams {
                user_id: Some("u1".to_string()),
                address_id: Some("a1".to_string()),
                ..DeliveryParams::default()
            },
        );
        let merged = DeliveryResource::merge(
            previous,
            DeliveryParams {
                user_id: Some("u2".to_string()),
                ..DeliveryParams::default()
            },
        );
        assert_eq!(merged.user_id, "u2");
        assert_eq!(merged.address_id, "a1");
    }

    #[test]
    fn test_json_uses_id_suffix_names() {
        let params: DeliveryParams =
            serde_json::from_str(r#"{"UserID":"u1","AddressID":"a1","IsActive":true}"#).unwrap();
        assert_eq!(params.user_id.as_deref(), Some("u1"));
        assert_eq!(params.address_id.as_deref(), Some("a1"));
        assert!(validate_first::<DeliveryResource>(&params).is_ok());
    }
}
