use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::UserAddressResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, resolve};

/// Links a user to one of their addresses.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_address)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAddress {
    pub id: String,
    pub user_id: String,
    pub address_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserAddressParams {
    #[serde(rename = "UserID")]
    #[validate(
        required(message = "UserID is required"),
        length(min = 1, message = "UserID must not be empty")
    )]
    pub user_id: Option<String>,
    #[serde(rename = "AddressID")]
    #[validate(
        required(message = "AddressID is required"),
        length(min = 1, message = "AddressID must not be empty")
    )]
    pub address_id: Option<String>,
}

pub struct UserAddressResource;

impl Resource for UserAddressResource {
    const NAME: &'static str = "user_address";
    const BASE_PATH: &'static str = "/user_address";
    const SUPPORTS_UPDATE: bool = false;
    const FIELDS: &'static [Field] = &[
        Field::new("UserID", "user_id", FieldKind::Text),
        Field::new("AddressID", "address_id", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] = &["user_id", "address_id"];

    type Params = UserAddressParams;
    type Entity = UserAddress;
    type Output = UserAddressResponse;

    fn id(entity: &UserAddress) -> &str {
        &entity.id
    }

    fn build(id: String, _created_at: String, params: UserAddressParams) -> UserAddress {
        UserAddress {
            id,
            user_id: params.user_id.unwrap_or_default(),
            address_id: params.address_id.unwrap_or_default(),
        }
    }

    /// Unreachable over HTTP: `SUPPORTS_UPDATE` is false, so no `PUT` route exists.
    fn merge(previous: UserAddress, params: UserAddressParams) -> UserAddress {
        UserAddress {
            id: previous.id,
            user_id: resolve(params.user_id, previous.user_id),
            address_id: resolve(params.address_id, previous.address_id),
        }
    }

    fn matches(entity: &UserAddress, filter: &UserAddressParams) -> bool {
        matches_eq(&filter.user_id, &entity.user_id)
            && matches_eq(&filter.address_id, &entity.address_id)
    }

    fn empty() -> UserAddress {
        UserAddress {
            id: String::new(),
            user_id: String::new(),
            address_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::resource::validate_first;

    #[test]
    fn test_empty_ids_are_rejected() {
        let params = UserAddressParams {
            user_id: Some("u1".to_string()),
            address_id: Some(String::new()),
        };
        match validate_first::<UserAddressResource>(&params) {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "AddressID");
                assert_eq!(reason, "AddressID must not be empty");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_user_is_checked_first() {
        assert!(matches!(
            validate_first::<UserAddressResource>(&UserAddressParams::default()),
            Err(AppError::Validation { field, .. }) if field == "UserID"
        ));
    }

    #[test]
    fn test_matches_on_both_ids() {
        let link = UserAddressResource::build(
            "l1".into(),
            String::new(),
            UserAddressParams {
                user_id: Some("u1".to_string()),
                address_id: Some("a1".to_string()),
            },
        );
        let filter = UserAddressParams {
            user_id: Some("u1".to_string()),
            address_id: Some("a2".to_string()),
        };
        assert!(!UserAddressResource::matches(&link, &filter));
        assert!(UserAddressResource::matches(&link, &UserAddressParams::default()));
    }
}
