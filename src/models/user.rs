use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::UserResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, matches_like, resolve};

/// User account row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: String,
    pub email: String,
    pub cpf: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserParams {
    #[validate(required(message = "IsActive is required"))]
    pub is_active: Option<bool>,
    #[validate(required(message = "IsDeleted is required"))]
    pub is_deleted: Option<bool>,
    pub created_at: Option<String>,
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email must not be empty")
    )]
    pub email: Option<String>,
    /// Brazilian taxpayer id.
    #[validate(
        required(message = "Cpf is required"),
        length(min = 1, message = "Cpf must not be empty")
    )]
    pub cpf: Option<String>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name must not be empty")
    )]
    pub name: Option<String>,
}

pub struct UserResource;

impl Resource for UserResource {
    const NAME: &'static str = "user";
    const BASE_PATH: &'static str = "/users";
    const FIELDS: &'static [Field] = &[
        Field::new("IsActive", "is_active", FieldKind::Bool),
        Field::new("IsDeleted", "is_deleted", FieldKind::Bool),
        Field::new("CreatedAt", "created_at", FieldKind::Text),
        Field::new("Email", "email", FieldKind::Text),
        Field::new("Cpf", "cpf", FieldKind::Text),
        Field::new("Name", "name", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] =
        &["name", "email", "cpf", "is_active", "is_deleted"];

    type Params = UserParams;
    type Entity = User;
    type Output = UserResponse;

    fn id(entity: &User) -> &str {
        &entity.id
    }

    fn build(id: String, created_at: String, params: UserParams) -> User {
        User {
            id,
            is_active: params.is_active.unwrap_or_default(),
            is_deleted: params.is_deleted.unwrap_or_default(),
            created_at,
            email: params.email.unwrap_or_default(),
            cpf: params.cpf.unwrap_or_default(),
            name: params.name.unwrap_or_default(),
        }
    }

    fn merge(previous: User, params: UserParams) -> User {
        User {
            id: previous.id,
            is_active: resolve(params.is_active, previous.is_active),
            is_deleted: resolve(params.is_deleted, previous.is_deleted),
            created_at: previous.created_at,
            email: resolve(params.email, previous.email),
            cpf: resolve(params.cpf, previous.cpf),
            name: resolve(params.name, previous.name),
        }
    }

    fn matches(entity: &User, filter: &UserParams) -> bool {
        matches_eq(&filter.is_active, &entity.is_active)
            && matches_eq(&filter.is_deleted, &entity.is_deleted)
            && matches_eq(&filter.created_at, &entity.created_at)
            && matches_like(&filter.email, &entity.email)
            && matches_eq(&filter.cpf, &entity.cpf)
            && matches_like(&filter.name, &entity.name)
    }

    fn empty() -> User {
        User {
            id: String::new(),
            is_active: false,
            is_deleted: false,
            created_at: String::new(),
            email: String::new(),
            cpf: String::new(),
            name: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::resource::validate_first;

    #[test]
    fn test_name_is_checked_before_flags() {
        let params = UserParams {
            email: Some("ana@example.com".to_string()),
            cpf: Some("12345678900".to_string()),
            ..UserParams::default()
        };

        match validate_first::<UserResource>(&params) {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "Name");
                assert_eq!(reason, "Name is required");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_email_is_rejected() {
        let params = UserParams {
            name: Some("Ana".to_string()),
            email: Some(String::new()),
            cpf: Some("1".to_string()),
            is_active: Some(true),
            is_deleted: Some(false),
            ..UserParams::default()
        };

        assert!(matches!(
            validate_first::<UserResource>(&params),
            Err(AppError::Validation { field, .. }) if field == "Email"
        ));
    }

    #[test]
    fn test_cpf_filter_is_exact() {
        let user = UserResource::build(
            "u1".into(),
            "2024-01-01 00:00:00".into(),
            UserParams {
                cpf: Some("12345678900".to_string()),
                email: Some("ana@example.com".to_string()),
                ..UserParams::default()
            },
        );

        let partial_cpf = UserParams {
            cpf: Some("123".to_string()),
            ..UserParams::default()
        };
        assert!(!UserResource::matches(&user, &partial_cpf));

        let partial_email = UserParams {
            email: Some("@example".to_string()),
            ..UserParams::default()
        };
        assert!(UserResource::matches(&user, &partial_email));
    }
}
