use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ProductResponse;
use crate::models::resource::{
    Field, FieldKind, Resource, matches_eq, matches_like, not_blank, resolve, round2,
};

/// Product row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: String,
    pub weight_grams: f64,
    pub price: f64,
    pub name: String,
}

/// Optional-field product input for create, filter and update.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductParams {
    #[validate(required(message = "IsActive is required"))]
    pub is_active: Option<bool>,
    #[validate(required(message = "IsDeleted is required"))]
    pub is_deleted: Option<bool>,
    pub created_at: Option<String>,
    #[validate(
        required(message = "WeightGrams is required"),
        range(exclusive_min = 0.0, message = "WeightGrams must be greater than 0")
    )]
    pub weight_grams: Option<f64>,
    #[validate(
        required(message = "Price is required"),
        range(exclusive_min = 0.0, message = "Price must be greater than 0")
    )]
    pub price: Option<f64>,
    #[validate(
        required(message = "Name is required"),
        custom(function = "not_blank", message = "Name must not be blank")
    )]
    pub name: Option<String>,
}

pub struct ProductResource;

impl Resource for ProductResource {
    const NAME: &'static str = "product";
    const BASE_PATH: &'static str = "/products";
    const FIELDS: &'static [Field] = &[
        Field::new("IsActive", "is_active", FieldKind::Bool),
        Field::new("IsDeleted", "is_deleted", FieldKind::Bool),
        Field::new("CreatedAt", "created_at", FieldKind::Text),
        Field::new("WeightGrams", "weight_grams", FieldKind::Float),
        Field::new("Price", "price", FieldKind::Float),
        Field::new("Name", "name", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] =
        &["is_active", "is_deleted", "name", "weight_grams", "price"];

    type Params = ProductParams;
    type Entity = Product;
    type Output = ProductResponse;

    fn id(entity: &Product) -> &str {
        &entity.id
    }

    fn build(id: String, created_at: String, params: ProductParams) -> Product {
        Product {
            id,
            is_active: params.is_active.unwrap_or_default(),
            is_deleted: params.is_deleted.unwrap_or_default(),
            created_at,
            weight_grams: round2(params.weight_grams.unwrap_or_default()),
            price: round2(params.price.unwrap_or_default()),
            name: params.name.unwrap_or_default(),
        }
    }

    fn merge(previous: Product, params: ProductParams) -> Product {
        Product {
            id: previous.id,
            is_active: resolve(params.is_active, previous.is_active),
            is_deleted: resolve(params.is_deleted, previous.is_deleted),
            created_at: previous.created_at,
            weight_grams: round2(resolve(params.weight_grams, previous.weight_grams)),
            price: round2(resolve(params.price, previous.price)),
            name: resolve(params.name, previous.name),
        }
    }

    fn matches(entity: &Product, filter: &ProductParams) -> bool {
        matches_eq(&filter.is_active, &entity.is_active)
            && matches_eq(&filter.is_deleted, &entity.is_deleted)
            && matches_eq(&filter.created_at, &entity.created_at)
            && matches_eq(&filter.weight_grams.map(round2), &entity.weight_grams)
            && matches_eq(&filter.price.map(round2), &entity.price)
            && matches_like(&filter.name, &entity.name)
    }

    fn empty() -> Product {
        Product {
            id: String::new(),
            is_active: false,
            is_deleted: false,
            created_at: String::new(),
            weight_grams: 0.0,
            price: 0.0,
            name: String::new(),
        }
    }
}
