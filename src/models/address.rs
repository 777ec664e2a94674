use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::AddressResponse;
use crate::models::resource::{Field, FieldKind, Resource, matches_eq, matches_like, resolve};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Address {
    pub id: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub complement: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// Optional-field address input. `Complement` and `Name` are never required.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct AddressParams {
    #[validate(required(message = "IsActive is required"))]
    pub is_active: Option<bool>,
    #[validate(required(message = "IsDeleted is required"))]
    pub is_deleted: Option<bool>,
    pub created_at: Option<String>,
    #[validate(required(message = "Street is required"), length(min = 1, message = "Street must not be empty"))]
    pub street: Option<String>,
    #[validate(required(message = "Number is required"), length(min = 1, message = "Number must not be empty"))]
    pub number: Option<String>,
    #[validate(required(message = "Neighborhood is required"), length(min = 1, message = "Neighborhood must not be empty"))]
    pub neighborhood: Option<String>,
    pub complement: Option<String>,
    #[validate(required(message = "City is required"), length(min = 1, message = "City must not be empty"))]
    pub city: Option<String>,
    #[validate(required(message = "State is required"), length(min = 1, message = "State must not be empty"))]
    pub state: Option<String>,
    #[validate(required(message = "Country is required"), length(min = 1, message = "Country must not be empty"))]
    pub country: Option<String>,
    #[validate(required(message = "Latitude is required"))]
    pub latitude: Option<f64>,
    #[validate(required(message = "Longitude is required"))]
    pub longitude: Option<f64>,
    pub name: Option<String>,
}

pub struct AddressResource;

impl Resource for AddressResource {
    const NAME: &'static str = "address";
    const BASE_PATH: &'static str = "/addresses";
    const FIELDS: &'static [Field] = &[
        Field::new("IsActive", "is_active", FieldKind::Bool),
        Field::new("IsDeleted", "is_deleted", FieldKind::Bool),
        Field::new("CreatedAt", "created_at", FieldKind::Text),
        Field::new("Street", "street", FieldKind::Text),
        Field::new("Number", "number", FieldKind::Text),
        Field::new("Neighborhood", "neighborhood", FieldKind::Text),
        Field::new("Complement", "complement", FieldKind::Text),
        Field::new("City", "city", FieldKind::Text),
        Field::new("State", "state", FieldKind::Text),
        Field::new("Country", "country", FieldKind::Text),
        Field::new("Latitude", "latitude", FieldKind::Float),
        Field::new("Longitude", "longitude", FieldKind::Float),
        Field::new("Name", "name", FieldKind::Text),
    ];
    const VALIDATION_ORDER: &'static [&'static str] = &[
        "is_active",
        "is_deleted",
        "street",
        "number",
        "neighborhood",
        "city",
        "state",
        "country",
        "latitude",
        "longitude",
    ];

    type Params = AddressParams;
    type Entity = Address;
    type Output = AddressResponse;

    fn id(entity: &Address) -> &str {
        &entity.id
    }

    fn build(id: String, created_at: String, params: AddressParams) -> Address {
        Address {
            id,
            is_active: params.is_active.unwrap_or_default(),
            is_deleted: params.is_deleted.unwrap_or_default(),
            created_at,
            street: params.street.unwrap_or_default(),
            number: params.number.unwrap_or_default(),
            neighborhood: params.neighborhood.unwrap_or_default(),
            complement: params.complement.unwrap_or_default(),
            city: params.city.unwrap_or_default(),
            state: params.state.unwrap_or_default(),
            country: params.country.unwrap_or_default(),
            latitude: params.latitude.unwrap_or_default(),
            longitude: params.longitude.unwrap_or_default(),
            name: params.name.unwrap_or_default(),
        }
    }

    fn merge(previous: Address, params: AddressParams) -> Address {
        Address {
            id: previous.id,
            is_active: resolve(params.is_active, previous.is_active),
            is_deleted: resolve(params.is_deleted, previous.is_deleted),
            created_at: previous.created_at,
            street: resolve(params.street, previous.street),
            number: resolve(params.number, previous.number),
            neighborhood: resolve(params.neighborhood, previous.neighborhood),
            complement: resolve(params.complement, previous.complement),
            city: resolve(params.city, previous.city),
            state: resolve(params.state, previous.state),
            country: resolve(params.country, previous.country),
            latitude: resolve(params.latitude, previous.latitude),
            longitude: resolve(params.longitude, previous.longitude),
            name: resolve(params.name, previous.name),
        }
    }

    fn matches(entity: &Address, filter: &AddressParams) -> bool {
        matches_eq(&filter.is_active, &entity.is_active)
            && matches_eq(&filter.is_deleted, &entity.is_deleted)
            && matches_eq(&filter.created_at, &entity.created_at)
            && matches_like(&filter.street, &entity.street)
            && matches_eq(&filter.number, &entity.number)
            && matches_like(&filter.neighborhood, &entity.neighborhood)
            && matches_like(&filter.complement, &entity.complement)
            && matches_like(&filter.city, &entity.city)
            && matches_eq(&filter.state, &entity.state)
            && matches_like(&filter.country, &entity.country)
            && matches_eq(&filter.latitude, &entity.latitude)
            && matches_eq(&filter.longitude, &entity.longitude)
            && matches_like(&filter.name, &entity.name)
    }

    fn empty() -> Address {
        Address {
            id: String::new(),
            is_active: false,
            is_deleted: false,
            created_at: String::new(),
            street: String::new(),
            number: String::new(),
            neighborhood: String::new(),
            complement: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            name: String::new(),
        }
    }
}
