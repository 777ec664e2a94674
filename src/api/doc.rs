//! OpenAPI document.
//!
//! The CRUD handlers are generic, so their operations are added by
//! [`ResourcePaths`] from each resource's path and field list instead of
//! per-handler `#[utoipa::path]` attributes.

use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{Array, ObjectBuilder, Schema, Type};
use utoipa::openapi::{ContentBuilder, Ref, RefOr, Required, ResponseBuilder};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::api::dto;
use crate::models::resource::FieldKind;
use crate::models::{
    AddressResource, DeliveryProductResource, DeliveryResource, PaymentResource,
    ProductResource, Resource, ShoppingCartResource, UserAddressResource, UserDeliveryResource,
    UserResource,
};

pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront",
        description = "CRUD API for products, users, addresses, deliveries, payments and carts",
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::liveness_check,
    ),
    modifiers(&ResourcePaths),
    components(
        schemas(
            dto::ErrorResponse,
            dto::health::HealthResponse,
            crate::models::ProductParams,
            crate::models::UserParams,
            crate::models::AddressParams,
            crate::models::DeliveryParams,
            crate::models::PaymentParams,
            crate::models::ShoppingCartParams,
            crate::models::UserAddressParams,
            crate::models::UserDeliveryParams,
            crate::models::DeliveryProductParams,
            dto::ProductResponse,
            dto::UserResponse,
            dto::AddressResponse,
            dto::DeliveryResponse,
            dto::PaymentResponse,
            dto::ShoppingCartResponse,
            dto::UserAddressResponse,
            dto::UserDeliveryResponse,
            dto::DeliveryProductResponse,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = "product", description = "Product catalogue"),
        (name = "user", description = "User accounts"),
        (name = "address", description = "Postal addresses"),
        (name = "delivery", description = "Deliveries of orders"),
        (name = "payment", description = "Payments for deliveries"),
        (name = "shopping_cart", description = "Cart lines"),
        (name = "user_address", description = "User to address links"),
        (name = "user_delivery", description = "User to delivery links"),
        (name = "delivery_product", description = "Products shipped in a delivery"),
    )
)]
pub struct ApiDoc;

/// Adds the CRUD operations of every resource.
pub struct ResourcePaths;

impl Modify for ResourcePaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        document::<ProductResource>(openapi);
        document::<UserResource>(openapi);
        document::<AddressResource>(openapi);
        document::<DeliveryResource>(openapi);
        document::<PaymentResource>(openapi);
        document::<ShoppingCartResource>(openapi);
        document::<UserAddressResource>(openapi);
        document::<UserDeliveryResource>(openapi);
        document::<DeliveryProductResource>(openapi);
    }
}

fn document<R: Resource>(openapi: &mut utoipa::openapi::OpenApi) {
    let params = R::Params::name();
    let output = R::Output::name();
    let collection = R::BASE_PATH.to_string();
    let item = format!("{}/{{id}}", R::BASE_PATH);

    let create = operation::<R>("create")
        .request_body(Some(
            RequestBodyBuilder::new()
                .content("application/json", json_content(Ref::from_schema_name(params.clone())))
                .required(Some(Required::True))
                .build(),
        ))
        .response("201", json_response("Created", Ref::from_schema_name(output.clone())))
        .response("400", error_response("Malformed body or failed validation"));
    openapi
        .paths
        .add_path_operation(&collection, vec![HttpMethod::Post], create.build());

    let list = with_filters::<R>(operation::<R>("list"))
        .response(
            "200",
            json_response(
                "Matching rows",
                Schema::Array(Array::new(Ref::from_schema_name(output.clone()))),
            ),
        )
        .response("400", error_response("Unknown filter or unparseable value"));
    openapi
        .paths
        .add_path_operation(&collection, vec![HttpMethod::Get], list.build());

    let delete_all = with_filters::<R>(operation::<R>("delete_all"))
        .response("200", count_response())
        .response("400", error_response("Unknown filter or unparseable value"));
    openapi
        .paths
        .add_path_operation(&collection, vec![HttpMethod::Delete], delete_all.build());

    let get_one = with_id(operation::<R>("get"))
        .response("200", json_response("The row", Ref::from_schema_name(output.clone())))
        .response("404", error_response("Not found"));
    openapi
        .paths
        .add_path_operation(&item, vec![HttpMethod::Get], get_one.build());

    let delete_one = with_id(operation::<R>("delete"))
        .response("200", count_response())
        .response("404", error_response("Not found"));
    openapi
        .paths
        .add_path_operation(&item, vec![HttpMethod::Delete], delete_one.build());

    if R::SUPPORTS_UPDATE {
        let update: Operation = with_id(operation::<R>("update"))
            .request_body(Some(
                RequestBodyBuilder::new()
                    .content("application/json", json_content(Ref::from_schema_name(params)))
                    .required(Some(Required::True))
                    .build(),
            ))
            .response("200", json_response("Updated row", Ref::from_schema_name(output)))
            .response("400", error_response("Malformed body"))
            .response("404", error_response("Not found"))
            .build();
        openapi
            .paths
            .add_path_operation(&item, vec![HttpMethod::Put], update);
    }
}

fn operation<R: Resource>(action: &str) -> OperationBuilder {
    OperationBuilder::new()
        .tag(R::NAME)
        .operation_id(Some(format!("{}_{}", action, R::NAME)))
}

fn with_id(builder: OperationBuilder) -> OperationBuilder {
    builder.parameter(
        ParameterBuilder::new()
            .name("id")
            .parameter_in(ParameterIn::Path)
            .required(Required::True)
            .schema(Some(ObjectBuilder::new().schema_type(Type::String))),
    )
}

fn with_filters<R: Resource>(builder: OperationBuilder) -> OperationBuilder {
    R::FIELDS
        .iter()
        .filter(|field| field.filter)
        .fold(builder, |builder, field| {
            let schema_type = match field.kind {
                FieldKind::Text => Type::String,
                FieldKind::Bool => Type::Boolean,
                FieldKind::Float => Type::Number,
                FieldKind::Int => Type::Integer,
            };
            builder.parameter(
                ParameterBuilder::new()
                    .name(field.name)
                    .parameter_in(ParameterIn::Query)
                    .required(Required::False)
                    .schema(Some(ObjectBuilder::new().schema_type(schema_type))),
            )
        })
}

fn json_content(schema: impl Into<RefOr<Schema>>) -> utoipa::openapi::Content {
    ContentBuilder::new().schema(Some(schema)).build()
}

fn json_response(description: &str, schema: impl Into<RefOr<Schema>>) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", json_content(schema))
        .build()
}

fn count_response() -> utoipa::openapi::Response {
    json_response(
        "Number of deleted rows",
        ObjectBuilder::new().schema_type(Type::Integer).build(),
    )
}

fn error_response(description: &str) -> utoipa::openapi::Response {
    json_response(description, Ref::from_schema_name("ErrorResponse"))
}
