//! Router configuration for the API.

use axum::http::{Method, header};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::health::health_routes;
use crate::api::handlers::resources::resource_routes;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::models::{
    AddressResource, DeliveryProductResource, DeliveryResource, PaymentResource,
    ProductResource, Resource, ShoppingCartResource, UserAddressResource, UserDeliveryResource,
    UserResource,
};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run in reverse order of declaration:
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. CORS
///
/// # Routes
/// - `/products`, `/users`, `/addresses`, `/deliveries`, `/payment`, `/cart`,
///   `/user_address`, `/user_delivery`, `/delivery_product`
/// - `/health`, `/health/live`
/// - `/swagger-ui`, `/api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let repos = state.repositories.clone();

    Router::new()
        .merge(health_routes())
        .nest(
            ProductResource::BASE_PATH,
            resource_routes::<ProductResource, _>(repos.products),
        )
        .nest(
            UserResource::BASE_PATH,
            resource_routes::<UserResource, _>(repos.users),
        )
        .nest(
            AddressResource::BASE_PATH,
            resource_routes::<AddressResource, _>(repos.addresses),
        )
        .nest(
            DeliveryResource::BASE_PATH,
            resource_routes::<DeliveryResource, _>(repos.deliveries),
        )
        .nest(
            PaymentResource::BASE_PATH,
            resource_routes::<PaymentResource, _>(repos.payments),
        )
        .nest(
            ShoppingCartResource::BASE_PATH,
            resource_routes::<ShoppingCartResource, _>(repos.shopping_cart),
        )
        .nest(
            UserAddressResource::BASE_PATH,
            resource_routes::<UserAddressResource, _>(repos.user_address),
        )
        .nest(
            UserDeliveryResource::BASE_PATH,
            resource_routes::<UserDeliveryResource, _>(repos.user_delivery),
        )
        .nest(
            DeliveryProductResource::BASE_PATH,
            resource_routes::<DeliveryProductResource, _>(repos.delivery_product),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Any origin; GET, POST, PUT and DELETE; `Content-Type` only.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::in_memory())
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn product(name: &str, price: f64) -> Value {
        json!({
            "IsActive": true,
            "IsDeleted": false,
            "WeightGrams": 250.0,
            "Price": price,
            "Name": name
        })
    }

    fn address(city: &str) -> Value {
        json!({
            "IsActive": true,
            "IsDeleted": false,
            "Street": "Rua A",
            "Number": "10",
            "Neighborhood": "Centro",
            "City": city,
            "State": "PE",
            "Country": "Brazil",
            "Latitude": -8.05,
            "Longitude": -34.9
        })
    }

    #[tokio::test]
    async fn test_create_product_returns_created_row() {
        let router = app();
        let response = send(&router, "POST", "/products", Some(product("Coffee", 19.999))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key("x-request-id"));
        let body = json_body(response).await;
        assert_eq!(body["Name"], "Coffee");
        assert_eq!(body["Price"], 20.0);
        assert_eq!(body["Id"].as_str().unwrap().len(), 36);
        assert_eq!(body["CreatedAt"].as_str().unwrap().len(), 19);
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected_with_first_field() {
        let router = app();
        let mut body = product("", 5.0);
        body["WeightGrams"] = json!(0);

        let response = send(&router, "POST", "/products", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["details"]["field"], "Name");

        let response = send(&router, "GET", "/products", None).await;
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let router = app();
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_all_filters_and_rejects_unknown_keys() {
        let router = app();
        for (name, price) in [("Green tea", 4.0), ("Coffee", 9.0), ("Black tea", 5.0)] {
            send(&router, "POST", "/products", Some(product(name, price))).await;
        }

        let response = send(&router, "GET", "/products?name=tea", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);

        let response = send(&router, "GET", "/products", None).await;
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);

        let response = send(&router, "GET", "/products?colour=red", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&router, "GET", "/products?Price=cheap", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_one_and_delete_one_missing_are_not_found() {
        let router = app();
        for name in ["Tea", "Coffee"] {
            send(&router, "POST", "/products", Some(product(name, 2.0))).await;
        }

        let response = send(&router, "GET", "/products/does-not-exist", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&router, "DELETE", "/products/does-not-exist", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&router, "GET", "/products", None).await;
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_all_returns_count() {
        let router = app();
        for city in ["Recife", "Olinda", "Recife"] {
            let response = send(&router, "POST", "/addresses", Some(address(city))).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(&router, "DELETE", "/addresses?City=Recife", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!(2));

        let response = send(&router, "DELETE", "/addresses", None).await;
        assert_eq!(json_body(response).await, json!(1));

        let response = send(&router, "DELETE", "/addresses?Town=Recife", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_merges_partial_body() {
        let router = app();
        let created = json_body(send(&router, "POST", "/products", Some(product("Tea", 3.0))).await).await;
        let id = created["Id"].as_str().unwrap();

        let response = send(
            &router,
            "PUT",
            &format!("/products/{id}"),
            Some(json!({"Price": 4.555, "Id": "other"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["Id"], created["Id"]);
        assert_eq!(updated["CreatedAt"], created["CreatedAt"]);
        assert_eq!(updated["Name"], "Tea");
        assert_eq!(updated["Price"], 4.56);

        let response = send(&router, "PUT", "/products/missing", Some(json!({"Price": 1.0}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cart_update_to_zero_deletes_line() {
        let router = app();
        let line = json_body(
            send(
                &router,
                "POST",
                "/cart",
                Some(json!({"UserID": "u1", "ProductID": "p1", "ProductAmount": 2})),
            )
            .await,
        )
        .await;
        let id = line["Id"].as_str().unwrap();

        let response = send(&router, "PUT", &format!("/cart/{id}"), Some(json!({"ProductAmount": 0}))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&router, "GET", &format!("/cart/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cart_update_to_negative_amount_is_rejected() {
        let router = app();
        let line = json_body(
            send(
                &router,
                "POST",
                "/cart",
                Some(json!({"UserID": "u1", "ProductID": "p1", "ProductAmount": 2})),
            )
            .await,
        )
        .await;
        let id = line["Id"].as_str().unwrap();

        let response = send(&router, "PUT", &format!("/cart/{id}"), Some(json!({"ProductAmount": -3}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["details"]["field"], "ProductAmount");

        let response = send(&router, "GET", &format!("/cart/{id}"), None).await;
        assert_eq!(json_body(response).await["ProductAmount"], 2);
    }

    #[tokio::test]
    async fn test_update_is_not_routed_for_payment_and_links() {
        let router = app();
        for uri in ["/payment/p1", "/user_address/l1", "/user_delivery/l1", "/delivery_product/l1"] {
            let response = send(&router, "PUT", uri, Some(json!({}))).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_payment_value_must_be_positive() {
        let router = app();
        let response = send(
            &router,
            "POST",
            "/payment",
            Some(json!({"DeliveryID": "d1", "Value": 0})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["details"]["field"], "Value");
    }

    #[tokio::test]
    async fn test_health_and_openapi_are_served() {
        let router = app();
        let response = send(&router, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&router, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"]["/cart"].is_object());
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let router = app();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/products")
            .header("origin", "http://shop.example")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}
