//! Data Transfer Objects for API responses.
//!
//! - `resources` - Output projections of each storefront resource
//! - `health` - Health check DTOs
//! - `error` - Common error response DTOs

mod error;
pub mod health;
mod resources;

pub use error::ErrorResponse;
pub use resources::{
    AddressResponse, DeliveryProductResponse, DeliveryResponse, PaymentResponse, ProductResponse,
    ShoppingCartResponse, UserAddressResponse, UserDeliveryResponse, UserResponse,
};
