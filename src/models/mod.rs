pub mod address;
pub mod delivery;
pub mod delivery_product;
pub mod payment;
pub mod product;
pub mod resource;
pub mod shopping_cart;
pub mod user;
pub mod user_address;
pub mod user_delivery;

pub use address::{Address, AddressParams, AddressResource};
pub use delivery::{Delivery, DeliveryParams, DeliveryResource};
pub use delivery_product::{DeliveryProduct, DeliveryProductParams, DeliveryProductResource};
pub use payment::{Payment, PaymentParams, PaymentResource};
pub use product::{Product, ProductParams, ProductResource};
pub use resource::Resource;
pub use shopping_cart::{ShoppingCart, ShoppingCartParams, ShoppingCartResource};
pub use user::{User, UserParams, UserResource};
pub use user_address::{UserAddress, UserAddressParams, UserAddressResource};
pub use user_delivery::{UserDelivery, UserDeliveryParams, UserDeliveryResource};
