//! Output projections of the stored rows.
//!
//! Every attribute is serialized as a concrete value under its PascalCase
//! wire name, with the identifier first.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    Address, Delivery, DeliveryProduct, Payment, Product, ShoppingCart, User, UserAddress,
    UserDelivery,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductResponse {
    pub id: String,
    pub is_active: bool,
    pub is_deleted: bool,
    #[schema(example = "2024-01-01 12:00:00")]
    pub created_at: String,
    pub weight_grams: f64,
    pub price: f64,
    pub name: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            is_active: p.is_active,
            is_deleted: p.is_deleted,
            created_at: p.created_at,
            weight_grams: p.weight_grams,
            price: p.price,
            name: p.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    pub id: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: String,
    pub email: String,
    pub cpf: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            is_active: u.is_active,
            is_deleted: u.is_deleted,
            created_at: u.created_at,
            email: u.email,
            cpf: u.cpf,
            name: u.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct AddressResponse {
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

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            is_active: a.is_active,
            is_deleted: a.is_deleted,
            created_at: a.created_at,
            street: a.street,
            number: a.number,
            neighborhood: a.neighborhood,
            complement: a.complement,
            city: a.city,
            state: a.state,
            country: a.country,
            latitude: a.latitude,
            longitude: a.longitude,
            name: a.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "IsActive")]
    pub is_active: bool,
    #[serde(rename = "IsDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "AddressID")]
    pub address_id: String,
}

impl From<Delivery> for DeliveryResponse {
    fn from(d: Delivery) -> Self {
        Self {
            id: d.id,
            is_active: d.is_active,
            is_deleted: d.is_deleted,
            created_at: d.created_at,
            user_id: d.user_id,
            address_id: d.address_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "IsDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    #[serde(rename = "DeliveryID")]
    pub delivery_id: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            is_deleted: p.is_deleted,
            created_at: p.created_at,
            delivery_id: p.delivery_id,
            value: p.value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShoppingCartResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "ProductAmount")]
    pub product_amount: i32,
}

impl From<ShoppingCart> for ShoppingCartResponse {
    fn from(c: ShoppingCart) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            product_id: c.product_id,
            product_amount: c.product_amount,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserAddressResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "AddressID")]
    pub address_id: String,
}

impl From<UserAddress> for UserAddressResponse {
    fn from(l: UserAddress) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            address_id: l.address_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDeliveryResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "DeliveryID")]
    pub delivery_id: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
}

impl From<UserDelivery> for UserDeliveryResponse {
    fn from(l: UserDelivery) -> Self {
        Self {
            id: l.id,
            delivery_id: l.delivery_id,
            user_id: l.user_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryProductResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "DeliveryID")]
    pub delivery_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "ProductAmount")]
    pub product_amount: i32,
}

impl From<DeliveryProduct> for DeliveryProductResponse {
    fn from(l: DeliveryProduct) -> Self {
        Self {
            id: l.id,
            delivery_id: l.delivery_id,
            product_id: l.product_id,
            product_amount: l.product_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_response_uses_pascal_case() {
        let response = ProductResponse::from(Product {
            id: "p1".to_string(),
            is_active: true,
            is_deleted: false,
            created_at: "2024-01-01 00:00:00".to_string(),
            weight_grams: 250.0,
            price: 9.99,
            name: "Tea".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "Id": "p1",
                "IsActive": true,
                "IsDeleted": false,
                "CreatedAt": "2024-01-01 00:00:00",
                "WeightGrams": 250.0,
                "Price": 9.99,
                "Name": "Tea"
            })
        );
    }

    #[test]
    fn test_link_responses_keep_upper_case_id_suffix() {
        let value = serde_json::to_value(ShoppingCartResponse::from(ShoppingCart {
            id: "c1".to_string(),
            user_id: "u1".to_string(),
            product_id: "p1".to_string(),
            product_amount: 2,
        }))
        .unwrap();

        assert_eq!(value["UserID"], "u1");
        assert_eq!(value["ProductID"], "p1");
        assert_eq!(value["ProductAmount"], 2);
    }
}
