// Table definitions matching the DDL in `crate::db::bootstrap`.

diesel::table! {
    users (id) {
        #[max_length = 36]
        id -> Varchar,
        is_active -> Bool,
        is_deleted -> Bool,
        #[max_length = 19]
        created_at -> Varchar,
        email -> Text,
        cpf -> Text,
        name -> Text,
    }
}

diesel::table! {
    products (id) {
        #[max_length = 36]
        id -> Varchar,
        is_active -> Bool,
        is_deleted -> Bool,
        #[max_length = 19]
        created_at -> Varchar,
        weight_grams -> Float8,
        price -> Float8,
        name -> Text,
    }
}

diesel::table! {
    addresses (id) {
        #[max_length = 36]
        id -> Varchar,
        is_active -> Bool,
        is_deleted -> Bool,
        #[max_length = 19]
        created_at -> Varchar,
        street -> Text,
        number -> Text,
        neighborhood -> Text,
        complement -> Text,
        city -> Text,
        state -> Text,
        country -> Text,
        latitude -> Float8,
        longitude -> Float8,
        name -> Text,
    }
}

diesel::table! {
    deliveries (id) {
        #[max_length = 36]
        id -> Varchar,
        is_active -> Bool,
        is_deleted -> Bool,
        #[max_length = 19]
        created_at -> Varchar,
        #[max_length = 36]
        user_id -> Varchar,
        #[max_length = 36]
        address_id -> Varchar,
    }
}

diesel::table! {
    payments (id) {
        #[max_length = 36]
        id -> Varchar,
        is_deleted -> Bool,
        #[max_length = 19]
        created_at -> Varchar,
        #[max_length = 36]
        delivery_id -> Varchar,
        value -> Float8,
    }
}

diesel::table! {
    shopping_cart (id) {
        #[max_length = 36]
        id -> Varchar,
        #[max_length = 36]
        user_id -> Varchar,
        #[max_length = 36]
        product_id -> Varchar,
        product_amount -> Int4,
    }
}

diesel::table! {
    user_address (id) {
        #[max_length = 36]
        id -> Varchar,
        #[max_length = 36]
        user_id -> Varchar,
        #[max_length = 36]
        address_id -> Varchar,
    }
}

diesel::table! {
    user_delivery (id) {
        #[max_length = 36]
        id -> Varchar,
        #[max_length = 36]
        delivery_id -> Varchar,
        #[max_length = 36]
        user_id -> Varchar,
    }
}

diesel::table! {
    delivery_product (id) {
        #[max_length = 36]
        id -> Varchar,
        #[max_length = 36]
        delivery_id -> Varchar,
        #[max_length = 36]
        product_id -> Varchar,
        product_amount -> Int4,
    }
}

diesel::joinable!(deliveries -> users (user_id));
diesel::joinable!(deliveries -> addresses (address_id));
diesel::joinable!(payments -> deliveries (delivery_id));
diesel::joinable!(shopping_cart -> products (product_id));
diesel::joinable!(user_delivery -> deliveries (delivery_id));
diesel::joinable!(delivery_product -> deliveries (delivery_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    products,
    addresses,
    deliveries,
    payments,
    shopping_cart,
    user_address,
    user_delivery,
    delivery_product,
);
