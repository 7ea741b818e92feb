//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agora_app::domain::carts::records::{CartItemRecord, CartRecord};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of the item totals, in cents
    pub subtotal: u64,

    /// Delivery fee, in cents
    pub delivery_fee: u64,

    /// Subtotal plus delivery fee, in cents
    pub total: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            subtotal: cart.subtotal,
            delivery_fee: cart.delivery_fee,
            total: cart.total,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The product in the cart item
    pub product_uuid: Uuid,

    /// Number of units
    pub quantity: u32,

    /// Product price when the item was last priced, in cents
    pub unit_price: u64,

    /// Quantity times unit price, in cents
    pub total_price: u64,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
        }
    }
}
