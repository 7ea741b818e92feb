//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        carts::totals::CartTotals, clients::records::ClientProfileUuid,
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub client_profile_uuid: ClientProfileUuid,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            total: self.total,
        }
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
