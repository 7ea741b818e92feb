//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        clients::records::{AddressUuid, ClientProfileUuid},
        orders::status::OrderStatus,
        products::records::ProductUuid,
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record, hydrated with the store, client and delivery address it
/// references.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub client: OrderClient,
    pub store: OrderStore,
    pub delivery_address: OrderDeliveryAddress,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub status: OrderStatus,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: Option<Timestamp>,
    pub delivery_date_time: Option<Timestamp>,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Whether `user` placed the order or owns the store it was placed with.
    #[must_use]
    pub fn is_visible_to(&self, user: UserUuid) -> bool {
        self.client.user_uuid == user || self.store.owner_user_uuid == user
    }
}

/// An applied status change.
///
/// `previous` is the status read under the order's row lock, so it is the
/// state the transition was actually checked against.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub previous: OrderStatus,
    pub order: OrderRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClient {
    pub uuid: ClientProfileUuid,
    pub user_uuid: UserUuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub owner_user_uuid: UserUuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDeliveryAddress {
    pub uuid: AddressUuid,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Snapshot of a cart line taken at checkout.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub created_at: Timestamp,
}
