//! Order response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agora_app::domain::orders::records::{
    OrderDeliveryAddress, OrderItemRecord, OrderRecord, OrderStore,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Lifecycle status, e.g. `PENDING`
    pub status: String,

    /// Sum of the item totals at checkout, in cents
    pub subtotal: u64,

    /// Delivery fee at checkout, in cents
    pub delivery_fee: u64,

    /// Subtotal plus delivery fee, in cents
    pub total: u64,

    /// When the order was placed
    pub order_date_time: String,

    /// When the order was delivered
    pub delivery_date_time: Option<String>,

    /// Payment method chosen at checkout
    pub payment_method: String,

    /// Payment status
    pub payment_status: String,

    /// When the order was paid
    pub payment_date: Option<String>,

    /// Snapshots of the cart lines at checkout
    pub items: Vec<OrderItemResponse>,

    /// The store fulfilling the order
    pub store: OrderStoreResponse,

    /// Where the order is delivered
    pub delivery_address: DeliveryAddressResponse,

    /// The client profile that placed the order
    pub client_profile: Uuid,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            status: order.status.to_string(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            order_date_time: order.created_at.to_string(),
            delivery_date_time: order.delivery_date_time.as_ref().map(ToString::to_string),
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            payment_date: order.payment_date.as_ref().map(ToString::to_string),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            store: order.store.into(),
            delivery_address: order.delivery_address.into(),
            client_profile: order.client.uuid.into(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order item
    pub uuid: Uuid,

    /// The product this item was copied from
    pub product_uuid: Uuid,

    /// Product name at checkout
    pub product_name: String,

    /// Product description at checkout
    pub product_description: Option<String>,

    /// Number of units
    pub quantity: u32,

    /// Unit price at checkout, in cents
    pub unit_price: u64,

    /// Quantity times unit price, in cents
    pub total_price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            product_description: item.product_description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
        }
    }
}

/// Order Store Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStoreResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<OrderStore> for OrderStoreResponse {
    fn from(store: OrderStore) -> Self {
        Self {
            uuid: store.uuid.into(),
            name: store.name,
        }
    }
}

/// Delivery Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryAddressResponse {
    pub uuid: Uuid,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl From<OrderDeliveryAddress> for DeliveryAddressResponse {
    fn from(address: OrderDeliveryAddress) -> Self {
        Self {
            uuid: address.uuid.into(),
            street: address.street,
            number: address.number,
            complement: address.complement,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
        }
    }
}
