//! Cart Data

use crate::domain::products::records::ProductUuid;

/// Item to add to a cart. Re-adding a product increases its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Cart Item Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemUpdate {
    pub quantity: u32,
}
