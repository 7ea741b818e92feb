//! Products Data

use crate::domain::{products::records::ProductUuid, stores::records::StoreUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
}
