//! Product Records

use jiff::Timestamp;

use crate::{domain::stores::records::StoreUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// `price` is in minor currency units.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
