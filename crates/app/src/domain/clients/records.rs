//! Client Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Client Profile UUID
pub type ClientProfileUuid = TypedUuid<ClientProfileRecord>;

/// Client Profile Record
#[derive(Debug, Clone)]
pub struct ClientProfileRecord {
    pub uuid: ClientProfileUuid,
    pub user_uuid: UserUuid,
    pub cpf: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

/// Delivery Address Record
#[derive(Debug, Clone)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub client_profile_uuid: ClientProfileUuid,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
