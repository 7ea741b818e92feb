//! Clients Data

use crate::domain::{
    clients::records::{AddressUuid, ClientProfileUuid},
    users::records::UserUuid,
};

/// New Client Profile Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewClientProfile {
    pub uuid: ClientProfileUuid,
    pub user_uuid: UserUuid,
    pub cpf: Option<String>,
}

/// New Delivery Address Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}
