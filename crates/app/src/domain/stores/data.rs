//! Stores Data

use crate::domain::{stores::records::StoreUuid, users::records::UserUuid};

/// New Store Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub owner_user_uuid: UserUuid,
    pub name: String,
    pub description: Option<String>,
}
