//! Clients
//!
//! Client profiles belong to a user and own at most one delivery address.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::ClientsServiceError;
pub use service::*;
