//! Orders
//!
//! Checkout turns the client's cart into an order with item snapshots. The
//! order then moves through [`status::OrderStatus`].

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
pub use status::{OrderStatus, StatusTransitionError};
