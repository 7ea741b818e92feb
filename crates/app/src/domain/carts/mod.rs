//! Carts
//!
//! One cart per client profile. Every mutation recomputes the cart totals in
//! the same transaction, under a row lock on the cart.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod totals;

pub use errors::CartsServiceError;
pub use service::*;
