//! Agora Domain Concerns

pub mod carts;
pub mod clients;
pub mod orders;
pub mod products;
pub mod stores;
pub mod users;
