//! Agora marketplace domain: carts, checkout and the order lifecycle, with
//! the supporting users, clients, stores and products.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
