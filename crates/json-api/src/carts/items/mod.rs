//! Cart item routes

pub(crate) mod handlers;

pub(crate) use handlers::*;
