//! Shared fixtures for service integration tests.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
