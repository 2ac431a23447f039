//! Shared test infrastructure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub(crate) mod context;
pub(crate) mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
