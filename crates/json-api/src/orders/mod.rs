//! Order and checkout endpoints.

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
