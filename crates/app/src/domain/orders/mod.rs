//! Orders

pub mod checkout;
pub mod errors;
pub mod models;
pub(crate) mod repositories;
pub mod service;

pub use checkout::*;
pub use errors::{CheckoutError, OrdersServiceError};
pub use service::*;
