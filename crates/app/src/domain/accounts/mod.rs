//! Accounts

pub mod errors;
pub mod models;
pub(crate) mod password;
pub(crate) mod repositories;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;
