//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Helpers for pulling injected state out of the depot.
pub(crate) trait DepotExt {
    /// Obtain a value injected by middleware, or fail the request.
    ///
    /// A miss means the router is misconfigured, so the shopper gets a
    /// plain 500 while the gap is logged for the operator.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!(
                type_name = std::any::type_name::<T>(),
                "missing injected state"
            );

            StatusError::internal_server_error()
        })
    }
}
