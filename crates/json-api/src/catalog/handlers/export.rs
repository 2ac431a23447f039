//! Catalog Export Handler

use std::sync::Arc;

use salvo::{prelude::*, writing::Text};
use tracing::error;

use globalshop_app::domain::catalog::export::{self, CatalogExportError};

use crate::{extensions::*, state::State};

/// Catalog Export Handler
///
/// Serves the pre-rendered `products.json` artifact written by the
/// catalog export hook. The document is streamed back verbatim, so
/// this endpoint stays cheap regardless of catalog size.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status_error) => {
            res.render(status_error);

            return;
        }
    };

    match export::load_export(&state.app.export_paths) {
        Ok(document) => res.render(Text::Json(document)),
        Err(CatalogExportError::Missing) => {
            res.render(StatusError::not_found().brief("Catalog export has not been generated"));
        }
        Err(error) => {
            error!("failed to load catalog export: {error}");

            res.render(StatusError::internal_server_error());
        }
    }
}
