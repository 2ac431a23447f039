//! List Categories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::Category;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub uuid: Uuid,

    pub title: String,

    pub slug: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            uuid: category.uuid.into(),
            title: category.title,
            slug: category.slug,
        }
    }
}

/// List Categories Handler
#[endpoint(tags("catalog"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
