//! List Subcategories Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::Subcategory;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Subcategory Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryResponse {
    /// The unique identifier of the subcategory
    pub uuid: Uuid,

    pub title: String,

    pub slug: Option<String>,

    /// The category this subcategory belongs to
    pub category_uuid: Uuid,
}

impl From<Subcategory> for SubcategoryResponse {
    fn from(subcategory: Subcategory) -> Self {
        Self {
            uuid: subcategory.uuid.into(),
            title: subcategory.title,
            slug: subcategory.slug,
            category_uuid: subcategory.category_uuid.into(),
        }
    }
}

/// List Subcategories Handler
#[endpoint(tags("catalog"), summary = "List Subcategories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<SubcategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subcategories = state
        .app
        .catalog
        .list_subcategories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(subcategories.into_iter().map(Into::into).collect()))
}
