//! Create Subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::{NewSubcategory, SubcategoryUuid};

use crate::{
    catalog::{errors::into_status_error, handlers::list_subcategories::SubcategoryResponse},
    extensions::*,
    state::State,
};

/// Create Subcategory Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSubcategoryRequest {
    pub title: String,

    pub slug: Option<String>,

    /// The category this subcategory belongs to
    pub category_uuid: Uuid,
}

/// Create Subcategory Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Subcategory",
    responses(
        (status_code = StatusCode::CREATED, description = "Subcategory created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSubcategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let subcategory = state
        .app
        .catalog
        .create_subcategory(NewSubcategory {
            uuid: SubcategoryUuid::generate(),
            title: request.title,
            slug: request.slug,
            category_uuid: request.category_uuid.into(),
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(subcategory.into()))
}
