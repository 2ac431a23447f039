//! Create Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use globalshop_app::domain::catalog::models::{CategoryUuid, NewCategory};

use crate::{
    catalog::{errors::into_status_error, handlers::list_categories::CategoryResponse},
    extensions::*,
    state::State,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    pub title: String,

    pub slug: Option<String>,
}

/// Create Category Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Category",
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Slug already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let category = state
        .app
        .catalog
        .create_category(NewCategory {
            uuid: CategoryUuid::generate(),
            title: request.title,
            slug: request.slug,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}
