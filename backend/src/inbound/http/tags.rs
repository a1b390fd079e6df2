//! Tag API handlers.
//!
//! ```text
//! GET /recipe/tags
//! POST /recipe/tags {"name":"Dinner"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Tag;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_catalog_name};

/// Request body for `POST /recipe/tags`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TagBody {
    pub name: Option<String>,
}

/// Wire representation of a tag.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id(),
            name: tag.name().to_string(),
        }
    }
}

/// List the caller's tags, newest names first.
#[utoipa::path(
    get,
    path = "/recipe/tags",
    responses(
        (status = 200, description = "Tags ordered by name descending", body = [TagResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
pub async fn list_tags(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.catalog_query.list_tags(caller.id()).await?;
    Ok(web::Json(tags.iter().map(TagResponse::from).collect()))
}

/// Create a tag owned by the caller.
#[utoipa::path(
    post,
    path = "/recipe/tags",
    request_body = TagBody,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
pub async fn create_tag(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TagBody>,
) -> ApiResult<HttpResponse> {
    let name = payload
        .into_inner()
        .name
        .ok_or_else(|| missing_field_error(FieldName::new("name")))?;
    let name = parse_catalog_name(name, FieldName::new("name"))?;
    let tag = state.catalog.create_tag(caller.id(), name).await?;
    Ok(HttpResponse::Created().json(TagResponse::from(&tag)))
}
