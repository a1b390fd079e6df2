//! Ingredient API handlers.
//!
//! ```text
//! GET /recipe/ingredients
//! POST /recipe/ingredients {"name":"Salt"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Ingredient;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_catalog_name};

/// Request body for `POST /recipe/ingredients`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IngredientBody {
    pub name: Option<String>,
}

/// Wire representation of an ingredient.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id(),
            name: ingredient.name().to_string(),
        }
    }
}

/// List the caller's ingredients, ordered like tags.
#[utoipa::path(
    get,
    path = "/recipe/ingredients",
    responses(
        (
            status = 200,
            description = "Ingredients ordered by name descending",
            body = [IngredientResponse]
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let ingredients = state.catalog_query.list_ingredients(caller.id()).await?;
    Ok(web::Json(
        ingredients.iter().map(IngredientResponse::from).collect(),
    ))
}

/// Create an ingredient owned by the caller.
#[utoipa::path(
    post,
    path = "/recipe/ingredients",
    request_body = IngredientBody,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<IngredientBody>,
) -> ApiResult<HttpResponse> {
    let name = payload
        .into_inner()
        .name
        .ok_or_else(|| missing_field_error(FieldName::new("name")))?;
    let name = parse_catalog_name(name, FieldName::new("name"))?;
    let ingredient = state.catalog.create_ingredient(caller.id(), name).await?;
    Ok(HttpResponse::Created().json(IngredientResponse::from(&ingredient)))
}
