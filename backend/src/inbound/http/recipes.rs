//! Recipe API handlers.
//!
//! ```text
//! GET /recipe/recipes
//! POST /recipe/recipes {"title":"Stew","time_minutes":90,"price":"4.50"}
//! GET /recipe/recipes/{id}
//! PATCH /recipe/recipes/{id} {"title":"Better Stew"}
//! PUT /recipe/recipes/{id} {"title":"Stew","time_minutes":60,"price":"4.00"}
//! DELETE /recipe/recipes/{id}
//! ```
//!
//! Summary payloads carry attached tag and ingredient ids; the detail
//! endpoint expands them into full representations.

use actix_web::{HttpResponse, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Recipe, RecipeChanges, RecipeDetail, RecipeDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::ingredients::IngredientResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tags::TagResponse;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_catalog_name, parse_price, parse_time_minutes,
    parse_uuid, parse_uuid_list,
};

/// Request body shared by create (POST), full update (PUT), and partial
/// update (PATCH). POST and PUT require `title`, `time_minutes`, and `price`;
/// PATCH treats every field as optional.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RecipeBody {
    pub title: Option<String>,
    pub time_minutes: Option<i64>,
    #[schema(value_type = Option<String>, example = "4.50")]
    pub price: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

/// Wire representation of a recipe with attached ids.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub time_minutes: u32,
    #[schema(value_type = String, example = "4.50")]
    pub price: Decimal,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id(),
            title: recipe.title().to_string(),
            time_minutes: recipe.time_minutes(),
            price: recipe.price().as_decimal(),
            tags: recipe.tags().to_vec(),
            ingredients: recipe.ingredients().to_vec(),
        }
    }
}

/// Wire representation of a recipe with expanded attachments.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub time_minutes: u32,
    #[schema(value_type = String, example = "4.50")]
    pub price: Decimal,
    pub tags: Vec<TagResponse>,
    pub ingredients: Vec<IngredientResponse>,
}

impl From<&RecipeDetail> for RecipeDetailResponse {
    fn from(detail: &RecipeDetail) -> Self {
        Self {
            id: detail.recipe.id(),
            title: detail.recipe.title().to_string(),
            time_minutes: detail.recipe.time_minutes(),
            price: detail.recipe.price().as_decimal(),
            tags: detail.tags.iter().map(TagResponse::from).collect(),
            ingredients: detail
                .ingredients
                .iter()
                .map(IngredientResponse::from)
                .collect(),
        }
    }
}

fn parse_draft(body: RecipeBody) -> Result<RecipeDraft, Error> {
    let title = body
        .title
        .ok_or_else(|| missing_field_error(FieldName::new("title")))?;
    let time_minutes = body
        .time_minutes
        .ok_or_else(|| missing_field_error(FieldName::new("time_minutes")))?;
    let price = body
        .price
        .ok_or_else(|| missing_field_error(FieldName::new("price")))?;
    Ok(RecipeDraft {
        title: parse_catalog_name(title, FieldName::new("title"))?,
        time_minutes: parse_time_minutes(time_minutes, FieldName::new("time_minutes"))?,
        price: parse_price(price, FieldName::new("price"))?,
        tags: parse_uuid_list(body.tags.unwrap_or_default(), FieldName::new("tags"))?,
        ingredients: parse_uuid_list(
            body.ingredients.unwrap_or_default(),
            FieldName::new("ingredients"),
        )?,
    })
}

fn parse_changes(body: RecipeBody) -> Result<RecipeChanges, Error> {
    Ok(RecipeChanges {
        title: body
            .title
            .map(|title| parse_catalog_name(title, FieldName::new("title")))
            .transpose()?,
        time_minutes: body
            .time_minutes
            .map(|minutes| parse_time_minutes(minutes, FieldName::new("time_minutes")))
            .transpose()?,
        price: body
            .price
            .map(|price| parse_price(price, FieldName::new("price")))
            .transpose()?,
        tags: body
            .tags
            .map(|tags| parse_uuid_list(tags, FieldName::new("tags")))
            .transpose()?,
        ingredients: body
            .ingredients
            .map(|ingredients| parse_uuid_list(ingredients, FieldName::new("ingredients")))
            .transpose()?,
    })
}

fn parse_recipe_id(raw: String) -> Result<Uuid, Error> {
    parse_uuid(raw, FieldName::new("id"))
}

/// List the caller's recipes in creation order.
#[utoipa::path(
    get,
    path = "/recipe/recipes",
    responses(
        (status = 200, description = "Recipes in creation order", body = [RecipeSummary]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<RecipeSummary>>> {
    let recipes = state.catalog_query.list_recipes(caller.id()).await?;
    Ok(web::Json(recipes.iter().map(RecipeSummary::from).collect()))
}

/// Create a recipe owned by the caller.
///
/// Referenced tag and ingredient ids must exist but may belong to any
/// account.
#[utoipa::path(
    post,
    path = "/recipe/recipes",
    request_body = RecipeBody,
    responses(
        (status = 201, description = "Recipe created", body = RecipeSummary),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<RecipeBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(payload.into_inner())?;
    let recipe = state.catalog.create_recipe(caller.id(), draft).await?;
    Ok(HttpResponse::Created().json(RecipeSummary::from(&recipe)))
}

/// Fetch one recipe with expanded tags and ingredients.
#[utoipa::path(
    get,
    path = "/recipe/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "recipeDetail"
)]
pub async fn recipe_detail(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let recipe_id = parse_recipe_id(path.into_inner())?;
    let detail = state
        .catalog_query
        .recipe_detail(caller.id(), recipe_id)
        .await?;
    Ok(web::Json(RecipeDetailResponse::from(&detail)))
}

/// Partially update one of the caller's recipes.
#[utoipa::path(
    patch,
    path = "/recipe/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeBody,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeSummary),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "patchRecipe"
)]
pub async fn patch_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<RecipeBody>,
) -> ApiResult<web::Json<RecipeSummary>> {
    let recipe_id = parse_recipe_id(path.into_inner())?;
    let changes = parse_changes(payload.into_inner())?;
    let recipe = state
        .catalog
        .revise_recipe(caller.id(), recipe_id, changes)
        .await?;
    Ok(web::Json(RecipeSummary::from(&recipe)))
}

/// Replace one of the caller's recipes with a full payload.
///
/// Attachment sets absent from the payload are cleared rather than kept.
#[utoipa::path(
    put,
    path = "/recipe/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeBody,
    responses(
        (status = 200, description = "Replaced recipe", body = RecipeSummary),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "replaceRecipe"
)]
pub async fn put_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<RecipeBody>,
) -> ApiResult<web::Json<RecipeSummary>> {
    let recipe_id = parse_recipe_id(path.into_inner())?;
    let draft = parse_draft(payload.into_inner())?;
    let recipe = state
        .catalog
        .replace_recipe(caller.id(), recipe_id, draft)
        .await?;
    Ok(web::Json(RecipeSummary::from(&recipe)))
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/recipe/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe_id = parse_recipe_id(path.into_inner())?;
    state.catalog.delete_recipe(caller.id(), recipe_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
