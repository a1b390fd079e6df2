//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, catalog,
//!   admin, health)
//! - **Schemas**: Request/response bodies plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: The bearer token authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::inbound::http::admin::{AdminAccountBody, AdminAccountPatchBody, AdminAccountResponse};
use crate::inbound::http::ingredients::{IngredientBody, IngredientResponse};
use crate::inbound::http::recipes::{RecipeBody, RecipeDetailResponse, RecipeSummary};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tags::{TagBody, TagResponse};
use crate::inbound::http::users::{
    ProfilePatchBody, ProfileResponse, RegisterAccountBody, TokenRequestBody, TokenResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Opaque bearer token issued by POST /user/token."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Larder backend API",
        description = "HTTP interface for account management and the owner-scoped recipe catalog.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::issue_token,
        crate::inbound::http::users::profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::recipe_detail,
        crate::inbound::http::recipes::patch_recipe,
        crate::inbound::http::recipes::put_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::admin::list_accounts,
        crate::inbound::http::admin::account_detail,
        crate::inbound::http::admin::create_account,
        crate::inbound::http::admin::patch_account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterAccountBody,
        TokenRequestBody,
        TokenResponse,
        ProfilePatchBody,
        ProfileResponse,
        TagBody,
        TagResponse,
        IngredientBody,
        IngredientResponse,
        RecipeBody,
        RecipeSummary,
        RecipeDetailResponse,
        AdminAccountBody,
        AdminAccountPatchBody,
        AdminAccountResponse,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "user", description = "Registration, token issuance, and profile management"),
        (name = "tags", description = "Reusable recipe tags"),
        (name = "ingredients", description = "Reusable recipe ingredients"),
        (name = "recipes", description = "Owner-scoped recipe CRUD"),
        (name = "admin", description = "Operator-only account management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
