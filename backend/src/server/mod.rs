//! Server assembly: route table, state construction, and listener setup.
//!
//! The route table is an explicit function handed to the Actix builder (and
//! reused verbatim by tests) rather than a process-wide registry. Each
//! resource installs a default service so an unsupported verb on a known path
//! answers 405 with the structured error body; unknown paths answer 404.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, web};
use mockable::DefaultClock;

use crate::domain::{AccountService, CatalogService, Error, TokenAuthService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{admin, ingredients, recipes, tags, users};
use crate::middleware::correlation::Correlation;
use crate::outbound::persistence::MemoryStore;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Application state assembled over the bundled in-memory store.
pub struct AppState {
    /// Handler state injected into every request.
    pub http: web::Data<HttpState>,
    /// Concrete account service, retained for the startup superuser bootstrap.
    pub accounts: Arc<AccountService<MemoryStore>>,
}

/// Wire the domain services over a fresh in-memory store.
#[must_use]
pub fn build_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let accounts = Arc::new(AccountService::new(Arc::clone(&store), clock.clone()));
    let auth = Arc::new(TokenAuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&store),
        clock.clone(),
    ));
    let catalog = Arc::new(CatalogService::new(store, clock));
    let http = web::Data::new(HttpState {
        accounts: accounts.clone(),
        accounts_query: accounts.clone(),
        auth,
        catalog: catalog.clone(),
        catalog_query: catalog,
    });
    AppState { http, accounts }
}

async fn method_not_allowed() -> HttpResponse {
    Error::method_not_allowed("method not allowed on this endpoint").error_response()
}

async fn not_found() -> HttpResponse {
    Error::not_found("no such endpoint").error_response()
}

/// Register every route on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/create")
            .route(web::post().to(users::register))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/user/token")
            .route(web::post().to(users::issue_token))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/user/me")
            .route(web::get().to(users::profile))
            .route(web::patch().to(users::update_profile))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/recipe/tags")
            .route(web::get().to(tags::list_tags))
            .route(web::post().to(tags::create_tag))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/recipe/ingredients")
            .route(web::get().to(ingredients::list_ingredients))
            .route(web::post().to(ingredients::create_ingredient))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/recipe/recipes")
            .route(web::get().to(recipes::list_recipes))
            .route(web::post().to(recipes::create_recipe))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/recipe/recipes/{id}")
            .route(web::get().to(recipes::recipe_detail))
            .route(web::patch().to(recipes::patch_recipe))
            .route(web::put().to(recipes::put_recipe))
            .route(web::delete().to(recipes::delete_recipe))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/admin/accounts")
            .route(web::get().to(admin::list_accounts))
            .route(web::post().to(admin::create_account))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/admin/accounts/{id}")
            .route(web::get().to(admin::account_detail))
            .route(web::patch().to(admin::patch_account))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/health/live")
            .route(web::get().to(live))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/health/ready")
            .route(web::get().to(ready))
            .default_service(web::route().to(method_not_allowed)),
    )
    .default_service(web::route().to(not_found));
}

/// Construct the Actix HTTP server over the given state.
///
/// Readiness flips on once the listener has bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Correlation)
            .configure(configure);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
