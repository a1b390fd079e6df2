//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use zeroize::Zeroizing;

use crate::domain::ports::{AdminCreateAccountRequest, RegisterAccountRequest};
use crate::domain::{
    Account, AccountService, CatalogService, Credentials, EmailAddress, TokenAuthService,
};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::middleware::correlation::Correlation;
use crate::outbound::persistence::MemoryStore;

/// Build handler state backed by a fresh in-memory store.
pub(crate) fn memory_state() -> web::Data<HttpState> {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let accounts = Arc::new(AccountService::new(Arc::clone(&store), clock.clone()));
    let auth = Arc::new(TokenAuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&store),
        clock.clone(),
    ));
    let catalog = Arc::new(CatalogService::new(store, clock));
    web::Data::new(HttpState {
        accounts: accounts.clone(),
        accounts_query: accounts,
        auth,
        catalog: catalog.clone(),
        catalog_query: catalog,
    })
}

/// Build an application exposing the full route table over the given state.
pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Correlation)
        .configure(crate::server::configure)
}

/// Register a regular account directly through the command port.
pub(crate) async fn register_account(
    state: &web::Data<HttpState>,
    email: &str,
    password: &str,
) -> Account {
    let request = RegisterAccountRequest {
        email: EmailAddress::parse(email).expect("valid email"),
        display_name: None,
        password: Zeroizing::new(password.to_owned()),
    };
    state
        .accounts
        .register(request)
        .await
        .expect("register account")
}

/// Register a staff account directly through the command port.
pub(crate) async fn register_staff_account(
    state: &web::Data<HttpState>,
    email: &str,
    password: &str,
) -> Account {
    let request = AdminCreateAccountRequest {
        email: EmailAddress::parse(email).expect("valid email"),
        display_name: None,
        password: Zeroizing::new(password.to_owned()),
        is_active: true,
        is_staff: true,
        is_superuser: false,
    };
    state
        .accounts
        .admin_create(request)
        .await
        .expect("register staff account")
}

/// Issue a token for the account and format an `Authorization` header value.
pub(crate) async fn bearer_for(
    state: &web::Data<HttpState>,
    email: &str,
    password: &str,
) -> String {
    let credentials = Credentials::try_from_parts(email, password).expect("valid credentials");
    let token = state
        .auth
        .issue_token(&credentials)
        .await
        .expect("issue token");
    format!("Bearer {}", token.reveal())
}
