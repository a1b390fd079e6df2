//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! bearer-token extraction and caller identity derivation here. Handlers
//! declare a [`Caller`] parameter to require authentication; the extractor
//! resolves the presented token through the auth port and fails with 401
//! before the handler body runs.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Account, AccountId, Error, TokenValue};
use crate::inbound::http::state::HttpState;

/// Authenticated account extracted from the request's bearer token.
pub struct Caller(Account);

impl Caller {
    /// The resolved account.
    pub fn account(&self) -> &Account {
        &self.0
    }

    /// Identifier of the resolved account.
    pub fn id(&self) -> AccountId {
        self.0.id()
    }

    /// Require the operator flag, failing with 403 for regular accounts.
    pub fn require_staff(&self) -> Result<&Account, Error> {
        if self.0.is_staff() {
            Ok(&self.0)
        } else {
            Err(Error::forbidden("staff access required"))
        }
    }
}

fn bearer_token(value: Option<&HeaderValue>) -> Result<TokenValue, Error> {
    let raw = value
        .ok_or_else(|| Error::unauthorized("missing authentication token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = raw
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::unauthorized("authorization scheme must be Bearer"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing authentication token"));
    }
    Ok(TokenValue::from_presented(token))
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let authorization = req.headers().get(header::AUTHORIZATION).cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = bearer_token(authorization.as_ref())?;
            let account = state.auth.resolve_caller(&token).await?;
            Ok(Caller(account))
        })
    }
}
