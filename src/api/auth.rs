//! Login / register
//!
//! The server answers with a JWT; it is kept in `localStorage` and sent as
//! a bearer token on board requests.

use gloo_net::http::Request;

use super::http::ensure_ok;
use super::payloads::{Credentials, TokenResponse};
use super::ApiResult;

const TOKEN_STORAGE_KEY: &str = "todo-board.jwt";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn stored_token() -> Option<String> {
    local_storage()
        .and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}

fn store_token(token: &str) {
    match local_storage() {
        Some(storage) => {
            if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                tracing::warn!("could not persist session token");
            }
        }
        None => tracing::warn!("localStorage unavailable, session token not kept"),
    }
}

async fn authenticate(url: &str, credentials: &Credentials) -> ApiResult<()> {
    let response = Request::post(url).json(credentials)?.send().await?;
    let response = ensure_ok(url, response).await?;
    // An OK without a token still counts; the board page will then be rejected
    match response.json::<TokenResponse>().await {
        Ok(body) => store_token(&body.jwt),
        Err(err) => tracing::warn!(error = %err, "auth response carried no token"),
    }
    Ok(())
}

/// `POST /login`
pub async fn login(url: &str, credentials: &Credentials) -> ApiResult<()> {
    tracing::info!(user = %credentials.username, "logging in");
    authenticate(url, credentials).await
}

/// `POST /register`
pub async fn register(url: &str, credentials: &Credentials) -> ApiResult<()> {
    tracing::info!(user = %credentials.username, "registering");
    authenticate(url, credentials).await
}
