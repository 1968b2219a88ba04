//! Request-scoped identity.
//!
//! The session is resolved exactly once per request, here: signed cookie →
//! session store → user row. Handlers receive a plain `User`; there is no
//! ambient current-user anywhere else.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::Key;
use axum_extra::extract::SignedCookieJar;

use crate::auth::repo_types::User;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

async fn resolve_user(parts: &mut Parts, state: &AppState) -> Option<User> {
    // Infallible: a missing or tampered cookie just yields an empty jar.
    let jar: SignedCookieJar<Key> =
        SignedCookieJar::from_request_parts(parts, state).await.ok()?;
    let token = jar.get(SESSION_COOKIE)?.value().to_string();
    let session = state.sessions.get(&token)?;
    User::find_by_id(&state.db, session.user_id)
        .await
        .ok()
        .flatten()
}

/// The authenticated user. Rejects unauthenticated requests by redirecting
/// to the login page; this is the only authorization gate in the system.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_user(parts, state).await {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(Redirect::to("/login")),
        }
    }
}

/// Like [`CurrentUser`] but never rejects. Public pages use it for their
/// authenticated flag.
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_user(parts, state).await))
    }
}
