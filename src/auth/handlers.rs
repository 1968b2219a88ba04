use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    SignedCookieJar,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginForm, LoginQuery, RegisterForm};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::User;
use crate::error::AppError;
use crate::pages;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const ACCOUNT_EXISTS: &str = "An account with this email already exists. Log in instead.";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// GET /register
pub async fn register_form() -> Html<String> {
    pages::register_page(None)
}

/// POST /register - create the account and log the new user straight in.
#[instrument(skip(state, jar, form))]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(mut form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    form.email = form.email.trim().to_lowercase();

    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "invalid email");
        return Ok(pages::register_page(Some("Please enter a valid email address.")).into_response());
    }
    if form.password.is_empty() {
        warn!("empty password");
        return Ok(pages::register_page(Some("Password must not be empty.")).into_response());
    }

    // Friendly pre-check; the UNIQUE constraint below is what actually
    // guarantees the invariant under concurrent registrations.
    if User::find_by_email(&state.db, &form.email).await?.is_some() {
        warn!(email = %form.email, "email already registered");
        return Err(AppError::EmailTaken);
    }

    let hash = hash_password(&form.password)?;

    let user = match User::create(&state.db, &form.email, &hash, form.name.trim()).await {
        Ok(u) => u,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(email = %form.email, "lost registration race");
            return Err(AppError::EmailTaken);
        }
        Err(e) => return Err(e.into()),
    };

    let session = state.sessions.create(user.id);
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        jar.add(session_cookie(session.token)),
        Redirect::to("/secrets"),
    )
        .into_response())
}

/// GET /login
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    let notice = match query.notice.as_deref() {
        Some("account_exists") => Some(ACCOUNT_EXISTS),
        _ => None,
    };
    pages::login_page(notice)
}

/// POST /login - verify credentials and start a session.
///
/// Unknown email and wrong password produce the same notice and the same
/// page, so a caller learns nothing about which part was wrong.
#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(mut form): Form<LoginForm>,
) -> Result<Response, AppError> {
    form.email = form.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &form.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %form.email, "login unknown email");
            return Ok(pages::login_page(Some(INVALID_CREDENTIALS)).into_response());
        }
    };

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(email = %form.email, user_id = user.id, "login invalid password");
        return Ok(pages::login_page(Some(INVALID_CREDENTIALS)).into_response());
    }

    let session = state.sessions.create(user.id);
    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((
        jar.add(session_cookie(session.token)),
        Redirect::to("/secrets"),
    )
        .into_response())
}

/// GET /logout - drop the session unconditionally and go home.
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value());
    }
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }
}
