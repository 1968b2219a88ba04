use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::error;

/// Per-request error taxonomy. Authorization failures are not represented
/// here: the `CurrentUser` extractor rejects with a redirect before the
/// handler runs. Nothing in this enum is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Registration hit an email that already has an account.
    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Same destination the pre-insert duplicate check uses, so a
            // race that loses to the UNIQUE constraint looks identical.
            AppError::EmailTaken => Redirect::to("/login?notice=account_exists").into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html("<h1>Not Found</h1>".to_string()),
            )
                .into_response(),
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}
