//! Protected file downloads served from the configured download directory.

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
    routing::get,
    Router,
};
use bytes::Bytes;
use tracing::{info, instrument, warn};

use crate::auth::extractors::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/download/:filename", get(download))
}

/// True for bare filenames only. Path separators, `..`, and dotfiles never
/// reach the filesystem.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

/// Content-Disposition value that cannot smuggle headers: control characters
/// are stripped, quotes and backslashes replaced, and non-ASCII names carried
/// in an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && filename == sanitized {
        return format!("attachment; filename=\"{}\"", filename);
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized,
        urlencoding::encode(filename)
    )
}

/// GET /download/:filename - stream a file as an attachment. Session
/// required; unauthenticated requests are redirected by the extractor.
#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn download(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if !is_safe_filename(&filename) {
        warn!(%filename, "rejected unsafe filename");
        return Err(AppError::NotFound);
    }

    let path = state.config.download_dir.join(&filename);
    let content = match tokio::fs::read(&path).await {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(%filename, "download not found");
            return Err(AppError::NotFound);
        }
        Err(e) => return Err(anyhow::Error::from(e).into()),
    };

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    info!(%filename, bytes = content.len(), "file downloaded");
    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&filename),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(anyhow::Error::from)?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_filenames_pass() {
        assert!(is_safe_filename("cheat_sheet.txt"));
        assert!(is_safe_filename("report-2024.pdf"));
    }

    #[test]
    fn traversal_and_dotfiles_are_rejected() {
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename(".."));
        assert!(!is_safe_filename("../etc/passwd"));
        assert!(!is_safe_filename("a/b.txt"));
        assert!(!is_safe_filename("a\\b.txt"));
        assert!(!is_safe_filename(".env"));
    }

    #[test]
    fn plain_ascii_disposition() {
        assert_eq!(
            content_disposition_header("notes.txt"),
            "attachment; filename=\"notes.txt\""
        );
    }

    #[test]
    fn quotes_and_newlines_cannot_escape_the_header() {
        let value = content_disposition_header("a\"b\r\nSet-Cookie: x");
        assert!(!value.contains('\n'));
        assert!(!value.contains('\r'));
        assert!(!value.contains("a\"b"));
    }

    #[test]
    fn non_ascii_uses_rfc5987_parameter() {
        let value = content_disposition_header("résumé.pdf");
        assert!(value.contains("filename*=UTF-8''"));
    }
}
