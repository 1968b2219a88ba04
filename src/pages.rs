//! Page handlers and the minimal inline HTML they render.

use axum::response::Html;

use crate::auth::extractors::{CurrentUser, MaybeUser};

fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            c => c.to_string(),
        })
        .collect()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\n<body>\n{body}\n</body></html>"
    )
}

pub fn home_page(logged_in: bool) -> Html<String> {
    let nav = if logged_in {
        r#"<a href="/secrets">Secrets</a> <a href="/logout">Log Out</a>"#
    } else {
        r#"<a href="/login">Login</a> <a href="/register">Register</a>"#
    };
    Html(layout(
        "Home",
        &format!("<h1>Welcome</h1>\n<p>{nav}</p>"),
    ))
}

pub fn register_page(notice: Option<&str>) -> Html<String> {
    let notice = notice
        .map(|n| format!("<p class=\"notice\">{}</p>\n", escape_html(n)))
        .unwrap_or_default();
    Html(layout(
        "Register",
        &format!(
            "<h1>Register</h1>\n{notice}\
             <form method=\"post\" action=\"/register\">\n\
             <input name=\"name\" placeholder=\"Name\">\n\
             <input name=\"email\" type=\"email\" placeholder=\"Email\">\n\
             <input name=\"password\" type=\"password\" placeholder=\"Password\">\n\
             <button type=\"submit\">Sign Up</button>\n</form>"
        ),
    ))
}

pub fn login_page(notice: Option<&str>) -> Html<String> {
    let notice = notice
        .map(|n| format!("<p class=\"notice\">{}</p>\n", escape_html(n)))
        .unwrap_or_default();
    Html(layout(
        "Login",
        &format!(
            "<h1>Login</h1>\n{notice}\
             <form method=\"post\" action=\"/login\">\n\
             <input name=\"email\" type=\"email\" placeholder=\"Email\">\n\
             <input name=\"password\" type=\"password\" placeholder=\"Password\">\n\
             <button type=\"submit\">Log In</button>\n</form>"
        ),
    ))
}

pub fn secrets_page(name: &str) -> Html<String> {
    Html(layout(
        "Secrets",
        &format!(
            "<h1>Welcome, {}</h1>\n<a href=\"/download/cheat_sheet.txt\">Download Your File</a>\n\
             <a href=\"/logout\">Log Out</a>",
            escape_html(name)
        ),
    ))
}

/// GET / - home page with the authenticated flag.
pub async fn home(MaybeUser(user): MaybeUser) -> Html<String> {
    home_page(user.is_some())
}

/// GET /secrets - protected page showing the user's display name.
pub async fn secrets(CurrentUser(user): CurrentUser) -> Html<String> {
    secrets_page(&user.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>"x"&'y'</script>"#),
            "&lt;script&gt;&quot;x&quot;&amp;&#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn secrets_page_escapes_display_name() {
        let Html(body) = secrets_page("<b>Alice</b>");
        assert!(body.contains("&lt;b&gt;Alice&lt;/b&gt;"));
        assert!(!body.contains("<b>Alice</b>"));
    }

    #[test]
    fn home_page_reflects_auth_state() {
        let Html(out) = home_page(false);
        assert!(out.contains("/login"));
        let Html(signed_in) = home_page(true);
        assert!(signed_in.contains("/logout"));
    }
}
