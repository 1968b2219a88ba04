use serde::Deserialize;

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query string carried on redirects to `/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub notice: Option<String>,
}
