//! Header credential guard.
//!
//! A fixed username/password pair taken from configuration and compared
//! against the `username` and `password` request headers. This is a gate for
//! demo endpoints, not an authentication system.

use axum::http::HeaderMap;
use thiserror::Error;

use quill_kernel::settings::AuthSettings;

pub const USERNAME_HEADER: &str = "username";
pub const PASSWORD_HEADER: &str = "password";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credential header '{0}'")]
    MissingHeader(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Accepts requests that carry the configured credentials.
#[derive(Clone)]
pub struct HeaderCredentials {
    username: String,
    password: String,
}

impl HeaderCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(&settings.username, &settings.password)
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let username = header_value(headers, USERNAME_HEADER)?;
        let password = header_value(headers, PASSWORD_HEADER)?;

        if username == self.username && password == self.password {
            Ok(())
        } else {
            tracing::debug!(username, "credential check rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for HeaderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, AuthError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingHeader(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(username: &str, password: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USERNAME_HEADER, HeaderValue::from_str(username).unwrap());
        headers.insert(PASSWORD_HEADER, HeaderValue::from_str(password).unwrap());
        headers
    }

    #[test]
    fn configured_credentials_are_accepted() {
        let guard = HeaderCredentials::from_settings(&AuthSettings::default());
        assert_eq!(guard.authorize(&headers("FastAPIUser", "test1234!")), Ok(()));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let guard = HeaderCredentials::new("reader", "secret");
        assert_eq!(
            guard.authorize(&headers("reader", "guess")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn missing_header_is_reported_by_name() {
        let guard = HeaderCredentials::new("reader", "secret");
        let mut only_user = HeaderMap::new();
        only_user.insert(USERNAME_HEADER, HeaderValue::from_static("reader"));
        assert_eq!(
            guard.authorize(&only_user),
            Err(AuthError::MissingHeader("password"))
        );
    }

    #[test]
    fn debug_output_hides_the_password() {
        let guard = HeaderCredentials::new("reader", "secret");
        assert!(!format!("{guard:?}").contains("secret"));
    }
}
