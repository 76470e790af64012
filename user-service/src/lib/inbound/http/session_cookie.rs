use axum::http::header;
use axum::http::HeaderMap;
use chrono::Duration;
use cookie::Cookie;
use cookie::SameSite;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "Authorization";

/// Transport settings for the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookieSettings {
    pub secure: bool,
}

/// Build the `Set-Cookie` value for a freshly issued session token.
pub fn build(token: &str, max_age: Duration, settings: SessionCookieSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(cookie::time::Duration::seconds(max_age.num_seconds()))
        .build()
}

/// Find the session token in the request's `Cookie` headers.
///
/// An empty cookie value counts as absent.
pub fn extract(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| Cookie::parse(pair.trim()).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
