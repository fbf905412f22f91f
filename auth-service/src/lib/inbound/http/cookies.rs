//! Token cookies.
//!
//! Both tokens travel as `HttpOnly` cookies scoped to `/`, with a `Max-Age`
//! equal to each token's lifetime.

use auth::TokenPair;
use http::header::COOKIE;
use http::header::SET_COOKIE;
use http::HeaderMap;
use http::HeaderValue;

use super::handlers::ApiError;
use crate::config::CookieConfig;
use crate::config::SameSite;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone)]
pub struct CookiePolicy {
    secure: bool,
    same_site: SameSite,
    domain: Option<String>,
    access_max_age: i64,
    refresh_max_age: i64,
}

impl CookiePolicy {
    pub fn new(config: &CookieConfig, access_max_age: i64, refresh_max_age: i64) -> Self {
        Self {
            // Browsers drop SameSite=None cookies that are not Secure.
            secure: config.secure || config.same_site == SameSite::None,
            same_site: config.same_site,
            domain: config.domain.clone(),
            access_max_age,
            refresh_max_age,
        }
    }

    /// `Set-Cookie` headers carrying a freshly issued token pair.
    pub fn token_cookies(&self, tokens: &TokenPair) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            self.cookie(ACCESS_TOKEN_COOKIE, &tokens.access_token, self.access_max_age)?,
        );
        headers.append(
            SET_COOKIE,
            self.cookie(
                REFRESH_TOKEN_COOKIE,
                &tokens.refresh_token,
                self.refresh_max_age,
            )?,
        );
        Ok(headers)
    }

    /// `Set-Cookie` headers expiring both token cookies.
    pub fn cleared_cookies(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
            match self.cookie(name, "", 0) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(e) => tracing::error!(cookie = name, error = ?e, "Failed to build cookie"),
            }
        }
        headers
    }

    fn cookie(&self, name: &str, value: &str, max_age: i64) -> Result<HeaderValue, ApiError> {
        let same_site = match self.same_site {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        };
        let mut cookie =
            format!("{name}={value}; Path=/; HttpOnly; SameSite={same_site}; Max-Age={max_age}");
        if let Some(domain) = &self.domain {
            cookie.push_str(&format!("; Domain={domain}"));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }

        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::InternalServerError(format!("Invalid cookie value: {}", e)))
    }
}

/// Read a cookie value from the request's `Cookie` headers.
///
/// Empty values count as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
