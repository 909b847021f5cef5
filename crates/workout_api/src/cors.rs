use std::fmt;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins permitted to call the API from a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Configured as `*`.
    Any,
    List(Vec<HeaderValue>),
}

impl AllowedOrigins {
    /// Parse `*` or a comma separated origin list. An empty list, an entry
    /// that is not a valid header value, or a `*` mixed into a list is an
    /// error.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(Self::Any);
        }

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "*" {
                    return Err("'*' cannot be combined with other origins".to_string());
                }
                HeaderValue::from_str(s).map_err(|_| format!("'{s}' is not a valid origin"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if origins.is_empty() {
            return Err("no origins given; use '*' to allow any origin".into());
        }
        Ok(Self::List(origins))
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::List(vec![HeaderValue::from_static("http://localhost:3000")])
    }
}

impl fmt::Display for AllowedOrigins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::List(origins) => {
                let joined: Vec<&str> = origins.iter().filter_map(|o| o.to_str().ok()).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

/// Cross-origin policy for browser clients.
pub fn cors_layer(allowed: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match allowed {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(origins) => AllowOrigin::list(origins.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .expose_headers([HeaderName::from_static("x-custom-header")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_allows_any_origin() {
        assert_eq!(AllowedOrigins::parse(" * ").unwrap(), AllowedOrigins::Any);
    }

    #[test]
    fn list_is_trimmed_and_split() {
        let parsed = AllowedOrigins::parse("http://a.example, https://b.example,").unwrap();
        assert_eq!(parsed.to_string(), "http://a.example,https://b.example");
    }

    #[test]
    fn empty_or_broken_lists_are_rejected() {
        assert!(AllowedOrigins::parse("").is_err());
        assert!(AllowedOrigins::parse(" , ").is_err());
        assert!(AllowedOrigins::parse("http://a.example,\u{7f}bad").is_err());
        assert!(AllowedOrigins::parse("http://a.example,*").is_err());
    }
}
