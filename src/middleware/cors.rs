use std::time::Duration;

use axum::http::{HeaderValue, header, request::Parts};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// An allowed origin where `*` stands for any run of characters,
/// e.g. `http://localhost:*` or `https://*.ngrok-free.app`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPattern(String);

impl OriginPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn matches(&self, origin: &str) -> bool {
        let mut segments = self.0.split('*');
        let head = segments.next().unwrap_or_default();
        let Some(mut rest) = origin.strip_prefix(head) else {
            return false;
        };

        let tail: Vec<&str> = segments.collect();
        let Some((last, middle)) = tail.split_last() else {
            return rest.is_empty();
        };
        for segment in middle {
            match rest.find(segment) {
                Some(idx) => rest = &rest[idx + segment.len()..],
                None => return false,
            }
        }
        rest.ends_with(last)
    }
}

/// CORS for the public API: credentialed requests from the configured
/// origin patterns, any method and header, preflight cached for an hour.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let patterns: Vec<OriginPattern> = origins.iter().cloned().map(OriginPattern::new).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| patterns.iter().any(|pattern| pattern.matches(origin)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::AUTHORIZATION, header::CONTENT_DISPOSITION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_origin_has_no_wildcard() {
        let pattern = OriginPattern::new("https://shopcardapplication.web.app");
        assert!(pattern.matches("https://shopcardapplication.web.app"));
        assert!(!pattern.matches("https://shopcardapplication.web.app.evil.com"));
    }

    #[test]
    fn port_wildcard() {
        let pattern = OriginPattern::new("http://localhost:*");
        assert!(pattern.matches("http://localhost:5173"));
        assert!(!pattern.matches("http://localhost.evil.com:80"));
        assert!(!pattern.matches("https://localhost:5173"));
    }

    #[test]
    fn subdomain_wildcard() {
        let pattern = OriginPattern::new("https://*.ngrok-free.app");
        assert!(pattern.matches("https://abc123.ngrok-free.app"));
        assert!(!pattern.matches("https://ngrok-free.app"));
        assert!(!pattern.matches("https://abc.ngrok-free.app.evil.com"));
    }
}
