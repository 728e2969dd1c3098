use axum::http::{header, HeaderValue};
use axum::Router;
use std::env;
use tower_http::set_header::SetResponseHeaderLayer;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
// Page payloads reference externally hosted venue/artist images
const CSP_VALUE: &str = "default-src 'self'; img-src * data:";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";

/// Stamp the standard security headers on every response. HSTS is only added
/// in production, where the server sits behind HTTPS.
pub fn apply_security_headers(router: Router) -> Router {
    let router = router
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static(NOSNIFF),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static(DENY),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CSP_VALUE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static(REFERRER_POLICY_VALUE),
        ));

    if hsts_enabled() {
        router.layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        ))
    } else {
        router
    }
}

fn hsts_enabled() -> bool {
    let is_production = is_production(env::var("RUST_ENV").ok());

    if is_production {
        tracing::info!("Security: HSTS header enabled (production mode)");
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }

    is_production
}

fn is_production(rust_env: Option<String>) -> bool {
    rust_env
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_only_in_production() {
        assert!(!is_production(None));
        assert!(!is_production(Some("development".to_string())));
        assert!(is_production(Some("production".to_string())));
        assert!(is_production(Some("PRODUCTION".to_string())));
    }

    #[test]
    fn test_header_values_parse() {
        assert!(CSP_VALUE.parse::<HeaderValue>().is_ok());
        assert!(HSTS_VALUE.parse::<HeaderValue>().is_ok());
    }
}
