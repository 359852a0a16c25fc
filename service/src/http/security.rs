//! Security headers middleware.
//!
//! Builds the response header set once from configuration and stamps it
//! onto every response. Add [`security_headers_middleware`] as an outer
//! layer together with an `Extension` carrying the prebuilt list.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
        HeaderName, HeaderValue,
    },
    middleware::Next,
    response::Response,
    Extension,
};

use crate::config::SecurityHeadersConfig;

/// The prebuilt header set shared across requests.
pub type SecurityHeaders = Arc<Vec<(HeaderName, HeaderValue)>>;

/// Build the security header set from configuration.
///
/// Header values that cannot be encoded are skipped with a warning rather
/// than failing startup; config validation catches the common mistakes
/// before this runs.
#[must_use]
pub fn build_security_headers(config: &SecurityHeadersConfig) -> SecurityHeaders {
    let mut headers = vec![(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"))];

    let mut push = |name: HeaderName, value: &str| match HeaderValue::from_str(value) {
        Ok(value) => headers.push((name, value)),
        Err(_) => tracing::warn!(header = %name, value, "skipping unencodable security header"),
    };

    push(X_FRAME_OPTIONS, &config.frame_options);
    push(CONTENT_SECURITY_POLICY, &config.content_security_policy);
    push(REFERRER_POLICY, &config.referrer_policy);

    if config.hsts_enabled {
        let directive = if config.hsts_include_subdomains {
            format!("max-age={}; includeSubDomains", config.hsts_max_age)
        } else {
            format!("max-age={}", config.hsts_max_age)
        };
        push(STRICT_TRANSPORT_SECURITY, &directive);
    }

    Arc::new(headers)
}

/// Stamp the prebuilt security headers onto every response.
pub async fn security_headers_middleware(
    Extension(headers): Extension<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    for (name, value) in headers.iter() {
        response.headers_mut().insert(name.clone(), value.clone());
    }
    response
}
