//! Test app builder that mirrors main.rs wiring with injectable deps/fixtures.
//!
//! This module provides a [`TestAppBuilder`] that constructs an Axum router matching
//! the production configuration in `main.rs`, but with the ability to inject a
//! fixture directory and test-specific configurations.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_full_app() {
//!     let app = TestAppBuilder::new()
//!         .with_rest()
//!         .with_cors(&["http://localhost:5173"])
//!         .build();
//!
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::rest_only()`] - REST routes over the fixture directory
//! - [`TestAppBuilder::with_fixtures()`] - Full app with fixture directory, CORS and headers

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use badgervoice_api::{
    build_info::BuildInfoProvider,
    config::SecurityHeadersConfig,
    http::{build_security_headers, security_headers_middleware},
    rest::{self, ApiDoc},
};
use bv_directory::Directory;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::fixtures;

/// Health check handler (mirrors main.rs)
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Builder for test applications that mirrors main.rs wiring.
///
/// Use the builder pattern to construct an Axum router with the exact same
/// layer ordering and configuration as production, while allowing injection
/// of a fixture directory for testing.
pub struct TestAppBuilder {
    /// Whether to include REST API routes
    include_rest: bool,
    /// Whether to include health check route
    include_health: bool,
    /// Whether to include Swagger UI
    include_swagger: bool,
    /// Reference directory (None uses the shared fixture tables)
    directory: Option<Arc<Directory>>,
    /// Custom build info provider (None uses from_env())
    build_info: Option<BuildInfoProvider>,
    /// CORS allowed origins (None means no CORS layer)
    cors_origins: Option<Vec<String>>,
    /// Security headers config (None means disabled)
    security_headers: Option<SecurityHeadersConfig>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_rest: false,
            include_health: false,
            include_swagger: false,
            directory: None,
            build_info: None,
            cors_origins: None,
            security_headers: None,
        }
    }

    // =========================================================================
    // Preset Builders
    // =========================================================================

    /// Create a minimal app with only the health check endpoint.
    ///
    /// Use this for simple connectivity tests.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new().with_health()
    }

    /// Create an app with the REST routes over the fixture directory.
    ///
    /// No CORS or security headers.
    #[must_use]
    pub fn rest_only() -> Self {
        Self::new().with_rest().with_health()
    }

    /// Create a full app over the fixture directory.
    ///
    /// Mirrors production main.rs wiring but with the in-memory fixture
    /// tables instead of downloaded ones. Includes all routes, CORS, and
    /// security headers.
    #[must_use]
    pub fn with_fixtures() -> Self {
        Self::new()
            .with_rest()
            .with_health()
            .with_swagger()
            .with_cors(&["http://localhost:5173"])
            .with_security_headers_default()
    }

    // =========================================================================
    // Component Configuration
    // =========================================================================

    /// Include REST API routes (/api/v1/* and /build-info).
    #[must_use]
    pub fn with_rest(mut self) -> Self {
        self.include_rest = true;
        self
    }

    /// Include health check route (/health).
    #[must_use]
    pub fn with_health(mut self) -> Self {
        self.include_health = true;
        self
    }

    /// Include Swagger UI (/swagger-ui).
    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.include_swagger = true;
        self
    }

    /// Serve a custom reference directory.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<Directory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Configure CORS with specific allowed origins.
    ///
    /// Pass an empty slice to block all cross-origin requests.
    /// Pass `&["*"]` to allow any origin.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Disable CORS layer entirely.
    #[must_use]
    pub fn without_cors(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable security headers with default configuration.
    #[must_use]
    pub fn with_security_headers_default(mut self) -> Self {
        self.security_headers = Some(SecurityHeadersConfig::default());
        self
    }

    /// Enable security headers with custom configuration.
    #[must_use]
    pub fn with_security_headers(mut self, config: SecurityHeadersConfig) -> Self {
        self.security_headers = Some(config);
        self
    }

    /// Use a custom build info provider.
    #[must_use]
    pub fn with_build_info(mut self, provider: BuildInfoProvider) -> Self {
        self.build_info = Some(provider);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the Axum router.
    ///
    /// The layer ordering matches main.rs exactly:
    /// 1. Routes (REST, Swagger, Health)
    /// 2. Extensions (directory, build info)
    /// 3. CORS layer
    /// 4. Security headers middleware (outermost)
    #[must_use]
    pub fn build(self) -> Router {
        let provider = self.build_info.unwrap_or_else(BuildInfoProvider::from_env);
        let build_info = provider.build_info();
        let directory = self.directory.unwrap_or_else(fixtures::sample_directory);

        // Start building the router
        let mut app = Router::new();

        // Add routes
        if self.include_rest {
            let rest_v1 = Router::new()
                .route("/letters", get(rest::list_letters))
                .route("/letters/{topic}", get(rest::get_letter))
                .route("/representatives", post(rest::find_representatives))
                .route("/mailto", post(rest::compose_mailto));
            app = app
                .nest("/api/v1", rest_v1)
                .route("/build-info", get(rest::get_build_info));
        }

        if self.include_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        if self.include_health {
            app = app.route("/health", get(health_check));
        }

        // Add extensions
        app = app.layer(Extension(directory)).layer(Extension(build_info));

        // Add CORS layer if configured
        if let Some(origins) = self.cors_origins {
            let allow_origin: AllowOrigin = if origins.iter().any(|o| o == "*") {
                AllowOrigin::any()
            } else if origins.is_empty() {
                AllowOrigin::list(Vec::<HeaderValue>::new())
            } else {
                let header_values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect();
                AllowOrigin::list(header_values)
            };

            app = app.layer(
                CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers(Any)
                    .allow_origin(allow_origin),
            );
        }

        // Add security headers middleware if configured
        if let Some(config) = self.security_headers {
            if config.enabled {
                let headers = build_security_headers(&config);
                app = app
                    .layer(middleware::from_fn(security_headers_middleware))
                    .layer(Extension(headers));
            }
        }

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{
            header::{X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
            Request,
        },
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_minimal_builder_creates_health_route() {
        let app = TestAppBuilder::minimal().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rest_only_builder() {
        let app = TestAppBuilder::rest_only().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/letters")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_with_fixtures_builder() {
        let app = TestAppBuilder::with_fixtures().build();

        // Health check should work
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);

        // Build info should work
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/build-info")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let app = TestAppBuilder::minimal()
            .with_security_headers_default()
            .build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(X_CONTENT_TYPE_OPTIONS),
            Some(&HeaderValue::from_static("nosniff"))
        );
        assert_eq!(
            response.headers().get(X_FRAME_OPTIONS),
            Some(&HeaderValue::from_static("DENY"))
        );
    }
}
