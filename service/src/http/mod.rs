//! HTTP utilities and middleware.

pub mod security;

pub use security::{build_security_headers, security_headers_middleware, SecurityHeaders};
