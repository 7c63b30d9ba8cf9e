//! Security Module
//!
//! - Request Validation
//! - Security Middleware

pub mod middleware;
pub mod validation;

pub use middleware::security_headers_middleware;
pub use validation::{RequestValidator, ValidationError};
