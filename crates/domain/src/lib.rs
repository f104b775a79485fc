//! Tessera Domain - Core token lifecycle types
//!
//! This crate defines the domain model for the Tessera bearer-token
//! lifecycle library. All types here are pure Rust with no I/O
//! dependencies.

pub mod config;
pub mod cookie;
pub mod error;
pub mod id;
pub mod request;
pub mod response;
pub mod token;

pub use config::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_TTL_DAYS, LEGACY_TTL_DAYS, SessionConfig,
};
pub use cookie::{CookieJar, CookieRecord, SITE_ROOT_PATH};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use request::{Header, HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use token::{TokenClaims, TokenPair, TokenValidation, ValidationError};
