//! Tessera Infrastructure - Concrete adapters
//!
//! Implementations of the application-layer ports: a reqwest HTTP
//! transport, the reqwest reissue client, the system clock, file-backed
//! credential stores, and the SDK facade that wires a whole session
//! together.

pub mod adapters;
pub mod persistence;
pub mod reissue;
pub mod sdk;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use persistence::{FileCookieStore, FileKeyValueStore};
pub use reissue::HttpReissueClient;
pub use sdk::AuthSdk;
