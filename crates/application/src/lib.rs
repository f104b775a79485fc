//! Tessera Application - Session use cases and ports
//!
//! This crate holds the token-session use cases: the session manager
//! (storage, validation, reissue, teardown), the single-flight refresh
//! coordinator, and the authorized HTTP client that ties them together.
//! All I/O goes through the port traits in [`ports`].

pub mod client;
pub mod coordinator;
pub mod error;
pub mod ports;
pub mod session;
pub mod stores;

pub use client::AuthorizedClient;
pub use coordinator::{RefreshCoordinator, RefreshOutcome, RefreshTicket};
pub use error::SessionError;
pub use session::SessionManager;
pub use stores::{MemoryCookieStore, MemoryKeyValueStore};
