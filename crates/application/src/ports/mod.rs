//! Ports (interfaces) for external collaborators
//!
//! The credential stores, the clock, the HTTP transport, and the reissue
//! endpoint are all host-provided surfaces; the traits here are their
//! contracts.

mod clock;
mod http;
mod reissue;
mod storage;

pub use clock::Clock;
pub use http::{HttpClient, HttpClientError};
pub use reissue::{ReissueClient, ReissueError};
pub use storage::{CookieStore, KeyValueStore, StorageError};
