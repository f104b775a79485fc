//! Port adapters backed by system facilities.

mod reqwest_transport;
mod system_clock;

pub use reqwest_transport::ReqwestHttpClient;
pub use system_clock::SystemClock;
