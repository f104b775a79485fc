//! File-backed credential stores.
//!
//! Both stores keep a single JSON file under a caller-supplied data
//! directory. A missing file reads as an empty store; the directory is
//! created on first write. These files hold credentials and belong in
//! `.gitignore`.

mod cookie_store;
mod key_value_store;

pub use cookie_store::FileCookieStore;
pub use key_value_store::FileKeyValueStore;
