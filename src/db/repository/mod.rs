//! Repository layer — measurement-scoped database operations.
//!
//! Free functions over a borrowed [`rusqlite::Connection`]; the adapter in
//! [`crate::db`] owns the connection and its locking.

mod measurement;

pub use measurement::*;
