//! tablestate keeps a data table's pagination, sorting, and column filters
//! synchronized with a serialized, shareable representation (typically a
//! URL query string), validating that representation against the table's
//! column configuration and suppressing redundant writes.
//!
//! ## Crate layout
//! - `core::catalog`: filter variants and their legal operators.
//! - `core::codec`: fail-closed wire codecs for the sort/filter slices.
//! - `core::normalize`: raw query values into column-filter lists.
//! - `core::debounce`: cooperative debounce for keystroke-driven updates.
//! - `core::orchestrator`: the five-slice query-state coordinator.
//! - `core::store`: the persisted-store contract plus an in-memory impl.
//!
//! The `prelude` module mirrors the surface a table-bearing host needs.

pub use tablestate_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use tablestate_core::prelude::*;
    pub use tablestate_core::store::{MemoryStore, StateStore, WriteOptions};
}
