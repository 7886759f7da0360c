//! Core engine for tablestate: typed table query state, the wire codecs
//! that keep it synchronized with a persisted key-value store, and the
//! orchestrator that coordinates updates from the presentation layer.
//!
//! The engine never renders and never filters rows. It produces and
//! validates *state*; a row-model engine consumes it.

// public exports are one module level down
pub mod catalog;
pub mod codec;
pub mod column;
pub mod debounce;
pub mod normalize;
pub mod obs;
pub mod orchestrator;
pub mod state;
pub mod store;

///
/// Prelude
///
/// Prelude contains only domain vocabulary. No stores, sinks, or
/// validators are re-exported here.
///

pub mod prelude {
    pub use crate::{
        catalog::{FilterOperator, FilterVariant, default_operator_for, operators_for},
        column::{ColumnMeta, ColumnSpec, SelectOption},
        orchestrator::{TableConfig, TableOrchestrator},
        state::{
            FilterEntry, FilterState, FilterValue, JoinOperator, SortEntry, SortState,
            TableQueryState,
        },
    };
}
