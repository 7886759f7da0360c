//! Module: codec
//! Responsibility: wire codecs for the sort and filter slices.
//! Does not own: store access, slice defaults, or debounce scheduling.
//! Boundary: the only place serialized strings become typed state.
//!
//! Failure never escapes this boundary: malformed input, schema
//! violations, and unknown column references all degrade to `None`, and
//! callers treat `None` as "fall back to the default state".

pub(crate) mod validate;

#[cfg(test)]
mod tests;

use crate::{
    obs::{self, SliceKind, StateEvent},
    state::{FilterState, SortState},
};
use std::collections::BTreeSet;

pub use validate::ParseIssue;

///
/// ColumnAllowList
///
/// Normalized set of column ids a parsed slice may reference. Built from
/// any iterable of ids; lists and sets are equivalent inputs.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnAllowList(BTreeSet<String>);

impl ColumnAllowList {
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnAllowList {
    fn from_iter<I: IntoIterator<Item = S>>(ids: I) -> Self {
        Self::new(ids)
    }
}

/// Parse a serialized sort slice. Any decode failure, schema violation, or
/// unknown column reference yields `None`; one bad entry invalidates the
/// whole slice.
#[must_use]
pub fn parse_sort_state(raw: &str, allow: Option<&ColumnAllowList>) -> Option<SortState> {
    match validate::sort_state_from_str(raw, allow) {
        Ok(state) => Some(state),
        Err(_issues) => {
            obs::record(StateEvent::ParseRejected {
                slice: SliceKind::Sort,
            });
            None
        }
    }
}

/// Parse a serialized filter slice, with the same fail-closed semantics as
/// `parse_sort_state`.
#[must_use]
pub fn parse_filter_state(raw: &str, allow: Option<&ColumnAllowList>) -> Option<FilterState> {
    match validate::filter_state_from_str(raw, allow) {
        Ok(state) => Some(state),
        Err(_issues) => {
            obs::record(StateEvent::ParseRejected {
                slice: SliceKind::Filters,
            });
            None
        }
    }
}

/// Serialize a sort slice to its wire form.
#[must_use]
pub fn serialize_sort_state(state: &SortState) -> String {
    // These derives serialize infallibly (string keys, no custom Serialize).
    serde_json::to_string(state).unwrap_or_default()
}

/// Serialize a filter slice to its wire form.
#[must_use]
pub fn serialize_filter_state(state: &FilterState) -> String {
    serde_json::to_string(state).unwrap_or_default()
}
