//! Module: state
//! Responsibility: typed sort/filter/pagination state carried by a table.
//! Does not own: wire parsing, allow-list validation, or store writes.
//! Boundary: value types shared by the codec and the orchestrator.

use crate::catalog::{FilterOperator, FilterVariant};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use time::OffsetDateTime;

thread_local! {
    static FILTER_ID_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Mint an opaque correlation id for a new filter entry.
///
/// Correlation ids are UI bookkeeping (stable list keys), never semantic
/// state; equality between filter entries ignores them.
#[must_use]
pub fn next_filter_id() -> String {
    FILTER_ID_SEQ.with(|seq| {
        let n = seq.get() + 1;
        seq.set(n);
        format!("f{n}")
    })
}

///
/// SortEntry
///
/// One sort key: column id plus direction. Order within a `SortState` is
/// significant (primary/secondary/tertiary sort).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortEntry {
    pub id: String,
    pub desc: bool,
}

impl SortEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, desc: bool) -> Self {
        Self {
            id: id.into(),
            desc,
        }
    }
}

///
/// SortState
///

#[repr(transparent)]
#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct SortState(pub Vec<SortEntry>);

impl From<Vec<SortEntry>> for SortState {
    fn from(entries: Vec<SortEntry>) -> Self {
        Self(entries)
    }
}

///
/// FilterValue
///
/// Filter payload: a single string or a sequence of strings. Dates travel
/// as epoch-millisecond strings; ranges as two-element sequences.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

///
/// FilterEntry
///
/// One column filter. `operator` must belong to the operator set legal for
/// `variant`; that cross-consistency is upheld by whoever constructs the
/// entry, not re-checked here or by the codec.
///

#[derive(Clone, Debug, Deserialize, Eq, Serialize)]
pub struct FilterEntry {
    pub id: String,
    pub value: FilterValue,
    pub variant: FilterVariant,
    pub operator: FilterOperator,
    #[serde(rename = "filterId")]
    pub filter_id: String,
}

// Equality intentionally excludes `filter_id`: two filter lists that differ
// only by correlation id are the same semantic state, and this equality is
// the gate that suppresses redundant store writes.
impl PartialEq for FilterEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.value == other.value
            && self.variant == other.variant
            && self.operator == other.operator
    }
}

impl FilterEntry {
    /// Construct an entry with the variant's default operator and a fresh
    /// correlation id.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>, variant: FilterVariant) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            variant,
            operator: crate::catalog::default_operator_for(variant),
            filter_id: next_filter_id(),
        }
    }

    /// Replace the operator.
    #[must_use]
    pub fn with_operator(mut self, operator: FilterOperator) -> Self {
        self.operator = operator;
        self
    }

    /// An entry is active iff it would constrain data: presence operators
    /// always do, anything else needs a non-empty value.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.operator.is_presence() || !self.value.is_empty()
    }
}

///
/// FilterState
///

#[repr(transparent)]
#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct FilterState(pub Vec<FilterEntry>);

impl FilterState {
    /// The entries that should be applied to data. Inactive entries stay in
    /// UI state but never reach the row model.
    #[must_use]
    pub fn valid_filters(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|entry| entry.is_active())
                .cloned()
                .collect(),
        )
    }
}

impl From<Vec<FilterEntry>> for FilterState {
    fn from(entries: Vec<FilterEntry>) -> Self {
        Self(entries)
    }
}

///
/// JoinOperator
///
/// How the effective filter set combines.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperator {
    #[default]
    And,
    Or,
}

impl JoinOperator {
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    #[must_use]
    pub fn parse_wire(raw: &str) -> Option<Self> {
        match raw {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

///
/// TableQueryState
///
/// The consolidated query state for one table. Re-derived from the
/// persisted store on every read; never cached across an external
/// navigation signal.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableQueryState {
    pub page: u64,
    pub per_page: u64,
    pub sorting: SortState,
    pub filters: FilterState,
    pub join_operator: JoinOperator,
}

impl TableQueryState {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_PER_PAGE: u64 = 10;

    /// Zero-based page index, the shape the rendering layer expects.
    /// The persisted page is one-based: `page = page_index + 1`.
    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Row offset of the current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for TableQueryState {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            per_page: Self::DEFAULT_PER_PAGE,
            sorting: SortState::default(),
            filters: FilterState::default(),
            join_operator: JoinOperator::default(),
        }
    }
}

///
/// NumberRange
///
/// A closed numeric selection. Construction reconciles inverted bounds by
/// swapping instead of rejecting.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

impl NumberRange {
    #[must_use]
    pub fn reconciled(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

///
/// DateRange
///
/// A date selection with either side optional. On the wire both sides are
/// epoch-millisecond strings inside a two-element filter value.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DateRange {
    pub from: Option<OffsetDateTime>,
    pub to: Option<OffsetDateTime>,
}

impl DateRange {
    /// Encode as a filter value: `[from_ms, to_ms]` with absent sides as
    /// empty strings.
    #[must_use]
    pub fn to_filter_value(&self) -> FilterValue {
        let encode = |side: Option<OffsetDateTime>| {
            side.map(|ts| {
                let millis = ts.unix_timestamp_nanos() / 1_000_000;
                millis.to_string()
            })
            .unwrap_or_default()
        };

        FilterValue::List(vec![encode(self.from), encode(self.to)])
    }

    /// Decode a filter value produced by `to_filter_value`. Fragments that
    /// are not epoch-millisecond numbers decode as absent sides.
    #[must_use]
    pub fn from_filter_value(value: &FilterValue) -> Self {
        let decode = |raw: &str| {
            raw.parse::<i128>()
                .ok()
                .and_then(|millis| {
                    OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000).ok()
                })
        };

        match value {
            FilterValue::List(items) => Self {
                from: items.first().and_then(|raw| decode(raw)),
                to: items.get(1).and_then(|raw| decode(raw)),
            },
            FilterValue::Text(raw) => Self {
                from: decode(raw),
                to: None,
            },
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_operator_for;

    fn text_filter(id: &str, value: &str) -> FilterEntry {
        FilterEntry::new(id, value, FilterVariant::Text)
    }

    #[test]
    fn empty_text_filter_is_inactive() {
        let state = FilterState::from(vec![text_filter("title", "")]);
        assert!(state.valid_filters().is_empty());
    }

    #[test]
    fn presence_operator_is_active_without_a_value() {
        let entry = text_filter("title", "").with_operator(FilterOperator::IsEmpty);
        assert!(entry.is_active());

        let state = FilterState::from(vec![entry]);
        assert_eq!(state.valid_filters().len(), 1);
    }

    #[test]
    fn empty_list_filter_is_inactive() {
        let entry = FilterEntry::new("status", Vec::<String>::new(), FilterVariant::MultiSelect);
        assert!(!entry.is_active());
    }

    #[test]
    fn equality_ignores_the_correlation_id() {
        let a = text_filter("title", "foo");
        let mut b = a.clone();
        b.filter_id = next_filter_id();
        assert_ne!(a.filter_id, b.filter_id);
        assert_eq!(a, b);

        let mut c = a.clone();
        c.value = FilterValue::from("bar");
        assert_ne!(a, c);
    }

    #[test]
    fn new_entries_get_the_variant_default_operator() {
        let entry = FilterEntry::new("status", vec!["active".to_string()], FilterVariant::MultiSelect);
        assert_eq!(entry.operator, default_operator_for(FilterVariant::MultiSelect));
        assert_eq!(entry.operator, FilterOperator::InArray);
    }

    #[test]
    fn filter_ids_are_unique() {
        let a = next_filter_id();
        let b = next_filter_id();
        assert_ne!(a, b);
    }

    #[test]
    fn page_index_conversion() {
        let state = TableQueryState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.page_index(), 0);

        let state = TableQueryState {
            page: 4,
            per_page: 25,
            ..TableQueryState::default()
        };
        assert_eq!(state.page_index(), 3);
        assert_eq!(state.offset(), 75);
    }

    #[test]
    fn offset_saturates_at_the_numeric_ceiling() {
        let state = TableQueryState {
            page: u64::MAX,
            per_page: u64::MAX,
            ..TableQueryState::default()
        };
        assert_eq!(state.offset(), u64::MAX);
    }

    #[test]
    fn inverted_number_range_is_swapped() {
        let range = NumberRange::reconciled(10.0, 2.0);
        assert_eq!(range.min, 2.0);
        assert_eq!(range.max, 10.0);
    }

    #[test]
    fn date_range_round_trips_through_filter_values() {
        let from = OffsetDateTime::from_unix_timestamp(1_700_000_000).ok();
        let range = DateRange { from, to: None };
        let decoded = DateRange::from_filter_value(&range.to_filter_value());
        assert_eq!(decoded, range);
    }
}
