//! Module: orchestrator
//! Responsibility: coordinate the five persisted query-state slices.
//! Does not own: rendering, row filtering/sorting, or the store transport.
//! Boundary: the engine surface the presentation layer talks to.
//!
//! Every slice read goes through the codec and degrades to its default on
//! failure; every write goes through the equality gate so unchanged state
//! never touches navigation history.


use crate::{
    codec::{
        ColumnAllowList, parse_filter_state, parse_sort_state, serialize_filter_state,
        serialize_sort_state,
    },
    column::ColumnSpec,
    debounce::{Clock, Debouncer, SystemClock},
    normalize::RawQueryValue,
    obs::{self, SliceKind, StateEvent},
    state::{FilterEntry, FilterState, FilterValue, JoinOperator, SortState, TableQueryState},
    store::{HistoryMode, StateStore, WriteOptions},
};
use std::time::Duration;

///
/// Timings
///
/// Resolved debounce/throttle windows, exposed for presentation-layer
/// introspection.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timings {
    pub debounce_ms: u64,
    pub throttle_ms: u64,
}

///
/// TableConfig
///
/// Per-table configuration: persisted key names, slice defaults, timing
/// windows, and transport options.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub page_key: String,
    pub per_page_key: String,
    pub sort_key: String,
    pub filters_key: String,
    pub join_operator_key: String,

    pub default_per_page: u64,
    pub default_sorting: SortState,
    pub default_filters: FilterState,

    pub debounce_ms: u64,
    pub throttle_ms: u64,

    pub history: HistoryMode,
    pub scroll: bool,
    pub shallow: bool,
    pub clear_on_default: bool,

    /// When set, column-level filter wiring is bypassed entirely and a
    /// caller-provided filter UI owns the filters slice.
    pub enable_advanced_filter: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_key: "page".to_string(),
            per_page_key: "perPage".to_string(),
            sort_key: "sort".to_string(),
            filters_key: "filters".to_string(),
            join_operator_key: "joinOperator".to_string(),
            default_per_page: TableQueryState::DEFAULT_PER_PAGE,
            default_sorting: SortState::default(),
            default_filters: FilterState::default(),
            debounce_ms: 300,
            throttle_ms: 50,
            history: HistoryMode::Replace,
            scroll: false,
            shallow: true,
            clear_on_default: true,
            enable_advanced_filter: false,
        }
    }
}

impl TableConfig {
    #[must_use]
    pub fn with_default_sorting(mut self, sorting: SortState) -> Self {
        self.default_sorting = sorting;
        self
    }

    #[must_use]
    pub fn with_default_filters(mut self, filters: FilterState) -> Self {
        self.default_filters = filters;
        self
    }

    #[must_use]
    pub const fn with_default_per_page(mut self, per_page: u64) -> Self {
        self.default_per_page = per_page;
        self
    }

    #[must_use]
    pub const fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub const fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    #[must_use]
    pub const fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub const fn with_advanced_filter(mut self, enabled: bool) -> Self {
        self.enable_advanced_filter = enabled;
        self
    }

    #[must_use]
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.page_key = format!("{prefix}{}", self.page_key);
        self.per_page_key = format!("{prefix}{}", self.per_page_key);
        self.sort_key = format!("{prefix}{}", self.sort_key);
        self.filters_key = format!("{prefix}{}", self.filters_key);
        self.join_operator_key = format!("{prefix}{}", self.join_operator_key);
        self
    }

    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            history: self.history,
            scroll: self.scroll,
            shallow: self.shallow,
            debounce_ms: Some(self.debounce_ms),
            throttle_ms: Some(self.throttle_ms),
            clear_on_default: self.clear_on_default,
        }
    }
}

///
/// TableOrchestrator
///
/// Reducer-style coordinator over `TableQueryState`. Constructed against a
/// store and a set of column descriptors; the host event loop drives it
/// with presentation-layer updates plus `tick` for debounce delivery and
/// `sync_from_store` for external navigation signals.
///

#[derive(Debug)]
pub struct TableOrchestrator<S: StateStore, C: Clock = SystemClock> {
    config: TableConfig,
    columns: Vec<ColumnSpec>,
    store: S,
    state: TableQueryState,
    sortable: ColumnAllowList,
    filterable: ColumnAllowList,
    debouncer: Debouncer<FilterState, C>,
    write_options: WriteOptions,
}

impl<S: StateStore> TableOrchestrator<S, SystemClock> {
    #[must_use]
    pub fn new(store: S, columns: Vec<ColumnSpec>, config: TableConfig) -> Self {
        Self::with_clock(store, columns, config, SystemClock)
    }
}

impl<S: StateStore, C: Clock> TableOrchestrator<S, C> {
    #[must_use]
    pub fn with_clock(store: S, columns: Vec<ColumnSpec>, config: TableConfig, clock: C) -> Self {
        let sortable = columns
            .iter()
            .filter(|column| column.enable_sorting)
            .map(|column| column.id.clone())
            .collect::<ColumnAllowList>();

        // Advanced mode: filterable-column derivation is short-circuited to
        // empty; a custom filter UI owns the filters slice.
        let filterable = if config.enable_advanced_filter {
            ColumnAllowList::default()
        } else {
            columns
                .iter()
                .filter(|column| column.enable_column_filter)
                .map(|column| column.id.clone())
                .collect()
        };

        let debouncer = Debouncer::with_clock(Duration::from_millis(config.debounce_ms), clock);
        let write_options = config.write_options();

        let mut orchestrator = Self {
            config,
            columns,
            store,
            state: TableQueryState::default(),
            sortable,
            filterable,
            debouncer,
            write_options,
        };
        orchestrator.sync_from_store();
        orchestrator
    }

    // --- Introspection ---

    #[must_use]
    pub const fn state(&self) -> &TableQueryState {
        &self.state
    }

    #[must_use]
    pub const fn timings(&self) -> Timings {
        Timings {
            debounce_ms: self.config.debounce_ms,
            throttle_ms: self.config.throttle_ms,
        }
    }

    /// Zero-based page index for the rendering layer.
    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.state.page_index()
    }

    /// The filters that should be applied to data right now.
    #[must_use]
    pub fn valid_filters(&self) -> FilterState {
        self.state.filters.valid_filters()
    }

    #[must_use]
    pub fn sortable_columns(&self) -> Vec<&ColumnSpec> {
        self.columns
            .iter()
            .filter(|column| column.enable_sorting)
            .collect()
    }

    /// Filterable column descriptors; empty in advanced-filter mode.
    #[must_use]
    pub fn filterable_columns(&self) -> Vec<&ColumnSpec> {
        if self.config.enable_advanced_filter {
            return Vec::new();
        }

        self.columns
            .iter()
            .filter(|column| column.enable_column_filter)
            .collect()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // --- Slice reads ---

    /// Re-derive every slice from the store, discarding in-memory state.
    /// Must be called when the store signals an external change (e.g.
    /// back/forward navigation); any pending debounced write predates the
    /// signal and is dropped.
    pub fn sync_from_store(&mut self) {
        self.debouncer.cancel();

        self.state = TableQueryState {
            page: self.read_page(),
            per_page: self.read_per_page(),
            sorting: self.read_sorting(),
            filters: self.read_filters(),
            join_operator: self.read_join_operator(),
        };
    }

    fn read_page(&self) -> u64 {
        self.store
            .get(&self.config.page_key)
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(TableQueryState::DEFAULT_PAGE)
    }

    fn read_per_page(&self) -> u64 {
        self.store
            .get(&self.config.per_page_key)
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|per_page| *per_page > 0)
            .unwrap_or(self.config.default_per_page)
    }

    fn read_sorting(&self) -> SortState {
        self.store
            .get(&self.config.sort_key)
            .and_then(|raw| parse_sort_state(&raw, Some(&self.sortable)))
            .unwrap_or_else(|| self.config.default_sorting.clone())
    }

    fn read_filters(&self) -> FilterState {
        if self.config.enable_advanced_filter {
            return self.config.default_filters.clone();
        }

        self.store
            .get(&self.config.filters_key)
            .and_then(|raw| parse_filter_state(&raw, Some(&self.filterable)))
            .unwrap_or_else(|| self.config.default_filters.clone())
    }

    fn read_join_operator(&self) -> JoinOperator {
        self.store
            .get(&self.config.join_operator_key)
            .and_then(|raw| JoinOperator::parse_wire(&raw))
            .unwrap_or_default()
    }

    // --- Updates ---

    /// Apply a pagination change from the rendering layer. `page_index` is
    /// zero-based; the persisted page is always `page_index + 1`.
    pub fn apply_pagination_change(&mut self, page_index: u64, page_size: u64) {
        if page_size > 0 && page_size != self.state.per_page {
            self.state.per_page = page_size;
            self.write_per_page();
        }

        let page = page_index.saturating_add(1);
        if page != self.state.page {
            self.state.page = page;
            self.write_page();
        } else {
            obs::record(StateEvent::WriteSuppressed {
                slice: SliceKind::Page,
            });
        }
    }

    /// Apply a sorting change. A state referencing any column that is not
    /// sortable is silently ignored.
    pub fn apply_sorting_change(&mut self, sorting: SortState) {
        if sorting.iter().any(|entry| !self.sortable.contains(&entry.id)) {
            return;
        }

        if sorting == self.state.sorting {
            obs::record(StateEvent::WriteSuppressed {
                slice: SliceKind::Sort,
            });
            return;
        }

        self.state.sorting = sorting;
        self.write_sorting();
    }

    /// Apply a per-column filter change. Text and number input coalesces
    /// through the debounce window; discrete selection gestures commit
    /// immediately, folding in any pending debounced edits. A no-op in
    /// advanced-filter mode or for columns that are not filterable.
    pub fn apply_filter_change(&mut self, column_id: &str, value: &RawQueryValue) {
        if self.config.enable_advanced_filter || !self.filterable.contains(column_id) {
            return;
        }

        let variant = self
            .columns
            .iter()
            .find(|column| column.id == column_id)
            .map(ColumnSpec::variant)
            .unwrap_or_default();

        // Edits build on the pending draft when one is scheduled, so a
        // change in one column never erases a not-yet-fired change in
        // another.
        let base = self.debouncer.pending().unwrap_or(&self.state.filters);
        let mut next = FilterState(
            base.iter()
                .filter(|entry| entry.id != column_id)
                .cloned()
                .collect(),
        );

        let next_value = match value {
            RawQueryValue::Null => None,
            RawQueryValue::Text(text) => Some(FilterValue::Text(text.clone())),
            RawQueryValue::List(items) => Some(FilterValue::List(items.clone())),
        };

        // An emptied value clears the column's filter rather than leaving
        // an inactive entry in the persisted slice.
        if let Some(next_value) = next_value
            && !next_value.is_empty()
        {
            next.push(FilterEntry::new(column_id, next_value, variant));
        }

        if variant.is_interactive() {
            self.debouncer.schedule(next);
        } else {
            // A discrete gesture folds the draft into one immediate commit;
            // no stale snapshot is left behind to fire later.
            self.debouncer.cancel();
            self.commit_filters(next);
        }
    }

    /// Deliver an elapsed debounce window, if any. Returns whether a
    /// filter commit happened.
    pub fn tick(&mut self) -> bool {
        if let Some(filters) = self.debouncer.poll() {
            self.commit_filters(filters);
            true
        } else {
            false
        }
    }

    pub fn set_join_operator(&mut self, join_operator: JoinOperator) {
        if join_operator == self.state.join_operator {
            obs::record(StateEvent::WriteSuppressed {
                slice: SliceKind::JoinOperator,
            });
            return;
        }

        self.state.join_operator = join_operator;
        self.write_join_operator();
    }

    /// Clear all filters back to the configured default and commit
    /// immediately, dropping any pending debounced change.
    pub fn reset_filters(&mut self) {
        self.debouncer.cancel();
        let defaults = self.config.default_filters.clone();
        self.commit_filters(defaults);
    }

    // --- Slice writes ---

    /// Changing the filter set invalidates the current page position, so a
    /// page reset accompanies every accepted filter commit.
    fn commit_filters(&mut self, filters: FilterState) {
        if filters == self.state.filters {
            obs::record(StateEvent::WriteSuppressed {
                slice: SliceKind::Filters,
            });
            return;
        }

        self.state.filters = filters;
        self.write_filters();

        if self.state.page != TableQueryState::DEFAULT_PAGE {
            self.state.page = TableQueryState::DEFAULT_PAGE;
            self.write_page();
        }
    }

    fn write_slice(&mut self, slice: SliceKind, key: &str, serialized: &str, is_default: bool) {
        let value = if is_default && self.write_options.clear_on_default {
            None
        } else {
            Some(serialized)
        };

        self.store.set(key, value, &self.write_options);
        obs::record(StateEvent::WriteCommitted { slice });
    }

    fn write_page(&mut self) {
        let serialized = self.state.page.to_string();
        let is_default = self.state.page == TableQueryState::DEFAULT_PAGE;
        let key = self.config.page_key.clone();
        self.write_slice(SliceKind::Page, &key, &serialized, is_default);
    }

    fn write_per_page(&mut self) {
        let serialized = self.state.per_page.to_string();
        let is_default = self.state.per_page == self.config.default_per_page;
        let key = self.config.per_page_key.clone();
        self.write_slice(SliceKind::PerPage, &key, &serialized, is_default);
    }

    fn write_sorting(&mut self) {
        let serialized = serialize_sort_state(&self.state.sorting);
        let is_default = self.state.sorting == self.config.default_sorting;
        let key = self.config.sort_key.clone();
        self.write_slice(SliceKind::Sort, &key, &serialized, is_default);
    }

    fn write_filters(&mut self) {
        let serialized = serialize_filter_state(&self.state.filters);
        let is_default = self.state.filters == self.config.default_filters;
        let key = self.config.filters_key.clone();
        self.write_slice(SliceKind::Filters, &key, &serialized, is_default);
    }

    fn write_join_operator(&mut self) {
        let serialized = self.state.join_operator.as_wire().to_string();
        let is_default = self.state.join_operator == JoinOperator::default();
        let key = self.config.join_operator_key.clone();
        self.write_slice(SliceKind::JoinOperator, &key, &serialized, is_default);
    }
}
