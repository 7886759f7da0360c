//! Module: store
//! Responsibility: the persisted key-value contract and an in-memory impl.
//! Does not own: serialization, equality gating, or slice defaults.
//! Boundary: the engine's only view of URL/query-string style persistence.

use std::collections::BTreeMap;

///
/// HistoryMode
///
/// Whether a write creates a new navigation history entry or replaces the
/// current one.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HistoryMode {
    Push,
    #[default]
    Replace,
}

///
/// WriteOptions
///
/// Transport-level knobs for one write. `debounce_ms`/`throttle_ms` rate-
/// limit the transport itself and are distinct from the engine's input
/// debounce.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteOptions {
    pub history: HistoryMode,
    pub scroll: bool,
    pub shallow: bool,
    pub debounce_ms: Option<u64>,
    pub throttle_ms: Option<u64>,
    pub clear_on_default: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            history: HistoryMode::Replace,
            scroll: false,
            shallow: true,
            debounce_ms: None,
            throttle_ms: None,
            clear_on_default: true,
        }
    }
}

///
/// StateStore
///
/// Shared, ambient persisted store (conceptually one per table-bearing
/// view). All access is synchronous and single-threaded; `set` with
/// `value: None` clears the key.
///

pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: Option<&str>, options: &WriteOptions);
}

// The store is conceptually one shared resource per table-bearing view;
// a shared handle is itself a store.
impl<S: StateStore> StateStore for std::rc::Rc<std::cell::RefCell<S>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: Option<&str>, options: &WriteOptions) {
        self.borrow_mut().set(key, value, options);
    }
}

///
/// MemoryStore
///
/// In-memory `StateStore` for tests and headless embedding. Counts writes
/// so tests can assert that the equality gate suppressed redundant ones.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, bypassing the write counter. Models external mutation
    /// such as a hand-edited URL or a navigation event.
    pub fn seed(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key, bypassing the write counter.
    pub fn unseed(&mut self, key: &str) {
        self.entries.remove(key);
    }

    #[must_use]
    pub const fn write_count(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<&str>, _options: &WriteOptions) {
        self.writes += 1;
        match value {
            Some(value) => {
                self.entries.insert(key.to_string(), value.to_string());
            }
            None => {
                self.entries.remove(key);
            }
        }
    }
}

///
/// TESTS
///
