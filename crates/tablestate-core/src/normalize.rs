//! Column filter normalization: raw per-column query values become the
//! table's internal column-filter list.
//!
//! Scalar splitting is delimiter-tolerant: any run of non-alphanumeric
//! characters separates values, so `,`, `.`, and whitespace all work
//! without the caller picking a delimiter.

use indexmap::IndexMap;

///
/// RawQueryValue
///
/// A per-column value as read from the persisted store: absent, a single
/// scalar, or an explicit list.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawQueryValue {
    Null,
    Text(String),
    List(Vec<String>),
}

impl From<&str> for RawQueryValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<String>> for RawQueryValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

///
/// ColumnFilter
///
/// One normalized column filter: the column id and its value list.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnFilter {
    pub id: String,
    pub value: Vec<String>,
}

/// Split a scalar on runs of characters outside `[0-9A-Za-z]`, discarding
/// empty fragments. Pure-alphanumeric scalars come back as one fragment.
fn split_scalar(raw: &str) -> Vec<String> {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|fragment| !fragment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Build the column-filter list from a raw query-value map. Null entries
/// are dropped, lists pass through, scalars are split. Output order is the
/// map's insertion order.
#[must_use]
pub fn build_column_filters(raw: &IndexMap<String, RawQueryValue>) -> Vec<ColumnFilter> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.iter()
        .filter_map(|(id, value)| {
            let value = match value {
                RawQueryValue::Null => return None,
                RawQueryValue::List(items) => items.clone(),
                RawQueryValue::Text(text) => split_scalar(text),
            };

            Some(ColumnFilter {
                id: id.clone(),
                value,
            })
        })
        .collect()
}

///
/// TESTS
///
