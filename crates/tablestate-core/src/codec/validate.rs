//! Explicit tagged-variant validators for serialized slice entries.
//!
//! Shape validation only: variant/operator cross-consistency is the
//! constructing caller's invariant, and numeric range bounds are the UI's
//! to reconcile. Unknown object keys are tolerated; unknown column ids are
//! not (fail-closed).

use crate::{
    catalog::{FilterOperator, FilterVariant},
    codec::ColumnAllowList,
    state::{FilterEntry, FilterState, FilterValue, SortEntry, SortState},
};
use serde_json::Value as Json;
use thiserror::Error as ThisError;

///
/// ParseIssue
///
/// One reason a serialized slice was rejected. Collected exhaustively per
/// parse so rejections stay diagnosable even though the public surface
/// only reports `None`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ParseIssue {
    #[error("payload is not valid JSON")]
    Malformed,

    #[error("payload is not a JSON array")]
    NotAnArray,

    #[error("entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("entry {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} field `{field}` has the wrong type")]
    WrongType { index: usize, field: &'static str },

    #[error("entry {index} names unknown filter variant `{value}`")]
    UnknownVariant { index: usize, value: String },

    #[error("entry {index} names unknown operator `{value}`")]
    UnknownOperator { index: usize, value: String },

    #[error("entry {index} references unknown column `{id}`")]
    UnknownColumn { index: usize, id: String },
}

type Issues = Vec<ParseIssue>;

fn decode_array(raw: &str) -> Result<Vec<Json>, Issues> {
    let json: Json = serde_json::from_str(raw).map_err(|_| vec![ParseIssue::Malformed])?;

    match json {
        Json::Array(items) => Ok(items),
        _ => Err(vec![ParseIssue::NotAnArray]),
    }
}

fn require_str(
    object: &serde_json::Map<String, Json>,
    index: usize,
    field: &'static str,
    issues: &mut Issues,
) -> Option<String> {
    match object.get(field) {
        Some(Json::String(value)) => Some(value.clone()),
        Some(_) => {
            issues.push(ParseIssue::WrongType { index, field });
            None
        }
        None => {
            issues.push(ParseIssue::MissingField { index, field });
            None
        }
    }
}

fn check_column(
    allow: Option<&ColumnAllowList>,
    index: usize,
    id: &str,
    issues: &mut Issues,
) {
    if let Some(allow) = allow
        && !allow.contains(id)
    {
        issues.push(ParseIssue::UnknownColumn {
            index,
            id: id.to_string(),
        });
    }
}

fn sort_entry(item: &Json, index: usize, allow: Option<&ColumnAllowList>) -> Result<SortEntry, Issues> {
    let mut issues = Issues::new();

    let Json::Object(object) = item else {
        return Err(vec![ParseIssue::NotAnObject { index }]);
    };

    let id = require_str(object, index, "id", &mut issues);

    let desc = match object.get("desc") {
        Some(Json::Bool(desc)) => Some(*desc),
        Some(_) => {
            issues.push(ParseIssue::WrongType {
                index,
                field: "desc",
            });
            None
        }
        None => {
            issues.push(ParseIssue::MissingField {
                index,
                field: "desc",
            });
            None
        }
    };

    if let Some(id) = &id {
        check_column(allow, index, id, &mut issues);
    }

    match (id, desc) {
        (Some(id), Some(desc)) if issues.is_empty() => Ok(SortEntry { id, desc }),
        _ => Err(issues),
    }
}

fn filter_value(object: &serde_json::Map<String, Json>, index: usize, issues: &mut Issues) -> Option<FilterValue> {
    match object.get("value") {
        Some(Json::String(text)) => Some(FilterValue::Text(text.clone())),
        Some(Json::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Json::String(text) => values.push(text.clone()),
                    _ => {
                        issues.push(ParseIssue::WrongType {
                            index,
                            field: "value",
                        });
                        return None;
                    }
                }
            }
            Some(FilterValue::List(values))
        }
        Some(_) => {
            issues.push(ParseIssue::WrongType {
                index,
                field: "value",
            });
            None
        }
        None => {
            issues.push(ParseIssue::MissingField {
                index,
                field: "value",
            });
            None
        }
    }
}

fn filter_entry(
    item: &Json,
    index: usize,
    allow: Option<&ColumnAllowList>,
) -> Result<FilterEntry, Issues> {
    let mut issues = Issues::new();

    let Json::Object(object) = item else {
        return Err(vec![ParseIssue::NotAnObject { index }]);
    };

    let id = require_str(object, index, "id", &mut issues);
    let value = filter_value(object, index, &mut issues);

    let variant = require_str(object, index, "variant", &mut issues).and_then(|raw| {
        FilterVariant::parse_wire(&raw).or_else(|| {
            issues.push(ParseIssue::UnknownVariant { index, value: raw });
            None
        })
    });

    let operator = require_str(object, index, "operator", &mut issues).and_then(|raw| {
        FilterOperator::parse_wire(&raw).or_else(|| {
            issues.push(ParseIssue::UnknownOperator { index, value: raw });
            None
        })
    });

    let filter_id = require_str(object, index, "filterId", &mut issues);

    if let Some(id) = &id {
        check_column(allow, index, id, &mut issues);
    }

    match (id, value, variant, operator, filter_id) {
        (Some(id), Some(value), Some(variant), Some(operator), Some(filter_id))
            if issues.is_empty() =>
        {
            Ok(FilterEntry {
                id,
                value,
                variant,
                operator,
                filter_id,
            })
        }
        _ => Err(issues),
    }
}

pub(crate) fn sort_state_from_str(
    raw: &str,
    allow: Option<&ColumnAllowList>,
) -> Result<SortState, Issues> {
    let items = decode_array(raw)?;

    let mut entries = Vec::with_capacity(items.len());
    let mut issues = Issues::new();

    for (index, item) in items.iter().enumerate() {
        match sort_entry(item, index, allow) {
            Ok(entry) => entries.push(entry),
            Err(mut entry_issues) => issues.append(&mut entry_issues),
        }
    }

    if issues.is_empty() {
        Ok(SortState(entries))
    } else {
        Err(issues)
    }
}

pub(crate) fn filter_state_from_str(
    raw: &str,
    allow: Option<&ColumnAllowList>,
) -> Result<FilterState, Issues> {
    let items = decode_array(raw)?;

    let mut entries = Vec::with_capacity(items.len());
    let mut issues = Issues::new();

    for (index, item) in items.iter().enumerate() {
        match filter_entry(item, index, allow) {
            Ok(entry) => entries.push(entry),
            Err(mut entry_issues) => issues.append(&mut entry_issues),
        }
    }

    if issues.is_empty() {
        Ok(FilterState(entries))
    } else {
        Err(issues)
    }
}
