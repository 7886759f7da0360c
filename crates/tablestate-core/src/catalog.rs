//! Operator catalog: the legal comparison operators per filter variant.
//!
//! Pure lookup tables. No state, no failure modes.

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FilterVariant
///
/// The UI/semantic type of a filterable column.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterVariant {
    #[default]
    Text,
    Number,
    Range,
    Date,
    DateRange,
    Boolean,
    Select,
    MultiSelect,
}

impl FilterVariant {
    /// Wire name, as it appears inside serialized filter entries.
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Range => "range",
            Self::Date => "date",
            Self::DateRange => "dateRange",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::MultiSelect => "multiSelect",
        }
    }

    /// Parse a wire name. Unknown names return `None`.
    #[must_use]
    pub fn parse_wire(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "range" => Some(Self::Range),
            "date" => Some(Self::Date),
            "dateRange" => Some(Self::DateRange),
            "boolean" => Some(Self::Boolean),
            "select" => Some(Self::Select),
            "multiSelect" => Some(Self::MultiSelect),
            _ => None,
        }
    }

    /// Whether updates for this variant originate from keystrokes and
    /// should be coalesced before being persisted.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Text | Self::Number)
    }
}

impl fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

///
/// FilterOperator
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    ILike,
    NotILike,
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    IsBetween,
    IsRelativeToToday,
    InArray,
    NotInArray,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    /// Wire name, as it appears inside serialized filter entries.
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::ILike => "iLike",
            Self::NotILike => "notILike",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::IsBetween => "isBetween",
            Self::IsRelativeToToday => "isRelativeToToday",
            Self::InArray => "inArray",
            Self::NotInArray => "notInArray",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
        }
    }

    /// Parse a wire name. Unknown names return `None`.
    #[must_use]
    pub fn parse_wire(raw: &str) -> Option<Self> {
        match raw {
            "iLike" => Some(Self::ILike),
            "notILike" => Some(Self::NotILike),
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "isBetween" => Some(Self::IsBetween),
            "isRelativeToToday" => Some(Self::IsRelativeToToday),
            "inArray" => Some(Self::InArray),
            "notInArray" => Some(Self::NotInArray),
            "isEmpty" => Some(Self::IsEmpty),
            "isNotEmpty" => Some(Self::IsNotEmpty),
            _ => None,
        }
    }

    /// Whether this operator evaluates without a value.
    #[must_use]
    pub const fn is_presence(&self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

///
/// OperatorOption
///
/// A labeled operator menu entry.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OperatorOption {
    pub label: &'static str,
    pub value: FilterOperator,
}

const fn op(label: &'static str, value: FilterOperator) -> OperatorOption {
    OperatorOption { label, value }
}

const TEXT_OPERATORS: &[OperatorOption] = &[
    op("Contains", FilterOperator::ILike),
    op("Does not contain", FilterOperator::NotILike),
    op("Is", FilterOperator::Eq),
    op("Is not", FilterOperator::Ne),
    op("Is empty", FilterOperator::IsEmpty),
    op("Is not empty", FilterOperator::IsNotEmpty),
];

const NUMERIC_OPERATORS: &[OperatorOption] = &[
    op("Is", FilterOperator::Eq),
    op("Is not", FilterOperator::Ne),
    op("Is less than", FilterOperator::Lt),
    op("Is less than or equal to", FilterOperator::Lte),
    op("Is greater than", FilterOperator::Gt),
    op("Is greater than or equal to", FilterOperator::Gte),
    op("Is between", FilterOperator::IsBetween),
    op("Is empty", FilterOperator::IsEmpty),
    op("Is not empty", FilterOperator::IsNotEmpty),
];

const DATE_OPERATORS: &[OperatorOption] = &[
    op("Is", FilterOperator::Eq),
    op("Is not", FilterOperator::Ne),
    op("Is before", FilterOperator::Lt),
    op("Is after", FilterOperator::Gt),
    op("Is on or before", FilterOperator::Lte),
    op("Is on or after", FilterOperator::Gte),
    op("Is between", FilterOperator::IsBetween),
    op("Is relative to today", FilterOperator::IsRelativeToToday),
    op("Is empty", FilterOperator::IsEmpty),
    op("Is not empty", FilterOperator::IsNotEmpty),
];

const BOOLEAN_OPERATORS: &[OperatorOption] = &[
    op("Is", FilterOperator::Eq),
    op("Is not", FilterOperator::Ne),
];

const SELECT_OPERATORS: &[OperatorOption] = &[
    op("Is", FilterOperator::Eq),
    op("Is not", FilterOperator::Ne),
    op("Is empty", FilterOperator::IsEmpty),
    op("Is not empty", FilterOperator::IsNotEmpty),
];

const MULTI_SELECT_OPERATORS: &[OperatorOption] = &[
    op("Has any of", FilterOperator::InArray),
    op("Has none of", FilterOperator::NotInArray),
    op("Is empty", FilterOperator::IsEmpty),
    op("Is not empty", FilterOperator::IsNotEmpty),
];

/// Operator menu for a variant. Non-empty, stable order; the first entry
/// is the variant's conventional default.
#[must_use]
pub const fn operators_for(variant: FilterVariant) -> &'static [OperatorOption] {
    match variant {
        FilterVariant::Text => TEXT_OPERATORS,
        FilterVariant::Number | FilterVariant::Range => NUMERIC_OPERATORS,
        FilterVariant::Date | FilterVariant::DateRange => DATE_OPERATORS,
        FilterVariant::Boolean => BOOLEAN_OPERATORS,
        FilterVariant::Select => SELECT_OPERATORS,
        FilterVariant::MultiSelect => MULTI_SELECT_OPERATORS,
    }
}

/// Default operator for a variant: `iLike` for text, `inArray` for
/// multi-select, `eq` for everything else.
#[must_use]
pub const fn default_operator_for(variant: FilterVariant) -> FilterOperator {
    match variant {
        FilterVariant::Text => FilterOperator::ILike,
        FilterVariant::MultiSelect => FilterOperator::InArray,
        _ => FilterOperator::Eq,
    }
}

///
/// TESTS
///
