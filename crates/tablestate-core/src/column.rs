//! Column descriptors, as supplied by the presentation layer.
//!
//! The engine reads only `id`, the enable flags, and `meta.variant` /
//! `meta.options`; everything else rides along for the UI.

use crate::catalog::FilterVariant;

///
/// SelectOption
///
/// One choice of a select/multiSelect column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub count: Option<u64>,
}

impl SelectOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            count: None,
        }
    }
}

///
/// ColumnMeta
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnMeta {
    pub label: Option<String>,
    pub variant: Option<FilterVariant>,
    pub options: Vec<SelectOption>,
    pub range: Option<(f64, f64)>,
    pub unit: Option<String>,
    pub placement: Option<String>,
}

///
/// ColumnSpec
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSpec {
    pub id: String,
    pub enable_sorting: bool,
    pub enable_column_filter: bool,
    pub meta: ColumnMeta,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.enable_sorting = true;
        self
    }

    #[must_use]
    pub const fn filterable(mut self, variant: FilterVariant) -> Self {
        self.enable_column_filter = true;
        self.meta.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.meta.options = options;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.meta.range = Some((min, max));
        self
    }

    /// The filter variant, defaulting to text when the descriptor carries
    /// none.
    #[must_use]
    pub fn variant(&self) -> FilterVariant {
        self.meta.variant.unwrap_or_default()
    }
}
