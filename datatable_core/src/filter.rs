use crate::ColumnUid;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Semantic data type of a column for filtering purposes.
/// Declared per column and immutable for the column's lifetime.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
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

/// Comparison semantics a user can apply to a filter value.
/// The serialized name is the stable machine value sent to remote sources.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ComparisonOperator {
    Contains,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    StartsWith,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperatorDescriptor {
    pub value: ComparisonOperator,
    pub label: &'static str,
}

/// Data type category keying the operator catalog.
/// Several filter variants share one category, see [FilterVariant::category].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum OperatorCategory {
    Text,
    Numeric,
    Date,
    Select,
    MultiSelect,
    Boolean,
}

impl FilterVariant {
    pub fn category(self) -> OperatorCategory {
        match self {
            FilterVariant::Text => OperatorCategory::Text,
            FilterVariant::Number | FilterVariant::Range => OperatorCategory::Numeric,
            FilterVariant::Date | FilterVariant::DateRange => OperatorCategory::Date,
            FilterVariant::Select => OperatorCategory::Select,
            FilterVariant::MultiSelect => OperatorCategory::MultiSelect,
            FilterVariant::Boolean => OperatorCategory::Boolean,
        }
    }
}

/// Ordered operator lists per data type category. Built once, never mutated.
/// The first entry of each list is the conventional default operator.
pub struct OperatorCatalog {
    categories: IndexMap<OperatorCategory, Vec<OperatorDescriptor>>,
}

static CATALOG: LazyLock<OperatorCatalog> = LazyLock::new(OperatorCatalog::build);

pub fn catalog() -> &'static OperatorCatalog {
    &CATALOG
}

impl OperatorCatalog {
    fn build() -> Self {
        use ComparisonOperator::*;
        let desc = |value, label| OperatorDescriptor { value, label };
        let mut categories = IndexMap::new();
        categories.insert(
            OperatorCategory::Text,
            vec![
                desc(Contains, "Contains"),
                desc(Eq, "Is"),
                desc(Ne, "Is not"),
                desc(StartsWith, "Starts with"),
            ],
        );
        categories.insert(
            OperatorCategory::Numeric,
            vec![
                desc(Eq, "Is"),
                desc(Ne, "Is not"),
                desc(Lt, "Less than"),
                desc(Le, "Less or equal"),
                desc(Gt, "Greater than"),
                desc(Ge, "Greater or equal"),
            ],
        );
        categories.insert(
            OperatorCategory::Date,
            vec![
                desc(Eq, "Is"),
                desc(Ne, "Is not"),
                desc(Lt, "Is before"),
                desc(Gt, "Is after"),
                desc(Le, "On or before"),
                desc(Ge, "On or after"),
            ],
        );
        categories.insert(
            OperatorCategory::Select,
            vec![desc(Eq, "Is"), desc(Ne, "Is not")],
        );
        // No multi select operators until set membership lands on the query side.
        categories.insert(OperatorCategory::MultiSelect, vec![]);
        categories.insert(
            OperatorCategory::Boolean,
            vec![desc(Eq, "Is"), desc(Ne, "Is not")],
        );
        OperatorCatalog { categories }
    }

    /// Ordered operator list for a category. A missing category is a
    /// programming error, release builds fall back to the text operators.
    pub fn operators(&self, category: OperatorCategory) -> &[OperatorDescriptor] {
        match self.categories.get(&category) {
            Some(descriptors) => descriptors,
            None => {
                debug_assert!(false, "no operator list for category {category:?}");
                log::warn!("no operator list for category {category:?}, using text operators");
                self.categories
                    .get(&OperatorCategory::Text)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
            }
        }
    }
}

/// Legal operators for a column's filter variant, in catalog order.
pub fn filter_operators(variant: FilterVariant) -> &'static [OperatorDescriptor] {
    catalog().operators(variant.category())
}

/// Same as [filter_operators], but total over arbitrary runtime input.
/// Variant names reaching the view from query strings or persisted layouts
/// are not type checked, an unknown name resolves to the text operators.
pub fn filter_operators_str(raw: &str) -> &'static [OperatorDescriptor] {
    match FilterVariant::from_str(raw) {
        Ok(variant) => filter_operators(variant),
        Err(_) => {
            log::warn!("unknown filter variant {raw:?}, using text operators");
            catalog().operators(OperatorCategory::Text)
        }
    }
}

/// Operator a freshly created filter starts with, so the editor never opens
/// in an operator-less state. For a variant whose catalog list is empty the
/// fallback is Contains for text-like columns and Eq for everything else.
pub fn default_filter_operator(variant: FilterVariant) -> ComparisonOperator {
    match filter_operators(variant).first() {
        Some(descriptor) => descriptor.value,
        None => match variant.category() {
            OperatorCategory::Text => ComparisonOperator::Contains,
            _ => ComparisonOperator::Eq,
        },
    }
}

/// How multiple filter criteria combine on the query side.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum JoinOperator {
    #[default]
    And,
    Or,
}

/// User entered filter value. Lists and scalars carry different emptiness
/// semantics, so the shapes are kept explicit instead of being coerced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Str(String),
    NumberList(Vec<f64>),
    StrList(Vec<String>),
    Empty,
}

impl FilterValue {
    /// Whether the value constrains anything. Lists must be non empty,
    /// strings non blank. `false` and `0` are present values.
    pub fn is_present(&self) -> bool {
        match self {
            FilterValue::Bool(_) | FilterValue::Number(_) => true,
            FilterValue::Str(s) => !s.is_empty(),
            FilterValue::NumberList(xs) => !xs.is_empty(),
            FilterValue::StrList(xs) => !xs.is_empty(),
            FilterValue::Empty => false,
        }
    }
}

/// One filter row as edited in the UI, keyed by column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    #[serde(rename = "id")]
    pub column: ColumnUid,
    #[serde(rename = "operator")]
    pub op: ComparisonOperator,
    pub value: FilterValue,
}

/// Drops criteria whose value is absent, keeping order. Half-typed filter
/// rows must not leak into fetch requests and must not disturb the filters
/// that are already applied.
pub fn valid_filters(filters: &[FilterCriterion]) -> Vec<FilterCriterion> {
    filters
        .iter()
        .filter(|criterion| criterion.value.is_present())
        .cloned()
        .collect()
}
