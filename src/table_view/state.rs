use datatable_core::filter::{
    default_filter_operator, ComparisonOperator, FilterCriterion, FilterValue, FilterVariant,
};
use datatable_core::ColumnUid;
use indexmap::IndexMap;

#[derive(Default)]
pub(super) struct State {
    pub(super) columns_ordered: Vec<ColumnUid>,
    pub(super) filter_drafts: IndexMap<ColumnUid, FilterDraft>,
}

/// In-progress filter edit for one column. Drafts live in the view until
/// applied, only then do they become criteria on the query.
pub(crate) struct FilterDraft {
    pub variant: FilterVariant,
    pub op: ComparisonOperator,
    pub text: String,
    pub flag: bool,
    pub selected: Vec<String>,
}

impl FilterDraft {
    pub fn new(variant: FilterVariant) -> Self {
        FilterDraft {
            variant,
            op: default_filter_operator(variant),
            text: String::new(),
            flag: true,
            selected: vec![],
        }
    }

    /// Convert the draft into a criterion for the column's variant. Inputs
    /// that do not parse yield an absent value, which the filter validation
    /// drops before the query reaches the backend.
    pub fn criterion(&self, column: ColumnUid) -> FilterCriterion {
        let value = match self.variant {
            FilterVariant::Text => FilterValue::Str(self.text.clone()),
            FilterVariant::Number | FilterVariant::Date => parse_scalar(&self.text),
            FilterVariant::Range | FilterVariant::DateRange => parse_range(&self.text),
            FilterVariant::Boolean => FilterValue::Bool(self.flag),
            FilterVariant::Select | FilterVariant::MultiSelect => {
                FilterValue::StrList(self.selected.clone())
            }
        };
        FilterCriterion {
            column,
            op: self.op,
            value,
        }
    }
}

fn parse_scalar(text: &str) -> FilterValue {
    match text.trim().parse::<f64>() {
        Ok(number) => FilterValue::Number(number),
        Err(_) => FilterValue::Empty,
    }
}

/// Accepts "a..b" as a closed range, a bare number as its scalar case.
fn parse_range(text: &str) -> FilterValue {
    match text.split_once("..") {
        Some((min, max)) => match (min.trim().parse::<f64>(), max.trim().parse::<f64>()) {
            (Ok(min), Ok(max)) => FilterValue::NumberList(vec![min, max]),
            _ => FilterValue::Empty,
        },
        None => parse_scalar(text),
    }
}
