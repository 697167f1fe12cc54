use crate::filter::{valid_filters, FilterCriterion, JoinOperator};
use crate::sort::{SortBy, SortOrder};
use crate::ColumnUid;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: usize = 10;

/// Everything a data source needs to produce one page of rows. This is the
/// payload handed to the fetch collaborator, remote sources encode it into
/// the request query string via [QueryState::query_pairs].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub page: usize,
    pub per_page: usize,
    pub sort: Vec<SortBy>,
    pub join: JoinOperator,
    pub filters: Vec<FilterCriterion>,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: vec![],
            join: JoinOperator::default(),
            filters: vec![],
        }
    }
}

impl QueryState {
    /// Replace the applied filters, discarding criteria without a value.
    /// Changing filters jumps back to the first page.
    pub fn set_filters(&mut self, filters: &[FilterCriterion]) {
        self.filters = valid_filters(filters);
        self.page = 1;
    }

    /// Cycle one column through ascending, descending, unsorted.
    /// Replaces any sort on other columns.
    pub fn toggle_sort(&mut self, col_uid: ColumnUid) {
        match self.sort.iter().position(|s| s.col_uid == col_uid) {
            Some(idx) => match self.sort[idx].order {
                SortOrder::Asc => self.sort[idx].order = SortOrder::Desc,
                SortOrder::Desc => {
                    self.sort.remove(idx);
                }
            },
            None => self.sort = vec![SortBy::asc(col_uid)],
        }
    }

    pub fn sort_for(&self, col_uid: ColumnUid) -> Option<SortOrder> {
        self.sort
            .iter()
            .find(|s| s.col_uid == col_uid)
            .map(|s| s.order)
    }

    /// Index of the first row of the current page.
    pub fn offset(&self) -> usize {
        self.per_page * self.page.saturating_sub(1)
    }

    /// Encode the state as query string pairs for a remote data source.
    /// Sort and filter payloads are JSON encoded, matching what the
    /// dashboard API expects in `sort`, `filters` and `joinOperator`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("perPage".to_string(), self.per_page.to_string()),
        ];
        if !self.sort.is_empty() {
            pairs.push((
                "sort".to_string(),
                serde_json::to_string(&self.sort).unwrap_or_default(),
            ));
        }
        if !self.filters.is_empty() {
            pairs.push((
                "filters".to_string(),
                serde_json::to_string(&self.filters).unwrap_or_default(),
            ));
            pairs.push(("joinOperator".to_string(), self.join.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ComparisonOperator, FilterValue};

    fn criterion(col: u32, value: FilterValue) -> FilterCriterion {
        FilterCriterion {
            column: ColumnUid(col),
            op: ComparisonOperator::Eq,
            value,
        }
    }

    #[test]
    fn defaults() {
        let query = QueryState::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, DEFAULT_PER_PAGE);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.join, JoinOperator::And);
    }

    #[test]
    fn set_filters_validates_and_resets_page() {
        let mut query = QueryState {
            page: 4,
            ..Default::default()
        };
        query.set_filters(&[
            criterion(0, FilterValue::Str("".into())),
            criterion(1, FilterValue::Number(0.0)),
        ]);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].column, ColumnUid(1));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn toggle_sort_cycles() {
        let mut query = QueryState::default();
        let col = ColumnUid(2);
        query.toggle_sort(col);
        assert_eq!(query.sort_for(col), Some(SortOrder::Asc));
        query.toggle_sort(col);
        assert_eq!(query.sort_for(col), Some(SortOrder::Desc));
        query.toggle_sort(col);
        assert_eq!(query.sort_for(col), None);
    }

    #[test]
    fn toggle_sort_replaces_other_columns() {
        let mut query = QueryState::default();
        query.toggle_sort(ColumnUid(0));
        query.toggle_sort(ColumnUid(1));
        assert_eq!(query.sort_for(ColumnUid(0)), None);
        assert_eq!(query.sort_for(ColumnUid(1)), Some(SortOrder::Asc));
    }

    #[test]
    fn offset_advances_with_page() {
        let query = QueryState {
            page: 3,
            per_page: 25,
            ..Default::default()
        };
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn query_pairs_without_filters() {
        let pairs = QueryState::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("perPage".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_encode_sort_and_filters() {
        let mut query = QueryState::default();
        query.sort.push(SortBy::desc(ColumnUid(1)));
        query.set_filters(&[criterion(0, FilterValue::Str("abc".into()))]);
        let pairs = query.query_pairs();
        assert!(pairs.contains(&(
            "sort".to_string(),
            r#"[{"colUid":1,"order":"desc"}]"#.to_string()
        )));
        assert!(pairs.contains(&(
            "filters".to_string(),
            r#"[{"id":0,"operator":"eq","value":"abc"}]"#.to_string()
        )));
        assert!(pairs.contains(&("joinOperator".to_string(), "and".to_string())));
    }
}
