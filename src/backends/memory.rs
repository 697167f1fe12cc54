use datatable_core::backend::TableBackend;
use datatable_core::cell::CellValue;
use datatable_core::column::ColumnSpec;
use datatable_core::filter::{ComparisonOperator, FilterCriterion, FilterValue, JoinOperator};
use datatable_core::query::QueryState;
use datatable_core::sort::SortBy;
use datatable_core::{CellCoord, ColumnUid, RowUid, VisualRowIdx};
use indexmap::IndexMap;
use itertools::Itertools;
use log::trace;
use std::collections::HashMap;

/// Table backend holding all rows in memory. Filters, sort and pagination
/// from the query state are applied locally, which makes it a drop in stand
/// in for a remote source in demos and tests.
pub struct MemoryBackend {
    columns: IndexMap<ColumnUid, ColumnSpec>,
    cell_data: HashMap<CellCoord, CellValue>,
    row_order: Vec<RowUid>,
    visible: Vec<RowUid>,
    total_matching: usize,
    next_row_uid: RowUid,
    query: QueryState,
}

impl MemoryBackend {
    pub fn new(columns: impl IntoIterator<Item = ColumnSpec>) -> Self {
        MemoryBackend {
            columns: columns
                .into_iter()
                .enumerate()
                .map(|(idx, spec)| (ColumnUid(idx as u32), spec))
                .collect(),
            cell_data: Default::default(),
            row_order: vec![],
            visible: vec![],
            total_matching: 0,
            next_row_uid: RowUid(0),
            query: QueryState::default(),
        }
    }

    pub fn insert_row(&mut self, values: impl IntoIterator<Item = (ColumnUid, CellValue)>) -> RowUid {
        let row_uid = self.next_row_uid;
        for (col_uid, value) in values {
            self.cell_data.insert(CellCoord { row_uid, col_uid }, value);
        }
        self.row_order.push(row_uid);
        self.next_row_uid = RowUid(row_uid.0 + 1);
        self.refresh();
        row_uid
    }

    pub fn clear(&mut self) {
        self.cell_data.clear();
        self.row_order.clear();
        self.next_row_uid = RowUid(0);
        self.refresh();
    }

    pub fn get(&self, coord: CellCoord) -> Option<&CellValue> {
        self.cell_data.get(&coord)
    }

    fn cell_or_empty(&self, row_uid: RowUid, col_uid: ColumnUid) -> &CellValue {
        self.cell_data
            .get(&CellCoord { row_uid, col_uid })
            .unwrap_or(&CellValue::Empty)
    }

    fn refresh(&mut self) {
        let query = self.query.clone();
        let mut rows = self
            .row_order
            .iter()
            .copied()
            .filter(|row_uid| self.row_matches(*row_uid, &query.filters, query.join))
            .collect_vec();
        // Stable sort per key, applied in reverse so the first key wins.
        for sort in query.sort.iter().rev() {
            rows.sort_by(|a, b| self.row_ordering(*a, *b, sort));
        }
        self.total_matching = rows.len();
        let start = query.offset().min(rows.len());
        let end = (start + query.per_page).min(rows.len());
        self.visible = rows[start..end].to_vec();
        trace!(
            "refreshed view: {} of {} rows visible",
            self.visible.len(),
            self.total_matching
        );
    }

    fn row_ordering(&self, a: RowUid, b: RowUid, sort: &SortBy) -> std::cmp::Ordering {
        let ordering = self
            .cell_or_empty(a, sort.col_uid)
            .compare(self.cell_or_empty(b, sort.col_uid));
        if sort.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        }
    }

    fn row_matches(&self, row_uid: RowUid, filters: &[FilterCriterion], join: JoinOperator) -> bool {
        if filters.is_empty() {
            return true;
        }
        let matches_one = |criterion: &FilterCriterion| {
            evaluate(
                self.cell_or_empty(row_uid, criterion.column),
                criterion.op,
                &criterion.value,
            )
        };
        match join {
            JoinOperator::And => filters.iter().all(matches_one),
            JoinOperator::Or => filters.iter().any(matches_one),
        }
    }
}

impl TableBackend for MemoryBackend {
    fn columns(&self) -> impl Iterator<Item = ColumnUid> {
        self.columns.keys().copied()
    }

    fn column_spec(&self, col_uid: ColumnUid) -> Option<&ColumnSpec> {
        self.columns.get(&col_uid)
    }

    fn row_count(&self) -> usize {
        self.visible.len()
    }

    fn total_row_count(&self) -> usize {
        self.total_matching
    }

    fn row_uid(&self, row_idx: VisualRowIdx) -> Option<RowUid> {
        self.visible.get(row_idx.0).copied()
    }

    fn cell(&self, coord: CellCoord) -> Option<&CellValue> {
        self.cell_data.get(&coord)
    }

    fn query(&self) -> &QueryState {
        &self.query
    }

    fn set_query(&mut self, query: QueryState) {
        self.query = query;
        self.refresh();
    }
}

/// Evaluate one criterion against a cell value. Text matching is case
/// insensitive for the fuzzy operators and exact for equality. A value
/// shape an operator cannot apply to never matches.
fn evaluate(cell: &CellValue, op: ComparisonOperator, value: &FilterValue) -> bool {
    use ComparisonOperator::*;
    match value {
        // An absent value constrains nothing. Validated queries never
        // contain these, unvalidated ones must not hide rows.
        FilterValue::Empty => true,
        FilterValue::Bool(expected) => {
            let CellValue::Bool(actual) = cell else {
                return false;
            };
            match op {
                Eq => actual == expected,
                Ne => actual != expected,
                _ => false,
            }
        }
        FilterValue::Number(expected) => {
            let Some(actual) = cell.as_f64() else {
                return false;
            };
            match op {
                Eq => actual == *expected,
                Ne => actual != *expected,
                Lt => actual < *expected,
                Le => actual <= *expected,
                Gt => actual > *expected,
                Ge => actual >= *expected,
                Contains | StartsWith => false,
            }
        }
        FilterValue::Str(expected) => {
            let actual = cell.to_string();
            match op {
                Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
                StartsWith => actual.to_lowercase().starts_with(&expected.to_lowercase()),
                Eq => actual == *expected,
                Ne => actual != *expected,
                Lt => actual < *expected,
                Le => actual <= *expected,
                Gt => actual > *expected,
                Ge => actual >= *expected,
            }
        }
        // Select style membership: the cell must be one of the chosen values.
        FilterValue::StrList(options) => {
            let actual = cell.to_string();
            let member = options.iter().any(|option| *option == actual);
            match op {
                Ne => !member,
                _ => member,
            }
        }
        // Range bounds as [min, max], either end may be missing.
        FilterValue::NumberList(bounds) => {
            let Some(actual) = cell.as_f64() else {
                return false;
            };
            let min = bounds.first();
            let max = bounds.get(1);
            let inside = min.is_none_or(|m| actual >= *m) && max.is_none_or(|m| actual <= *m);
            match op {
                Ne => !inside,
                _ => inside,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> MemoryBackend {
        let mut backend = MemoryBackend::new([
            ColumnSpec::text("Name"),
            ColumnSpec::number("Age"),
            ColumnSpec::boolean("Active"),
        ]);
        for (name, age, active) in [
            ("Alice", 34, true),
            ("Bob", 28, false),
            ("Carol", 41, true),
            ("dave", 28, true),
        ] {
            backend.insert_row([
                (ColumnUid(0), CellValue::from(name)),
                (ColumnUid(1), CellValue::I64(age)),
                (ColumnUid(2), CellValue::Bool(active)),
            ]);
        }
        backend
    }

    fn names(backend: &MemoryBackend) -> Vec<String> {
        (0..backend.row_count())
            .filter_map(|idx| backend.row_uid(VisualRowIdx(idx)))
            .map(|row_uid| backend.cell_or_empty(row_uid, ColumnUid(0)).to_string())
            .collect()
    }

    fn criterion(col: u32, op: ComparisonOperator, value: FilterValue) -> FilterCriterion {
        FilterCriterion {
            column: ColumnUid(col),
            op,
            value,
        }
    }

    #[test]
    fn unfiltered_view_shows_all_rows_in_insertion_order() {
        let backend = people();
        assert_eq!(backend.total_row_count(), 4);
        assert_eq!(names(&backend), ["Alice", "Bob", "Carol", "dave"]);
    }

    #[test]
    fn contains_is_case_insensitive() {
        let mut backend = people();
        let mut query = QueryState::default();
        query.set_filters(&[criterion(
            0,
            ComparisonOperator::Contains,
            FilterValue::Str("AL".into()),
        )]);
        backend.set_query(query);
        assert_eq!(names(&backend), ["Alice"]);
    }

    #[test]
    fn numeric_comparisons() {
        let mut backend = people();
        let mut query = QueryState::default();
        query.set_filters(&[criterion(
            1,
            ComparisonOperator::Ge,
            FilterValue::Number(34.0),
        )]);
        backend.set_query(query);
        assert_eq!(names(&backend), ["Alice", "Carol"]);
    }

    #[test]
    fn boolean_false_filters_rows() {
        let mut backend = people();
        let mut query = QueryState::default();
        query.set_filters(&[criterion(
            2,
            ComparisonOperator::Eq,
            FilterValue::Bool(false),
        )]);
        backend.set_query(query);
        assert_eq!(names(&backend), ["Bob"]);
    }

    #[test]
    fn join_operator_or_unions_criteria() {
        let mut backend = people();
        let mut query = QueryState {
            join: JoinOperator::Or,
            ..Default::default()
        };
        query.set_filters(&[
            criterion(0, ComparisonOperator::StartsWith, FilterValue::Str("a".into())),
            criterion(1, ComparisonOperator::Gt, FilterValue::Number(40.0)),
        ]);
        backend.set_query(query);
        assert_eq!(names(&backend), ["Alice", "Carol"]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut backend = people();
        let mut query = QueryState::default();
        query.set_filters(&[criterion(
            1,
            ComparisonOperator::Eq,
            FilterValue::NumberList(vec![28.0, 34.0]),
        )]);
        backend.set_query(query);
        assert_eq!(names(&backend), ["Alice", "Bob", "dave"]);
    }

    #[test]
    fn select_membership() {
        let mut backend = people();
        let mut query = QueryState::default();
        query.set_filters(&[criterion(
            0,
            ComparisonOperator::Eq,
            FilterValue::StrList(vec!["Bob".into(), "Carol".into()]),
        )]);
        backend.set_query(query);
        assert_eq!(names(&backend), ["Bob", "Carol"]);
    }

    #[test]
    fn sort_and_paginate() {
        let mut backend = people();
        let query = QueryState {
            per_page: 2,
            page: 2,
            sort: vec![SortBy::asc(ColumnUid(1))],
            ..Default::default()
        };
        backend.set_query(query);
        // Ages sorted ascending: 28, 28, 34, 41. Page two starts at 34.
        assert_eq!(backend.row_count(), 2);
        assert_eq!(backend.total_row_count(), 4);
        assert_eq!(names(&backend), ["Alice", "Carol"]);
    }

    #[test]
    fn missing_cells_never_match_typed_criteria() {
        let mut backend = people();
        backend.insert_row([(ColumnUid(0), CellValue::from("Eve"))]);
        let mut query = QueryState::default();
        query.set_filters(&[criterion(
            1,
            ComparisonOperator::Lt,
            FilterValue::Number(100.0),
        )]);
        backend.set_query(query);
        assert!(!names(&backend).contains(&"Eve".to_string()));
    }
}
