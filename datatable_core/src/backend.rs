use crate::cell::CellValue;
use crate::column::ColumnSpec;
use crate::query::QueryState;
use crate::{CellCoord, ColumnUid, RowUid, VisualRowIdx};

/// Data source feeding a table surface: column metadata, one page of rows
/// and the query state controlling which page that is. Implementations talk
/// to a remote API or hold rows in memory, the surface does not care.
pub trait TableBackend {
    /// Process requests, talk to the remote side, watch for changes.
    /// Must be called periodically, for example each frame.
    /// Should not block or take too long on each run.
    fn poll(&mut self) {}

    /// True while a query is in flight and the visible rows may be stale.
    fn is_loading(&self) -> bool {
        false
    }

    /// Returns all columns in display order.
    fn columns(&self) -> impl Iterator<Item = ColumnUid>;
    fn column_spec(&self, col_uid: ColumnUid) -> Option<&ColumnSpec>;

    /// Row count of the current page, with filters applied.
    fn row_count(&self) -> usize;

    /// Row count across all pages, with filters applied.
    fn total_row_count(&self) -> usize {
        self.row_count()
    }

    /// Map index from [0..row_count) to unique row id, applying the current
    /// sort order in the process.
    fn row_uid(&self, row_idx: VisualRowIdx) -> Option<RowUid>;

    fn cell(&self, coord: CellCoord) -> Option<&CellValue>;

    fn query(&self) -> &QueryState;

    /// Apply a new query. Implementations refresh their visible row set,
    /// remote ones issue a fetch on the next [TableBackend::poll].
    fn set_query(&mut self, query: QueryState);
}
