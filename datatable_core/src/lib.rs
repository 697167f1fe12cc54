use serde::{Deserialize, Serialize};

pub mod backend;
pub mod cell;
pub mod column;
pub mod filter;
pub mod pinning;
pub mod query;
pub mod sort;

pub use cell::CellValue;
pub use column::ColumnSpec;
pub use filter::FilterVariant;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ColumnUid(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RowUid(pub u32);

/// Index into the currently visible row set, from 0 to row count in view.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct VisualRowIdx(pub usize);

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CellCoord {
    pub row_uid: RowUid,
    pub col_uid: ColumnUid,
}

impl From<(RowUid, ColumnUid)> for CellCoord {
    fn from(value: (RowUid, ColumnUid)) -> Self {
        CellCoord {
            row_uid: value.0,
            col_uid: value.1,
        }
    }
}

impl From<(RowUid, &ColumnUid)> for CellCoord {
    fn from(value: (RowUid, &ColumnUid)) -> Self {
        CellCoord {
            row_uid: value.0,
            col_uid: *value.1,
        }
    }
}
