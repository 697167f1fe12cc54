use crate::ColumnUid;
use serde::{Deserialize, Serialize};

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
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub col_uid: ColumnUid,
    pub order: SortOrder,
}

impl SortBy {
    pub fn asc(col_uid: ColumnUid) -> Self {
        SortBy {
            col_uid,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(col_uid: ColumnUid) -> Self {
        SortBy {
            col_uid,
            order: SortOrder::Desc,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.order == SortOrder::Asc
    }
}
