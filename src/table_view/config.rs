use datatable_core::pinning::ColumnPin;
use datatable_core::ColumnUid;
use serde::{Deserialize, Serialize};

/// View-side settings. Serializable so hosts can persist table layout
/// between sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableViewConfig {
    /// Row height will not be lower than this value.
    pub minimum_row_height: f32,
    pub striped: bool,
    /// Columns forced to the left edge, in pin order. Overrides the pin
    /// declared on the column spec.
    pub pinned_left: Vec<ColumnUid>,
    /// Columns forced to the right edge, in pin order.
    pub pinned_right: Vec<ColumnUid>,
    /// Paint a seam shadow between pinned and scrollable regions.
    pub with_pin_border: bool,
    /// Width for pinned columns that do not declare one.
    pub default_pinned_width: f32,
}

impl Default for TableViewConfig {
    fn default() -> Self {
        TableViewConfig {
            minimum_row_height: 18.0,
            striped: true,
            pinned_left: vec![],
            pinned_right: vec![],
            with_pin_border: true,
            default_pinned_width: 120.0,
        }
    }
}

impl TableViewConfig {
    /// Effective pin for a column: view config wins over the spec default.
    pub fn pin(&self, col_uid: ColumnUid, spec_pin: ColumnPin) -> ColumnPin {
        if self.pinned_left.contains(&col_uid) {
            ColumnPin::Left
        } else if self.pinned_right.contains(&col_uid) {
            ColumnPin::Right
        } else {
            spec_pin
        }
    }
}

impl super::TableView {
    pub fn config_mut(&mut self) -> &mut TableViewConfig {
        &mut self.config
    }
}
