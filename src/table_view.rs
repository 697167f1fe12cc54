mod config;
mod state;

pub use config::TableViewConfig;

use crate::table_view::state::FilterDraft;
use datatable_core::backend::TableBackend;
use datatable_core::column::ColumnSpec;
use datatable_core::filter::filter_operators;
use datatable_core::pinning::{pinning_style, ColumnPin, PinnedColumnLayout, SeamShadow};
use datatable_core::query::QueryState;
use datatable_core::sort::SortOrder;
use datatable_core::{ColumnUid, FilterVariant, VisualRowIdx};
use egui::{Color32, ComboBox, CornerRadius, Label, Rect, Response, ScrollArea, Sense, TextEdit, Ui, Widget};
use egui_extras::{Column, TableBuilder};
use itertools::Itertools;
use tap::Tap;

pub struct TableView {
    state: state::State,
    config: TableViewConfig,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    pub fn new() -> Self {
        TableView {
            state: state::State::default(),
            config: TableViewConfig::default(),
        }
    }

    pub fn with_config(config: TableViewConfig) -> Self {
        TableView {
            state: state::State::default(),
            config,
        }
    }

    pub fn show(&mut self, backend: &mut impl TableBackend, ui: &mut Ui) -> Response {
        backend.poll();
        self.reorder_columns(backend);

        let columns = self.state.columns_ordered.clone();
        let layouts = self.pin_layouts(backend, &columns);
        let query = backend.query().clone();
        let row_height = self.config.minimum_row_height;
        let striped = self.config.striped;
        let with_border = self.config.with_pin_border;
        let mut next_query: Option<QueryState> = None;
        let mut resp_total: Option<Response> = None;

        let scroll_output = ScrollArea::horizontal()
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let mut builder = TableBuilder::new(ui);
                for (col_uid, layout) in columns.iter().zip(&layouts) {
                    let spec_width = backend.column_spec(*col_uid).and_then(|spec| spec.width);
                    builder = builder.column(if layout.pin == ColumnPin::None {
                        match spec_width {
                            Some(width) => Column::initial(width).at_least(36.0).clip(true),
                            None => Column::auto().at_least(36.0),
                        }
                    } else {
                        // Pinned columns keep a fixed width so edge offsets
                        // and the seam position stay put while scrolling.
                        Column::exact(layout.width)
                    });
                }
                builder
                    .drag_to_scroll(false)
                    .striped(striped)
                    .resizable(true)
                    .max_scroll_height(f32::MAX)
                    .sense(Sense::click())
                    .header(22.0, |mut header| {
                        for (col_uid, layout) in columns.iter().zip(&layouts) {
                            let col_uid = *col_uid;
                            let Some(spec) = backend.column_spec(col_uid) else {
                                header.col(|_| {});
                                continue;
                            };
                            let style = pinning_style(layout, with_border);
                            let sort_order = query.sort_for(col_uid);
                            let (_, resp) = header.col(|ui| {
                                if style.opacity < 1.0 {
                                    ui.set_opacity(style.opacity);
                                }
                                let title = match sort_order {
                                    Some(SortOrder::Asc) => format!("{} ⏶", spec.name),
                                    Some(SortOrder::Desc) => format!("{} ⏷", spec.name),
                                    None => spec.name.clone(),
                                };
                                Label::new(title).selectable(false).ui(ui);
                            });
                            if spec.is_sortable && resp.clicked() {
                                next_query =
                                    Some(query.clone().tap_mut(|q| q.toggle_sort(col_uid)));
                            }
                            if spec.is_filterable {
                                resp.context_menu(|ui| {
                                    self.filter_menu_ui(ui, col_uid, spec, &query, &mut next_query);
                                });
                            }
                        }
                        resp_total = Some(header.response());
                    })
                    .body(|body| {
                        body.rows(row_height, backend.row_count(), |mut row| {
                            let Some(row_uid) = backend.row_uid(VisualRowIdx(row.index())) else {
                                return;
                            };
                            for (col_uid, layout) in columns.iter().zip(&layouts) {
                                let style = pinning_style(layout, with_border);
                                let coord = (row_uid, col_uid).into();
                                row.col(|ui| {
                                    if style.opacity < 1.0 {
                                        ui.set_opacity(style.opacity);
                                    }
                                    let text = backend
                                        .cell(coord)
                                        .map(|value| value.to_string())
                                        .unwrap_or_default();
                                    Label::new(text).selectable(false).ui(ui);
                                });
                            }
                        });
                    });
            });

        if let Some(query) = next_query {
            backend.set_query(query);
        }
        self.paint_pin_seams(ui, scroll_output.inner_rect, &layouts);

        ui.horizontal(|ui| {
            if backend.is_loading() {
                ui.spinner();
            }
            let mut query = backend.query().clone();
            let total = backend.total_row_count();
            let last_page = total.div_ceil(query.per_page.max(1)).max(1);
            if ui.button("<").clicked() && query.page > 1 {
                query.page -= 1;
                backend.set_query(query.clone());
            }
            ui.label(format!("page {} / {last_page}", query.page.min(last_page)));
            if ui.button(">").clicked() && query.page < last_page {
                query.page += 1;
                backend.set_query(query);
            }
            ui.label(format!("{total} rows"));
        });

        resp_total.unwrap_or_else(|| ui.label(""))
    }

    /// Filter editor shown from the header context menu: operator choice
    /// per the column's variant, a value editor, apply and clear.
    fn filter_menu_ui(
        &mut self,
        ui: &mut Ui,
        col_uid: ColumnUid,
        spec: &ColumnSpec,
        query: &QueryState,
        next_query: &mut Option<QueryState>,
    ) {
        ui.set_min_width(180.0);
        {
            let draft = self
                .state
                .filter_drafts
                .entry(col_uid)
                .or_insert_with(|| FilterDraft::new(spec.variant));
            let operators = filter_operators(spec.variant);
            if !operators.is_empty() {
                let selected_label = operators
                    .iter()
                    .find(|descriptor| descriptor.value == draft.op)
                    .map(|descriptor| descriptor.label)
                    .unwrap_or("Operator");
                ComboBox::from_id_salt(ui.id().with(col_uid.0))
                    .selected_text(selected_label)
                    .show_ui(ui, |ui| {
                        for descriptor in operators {
                            ui.selectable_value(&mut draft.op, descriptor.value, descriptor.label);
                        }
                    });
            }
            match spec.variant {
                FilterVariant::Boolean => {
                    ui.checkbox(&mut draft.flag, "Value");
                }
                FilterVariant::Select | FilterVariant::MultiSelect => {
                    for option in &spec.options {
                        let mut checked = draft.selected.contains(&option.value);
                        if ui.checkbox(&mut checked, option.label.as_str()).changed() {
                            if checked {
                                draft.selected.push(option.value.clone());
                            } else {
                                draft.selected.retain(|value| value != &option.value);
                            }
                        }
                    }
                }
                _ => {
                    let hint = match spec.variant {
                        FilterVariant::Range | FilterVariant::DateRange => "min..max",
                        _ => "Value",
                    };
                    TextEdit::singleline(&mut draft.text)
                        .hint_text(hint)
                        .desired_width(f32::INFINITY)
                        .ui(ui);
                }
            }
        }
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                *next_query = Some(self.applied_query(query));
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                self.state.filter_drafts.shift_remove(&col_uid);
                *next_query = Some(self.applied_query(query));
                ui.close_menu();
            }
        });
    }

    /// Query with the current drafts applied as filters. Absent values are
    /// discarded on entry, so half-typed drafts do not change the view.
    fn applied_query(&self, query: &QueryState) -> QueryState {
        let criteria = self
            .state
            .filter_drafts
            .iter()
            .map(|(col_uid, draft)| draft.criterion(*col_uid))
            .collect_vec();
        query.clone().tap_mut(|q| q.set_filters(&criteria))
    }

    /// Pinned columns move to the table edges, keeping config pin order
    /// within each pinned group and backend order elsewhere.
    fn reorder_columns(&mut self, backend: &impl TableBackend) {
        let config = &self.config;
        let pin_of = |col_uid: ColumnUid| {
            let spec_pin = backend
                .column_spec(col_uid)
                .map(|spec| spec.pin)
                .unwrap_or_default();
            config.pin(col_uid, spec_pin)
        };
        let mut left = vec![];
        let mut middle = vec![];
        let mut right = vec![];
        for col_uid in backend.columns() {
            match pin_of(col_uid) {
                ColumnPin::Left => left.push(col_uid),
                ColumnPin::None => middle.push(col_uid),
                ColumnPin::Right => right.push(col_uid),
            }
        }
        let config_position = |pinned: &[ColumnUid], col_uid: &ColumnUid| {
            pinned
                .iter()
                .position(|p| p == col_uid)
                .unwrap_or(usize::MAX)
        };
        left.sort_by_key(|col_uid| config_position(&config.pinned_left, col_uid));
        right.sort_by_key(|col_uid| config_position(&config.pinned_right, col_uid));
        self.state.columns_ordered = left.into_iter().chain(middle).chain(right).collect();
    }

    fn pin_layouts(
        &self,
        backend: &impl TableBackend,
        columns: &[ColumnUid],
    ) -> Vec<PinnedColumnLayout> {
        let pin_of = |col_uid: ColumnUid| {
            let spec_pin = backend
                .column_spec(col_uid)
                .map(|spec| spec.pin)
                .unwrap_or_default();
            self.config.pin(col_uid, spec_pin)
        };
        let width_of = |col_uid: ColumnUid| {
            backend
                .column_spec(col_uid)
                .and_then(|spec| spec.width)
                .unwrap_or(self.config.default_pinned_width)
        };
        let left_uids = columns
            .iter()
            .copied()
            .filter(|col_uid| pin_of(*col_uid) == ColumnPin::Left)
            .collect_vec();
        let right_uids = columns
            .iter()
            .copied()
            .filter(|col_uid| pin_of(*col_uid) == ColumnPin::Right)
            .collect_vec();
        columns
            .iter()
            .map(|col_uid| match pin_of(*col_uid) {
                ColumnPin::None => PinnedColumnLayout {
                    pin: ColumnPin::None,
                    width: width_of(*col_uid),
                    ..Default::default()
                },
                ColumnPin::Left => PinnedColumnLayout {
                    pin: ColumnPin::Left,
                    is_last_left: left_uids.last() == Some(col_uid),
                    is_first_right: false,
                    offset: left_uids
                        .iter()
                        .take_while(|c| *c != col_uid)
                        .map(|c| width_of(*c))
                        .sum(),
                    width: width_of(*col_uid),
                },
                ColumnPin::Right => {
                    let idx = right_uids
                        .iter()
                        .position(|c| c == col_uid)
                        .unwrap_or_default();
                    PinnedColumnLayout {
                        pin: ColumnPin::Right,
                        is_last_left: false,
                        is_first_right: idx == 0,
                        // Offset from the right edge: widths of the right
                        // pinned columns sitting closer to that edge.
                        offset: right_uids[idx + 1..].iter().map(|c| width_of(*c)).sum(),
                        width: width_of(*col_uid),
                    }
                }
            })
            .collect()
    }

    /// Inset shadow at the seam between pinned and scrollable regions,
    /// painted over the pinned column touching the seam.
    fn paint_pin_seams(&self, ui: &Ui, rect: Rect, layouts: &[PinnedColumnLayout]) {
        if !self.config.with_pin_border {
            return;
        }
        let painter = ui.painter();
        for layout in layouts {
            let style = pinning_style(layout, true);
            let Some(shadow) = style.shadow else {
                continue;
            };
            let seam = match shadow {
                SeamShadow::TrailingInset => {
                    let x = rect.left() + style.left.unwrap_or(0.0) + style.width;
                    Rect::from_min_max(egui::pos2(x - 4.0, rect.top()), egui::pos2(x, rect.bottom()))
                }
                SeamShadow::LeadingInset => {
                    let x = rect.right() - style.right.unwrap_or(0.0) - style.width;
                    Rect::from_min_max(egui::pos2(x, rect.top()), egui::pos2(x + 4.0, rect.bottom()))
                }
            };
            painter.rect_filled(seam, CornerRadius::ZERO, Color32::from_black_alpha(24));
        }
    }
}
