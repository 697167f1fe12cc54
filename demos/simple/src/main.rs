use egui_datatable::backends::memory::MemoryBackend;
use egui_datatable::datatable_core::cell::CellValue;
use egui_datatable::datatable_core::column::ColumnSpec;
use egui_datatable::datatable_core::pinning::ColumnPin;
use egui_datatable::datatable_core::ColumnUid;
use egui_datatable::export::export_csv;
use egui_datatable::table_view::TableViewConfig;
use egui_datatable::TableView;

const NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];
const ROLES: &[&str] = &["admin", "editor", "viewer"];

struct SimpleApp {
    backend: MemoryBackend,
    viewer: TableView,
}

impl Default for SimpleApp {
    fn default() -> Self {
        let mut backend = MemoryBackend::new([
            ColumnSpec::number("Id")
                .pinned(ColumnPin::Left)
                .width(60.0)
                .filterable(false),
            ColumnSpec::text("Name").width(160.0),
            ColumnSpec::select("Role", [("Admin", "admin"), ("Editor", "editor"), ("Viewer", "viewer")]),
            ColumnSpec::number("Logins"),
            ColumnSpec::date("Joined"),
            ColumnSpec::boolean("Active").pinned(ColumnPin::Right).width(80.0),
        ]);
        let mut rng = fastrand::Rng::new();
        for n in 0..1_000 {
            backend.insert_row([
                (ColumnUid(0), CellValue::I64(n)),
                (
                    ColumnUid(1),
                    CellValue::from(format!(
                        "{}-{}",
                        NAMES[rng.usize(0..NAMES.len())],
                        rng.u32(0..=999)
                    )),
                ),
                (
                    ColumnUid(2),
                    CellValue::from(ROLES[rng.usize(0..ROLES.len())]),
                ),
                (ColumnUid(3), CellValue::I64(rng.i64(0..=500))),
                // Joined as an epoch day somewhere in 2020..2025.
                (ColumnUid(4), CellValue::I64(rng.i64(18_262..=20_088))),
                (ColumnUid(5), CellValue::Bool(rng.bool())),
            ]);
        }
        let config = TableViewConfig {
            minimum_row_height: 20.0,
            ..Default::default()
        };
        Self {
            backend,
            viewer: TableView::with_config(config),
        }
    }
}

impl eframe::App for SimpleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("MenuBar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if ui.button("Export CSV").clicked() {
                    let path = std::env::temp_dir().join("simple_export.csv");
                    match std::fs::File::create(&path) {
                        Ok(file) => {
                            let status = export_csv(&self.backend, file);
                            log::info!("export to {}: {status:?}", path.display());
                        }
                        Err(e) => log::warn!("export failed: {e}"),
                    }
                }

                ui.separator();

                egui::widgets::global_theme_preference_buttons(ui);
            })
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(&mut self.backend, ui);
        });
    }
}

fn main() {
    use eframe::App;

    eframe::run_simple_native(
        "Simple Demo",
        eframe::NativeOptions {
            centered: true,
            ..Default::default()
        },
        {
            let mut app = SimpleApp::default();
            move |ctx, frame| {
                app.update(ctx, frame);
            }
        },
    )
    .unwrap();
}
