use datatable_core::backend::TableBackend;
use datatable_core::{CellCoord, ColumnUid, VisualRowIdx};
use log::trace;
use std::io::Write;

#[derive(Default, Debug)]
pub enum ExportStatus {
    #[default]
    Empty,
    IoError(std::io::Error),
    WriterError(csv::Error),
    Exported {
        rows: usize,
    },
}

impl ExportStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, ExportStatus::IoError(_) | ExportStatus::WriterError(_))
    }
}

/// Write the current view of a backend as CSV: column names as the header
/// row, then the visible rows in view order, so applied filters, sort and
/// pagination carry over into the file.
pub fn export_csv<B: TableBackend>(backend: &B, writer: impl Write) -> ExportStatus {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let columns: Vec<ColumnUid> = backend.columns().collect();
    let header = columns.iter().map(|col_uid| {
        backend
            .column_spec(*col_uid)
            .map(|spec| spec.name.clone())
            .unwrap_or_default()
    });
    if let Err(e) = csv_writer.write_record(header) {
        return ExportStatus::WriterError(e);
    }
    let mut exported = 0;
    for row_idx in 0..backend.row_count() {
        let Some(row_uid) = backend.row_uid(VisualRowIdx(row_idx)) else {
            continue;
        };
        let record = columns.iter().map(|col_uid| {
            backend
                .cell(CellCoord {
                    row_uid,
                    col_uid: *col_uid,
                })
                .map(|value| value.to_string())
                .unwrap_or_default()
        });
        if let Err(e) = csv_writer.write_record(record) {
            return ExportStatus::WriterError(e);
        }
        exported += 1;
    }
    match csv_writer.flush() {
        Ok(()) => {
            trace!("exported {exported} rows");
            ExportStatus::Exported { rows: exported }
        }
        Err(e) => ExportStatus::IoError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::MemoryBackend;
    use datatable_core::cell::CellValue;
    use datatable_core::column::ColumnSpec;
    use datatable_core::query::QueryState;
    use datatable_core::sort::SortBy;

    fn backend() -> MemoryBackend {
        let mut backend = MemoryBackend::new([ColumnSpec::text("Name"), ColumnSpec::number("Age")]);
        backend.insert_row([
            (ColumnUid(0), CellValue::from("Bob")),
            (ColumnUid(1), CellValue::I64(28)),
        ]);
        backend.insert_row([
            (ColumnUid(0), CellValue::from("Alice")),
            (ColumnUid(1), CellValue::I64(34)),
        ]);
        backend
    }

    #[test]
    fn exports_header_and_rows() {
        let mut out = Vec::new();
        let status = export_csv(&backend(), &mut out);
        assert!(matches!(status, ExportStatus::Exported { rows: 2 }));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name,Age\nBob,28\nAlice,34\n"
        );
    }

    #[test]
    fn export_follows_view_order() {
        let mut backend = backend();
        backend.set_query(QueryState {
            sort: vec![SortBy::asc(ColumnUid(0))],
            ..Default::default()
        });
        let mut out = Vec::new();
        export_csv(&backend, &mut out);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name,Age\nAlice,34\nBob,28\n"
        );
    }
}
