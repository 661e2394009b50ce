use crate::core::models::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Extension of the per-protein selection tables.
pub const SELECTION_EXTENSION: &str = "models";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("TSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// One row of a selection table: a selected model and the positions it newly covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRow {
    pub model: String,
    pub template: String,
    pub chain: String,
    pub offset: isize,
    pub seq_id: f64,
    pub coverage: f64,
    pub qmean6_z: f64,
    pub date: String,
    pub positions: String,
}

impl SelectionRow {
    /// Builds a row, rendering the positions as an ascending comma separated list.
    pub fn new(model: &Model, positions: &BTreeSet<isize>) -> Self {
        Self {
            model: model.number.clone(),
            template: model.template.clone(),
            chain: model.chain.clone(),
            offset: model.offset,
            seq_id: model.seq_id,
            coverage: model.coverage,
            qmean6_z: model.qmean6_z,
            date: model.date.clone(),
            positions: positions
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer)
}

const HEADER: [&str; 9] = [
    "model", "template", "chain", "offset", "seq_id", "coverage", "qmean6_z", "date", "positions",
];

/// Writes a selection table. The header is written even when there are no rows.
pub fn write_selection<W: Write>(writer: W, rows: &[SelectionRow]) -> Result<(), csv::Error> {
    let mut tsv = tsv_writer(writer);
    tsv.write_record(HEADER)?;
    for row in rows {
        tsv.serialize(row)?;
    }
    tsv.flush()?;
    Ok(())
}

pub fn write_selection_to_path(path: &Path, rows: &[SelectionRow]) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_selection(file, rows).map_err(|e| TableError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

pub fn read_selection<R: Read>(reader: R) -> Result<Vec<SelectionRow>, csv::Error> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);
    tsv.deserialize().collect()
}

pub fn read_selection_from_path(path: &Path) -> Result<Vec<SelectionRow>, TableError> {
    let file = File::open(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_selection(file).map_err(|e| TableError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::model::fixtures::model;
    use tempfile::tempdir;

    #[test]
    fn row_renders_positions_in_ascending_order() {
        let m = model("04", 90.0, 1.5, "1:3");
        let positions: BTreeSet<isize> = [12, 3, 7].into_iter().collect();
        let row = SelectionRow::new(&m, &positions);
        assert_eq!(row.model, "04");
        assert_eq!(row.positions, "3,7,12");
    }

    #[test]
    fn written_table_has_header_and_tab_separated_rows() {
        let m = model("01", 100.0, 2.0, "1:3");
        let row = SelectionRow::new(&m, &m.covered_positions());
        let mut buffer = Vec::new();
        write_selection(&mut buffer, &[row]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "model\ttemplate\tchain\toffset\tseq_id\tcoverage\tqmean6_z\tdate\tpositions"
        );
        assert_eq!(lines[1], "01\t01xyz\tA\t0\t100.0\t0.5\t2.0\t2020-05-01\t1,2,3");
    }

    #[test]
    fn empty_selection_still_writes_header() {
        let mut buffer = Vec::new();
        write_selection(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "model\ttemplate\tchain\toffset\tseq_id\tcoverage\tqmean6_z\tdate\tpositions\n"
        );
    }

    #[test]
    fn table_can_be_read_back_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("P0DTC2_s.models");
        let a = model("01", 100.0, 2.0, "1:3");
        let b = model("02", 80.0, 1.0, "3:5");
        let rows = vec![
            SelectionRow::new(&a, &a.covered_positions()),
            SelectionRow::new(&b, &[4, 5].into_iter().collect()),
        ];
        write_selection_to_path(&path, &rows).unwrap();

        let read = read_selection_from_path(&path).unwrap();
        assert_eq!(read, rows);
    }

    #[test]
    fn missing_table_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = read_selection_from_path(&dir.path().join("missing.models"));
        assert!(matches!(result, Err(TableError::Io { .. })));
    }

    #[test]
    fn truncated_row_is_a_csv_error() {
        let text = "model\ttemplate\tchain\toffset\tseq_id\tcoverage\tqmean6_z\tdate\tpositions\n01\t6lu7\n";
        assert!(read_selection(text.as_bytes()).is_err());
    }
}
