use crate::core::io::swissmodel::MODEL_FILE;
use crate::core::io::table::{SELECTION_EXTENSION, read_selection_from_path};
use crate::engine::error::EngineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A structure copied out of a SWISS-MODEL directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedModel {
    pub protein: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Lists the selected models of each table as `<gene>_<model>`, the gene being the table's
/// file stem. Tables are listed in the order given, rows in table order.
pub fn list_models(tables: &[PathBuf]) -> Result<Vec<String>, EngineError> {
    let mut entries = Vec::new();
    for table in tables {
        let gene = file_stem(table);
        for row in read_selection_from_path(table)? {
            entries.push(format!("{}_{}", gene, row.model));
        }
    }
    Ok(entries)
}

/// Finds the selection tables directly inside `directory`, sorted by path.
pub fn find_selection_tables(directory: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let entries = fs::read_dir(directory).map_err(|e| EngineError::Discovery {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let mut tables = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_table = path
            .extension()
            .is_some_and(|ext| ext == SELECTION_EXTENSION);
        if is_table && path.is_file() {
            tables.push(path);
        }
    }
    tables.sort();
    Ok(tables)
}

/// Copies the structure of every selected model from a SWISS-MODEL directory tree.
///
/// For each `<protein>.models` table in `input`, `input/<protein>/<model>/model.pdb` is copied
/// to `output/<protein>/<template>.pdb`. Proteins without selected models are skipped and get
/// no output directory.
pub fn copy_models(input: &Path, output: &Path) -> Result<Vec<CopiedModel>, EngineError> {
    let mut copied = Vec::new();
    for table in find_selection_tables(input)? {
        let protein = file_stem(&table);
        let rows = read_selection_from_path(&table)?;
        if rows.is_empty() {
            debug!("No models selected for {}, skipping", protein);
            continue;
        }

        let protein_output = output.join(&protein);
        fs::create_dir_all(&protein_output)?;
        for row in rows {
            let source = input.join(&protein).join(&row.model).join(MODEL_FILE);
            let destination = protein_output.join(format!("{}.pdb", row.template));
            if destination.exists() {
                warn!(
                    "Model {} of {} overwrites existing {:?}",
                    row.model, protein, destination
                );
            }
            fs::copy(&source, &destination).map_err(|e| EngineError::Copy {
                from: source.clone(),
                to: destination.clone(),
                source: e,
            })?;
            copied.push(CopiedModel {
                protein: protein.clone(),
                source,
                destination,
            });
        }
    }
    info!("Copied {} model structure(s) to {:?}", copied.len(), output);
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::table::{SelectionRow, write_selection_to_path};
    use crate::core::models::model::fixtures::model;
    use tempfile::tempdir;

    fn row(number: &str, template: &str) -> SelectionRow {
        let mut m = model(number, 100.0, 1.0, "1:3");
        m.template = template.to_string();
        SelectionRow::new(&m, &m.covered_positions())
    }

    fn write_structure(root: &Path, protein: &str, number: &str, content: &str) {
        let dir = root.join(protein).join(number);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MODEL_FILE), content).unwrap();
    }

    #[test]
    fn list_models_prefixes_rows_with_gene() {
        let dir = tempdir().unwrap();
        let spike = dir.path().join("P0DTC2_s.models");
        let orf8 = dir.path().join("P0DTC8_orf8.models");
        write_selection_to_path(&spike, &[row("03", "6vsb"), row("01", "6vxx")]).unwrap();
        write_selection_to_path(&orf8, &[]).unwrap();

        let listed = list_models(&[spike, orf8]).unwrap();
        assert_eq!(listed, vec!["P0DTC2_s_03", "P0DTC2_s_01"]);
    }

    #[test]
    fn list_models_fails_on_missing_table() {
        let dir = tempdir().unwrap();
        let result = list_models(&[dir.path().join("absent.models")]);
        assert!(matches!(result, Err(EngineError::Table(_))));
    }

    #[test]
    fn copy_models_renames_structures_by_template() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        write_selection_to_path(
            &input.path().join("P0DTC2_s.models"),
            &[row("02", "6vsb"), row("05", "6vxx")],
        )
        .unwrap();
        write_structure(input.path(), "P0DTC2_s", "02", "model two");
        write_structure(input.path(), "P0DTC2_s", "05", "model five");
        write_structure(input.path(), "P0DTC2_s", "07", "not selected");

        write_selection_to_path(&input.path().join("P0DTC8_orf8.models"), &[]).unwrap();
        fs::write(input.path().join("notes.txt"), "ignored").unwrap();

        let copied = copy_models(input.path(), output.path()).unwrap();
        assert_eq!(copied.len(), 2);

        let spike_out = output.path().join("P0DTC2_s");
        assert_eq!(fs::read_to_string(spike_out.join("6vsb.pdb")).unwrap(), "model two");
        assert_eq!(fs::read_to_string(spike_out.join("6vxx.pdb")).unwrap(), "model five");
        assert_eq!(fs::read_dir(&spike_out).unwrap().count(), 2);
        assert!(!output.path().join("P0DTC8_orf8").exists());
    }

    #[test]
    fn models_sharing_a_template_overwrite_in_table_order() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        write_selection_to_path(
            &input.path().join("P0DTC2_s.models"),
            &[row("01", "6vsb"), row("04", "6vsb")],
        )
        .unwrap();
        write_structure(input.path(), "P0DTC2_s", "01", "model one");
        write_structure(input.path(), "P0DTC2_s", "04", "model four");

        let copied = copy_models(input.path(), output.path()).unwrap();
        assert_eq!(copied.len(), 2);
        assert_eq!(copied[0].destination, copied[1].destination);

        let spike_out = output.path().join("P0DTC2_s");
        assert_eq!(fs::read_dir(&spike_out).unwrap().count(), 1);
        assert_eq!(fs::read_to_string(spike_out.join("6vsb.pdb")).unwrap(), "model four");
    }

    #[test]
    fn copy_models_reports_missing_structure() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        write_selection_to_path(&input.path().join("P0DTC2_s.models"), &[row("01", "6vsb")])
            .unwrap();

        let result = copy_models(input.path(), output.path());
        assert!(matches!(result, Err(EngineError::Copy { .. })));
    }
}
