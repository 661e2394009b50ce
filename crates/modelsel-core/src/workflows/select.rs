use crate::core::io::swissmodel::{MalformedModelError, discover_model_dirs, read_model_dir};
use crate::core::io::table::{SELECTION_EXTENSION, SelectionRow, write_selection_to_path};
use crate::core::models::model::Model;
use crate::engine::config::SelectionThresholds;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::selection::ModelSelector;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Models parsed from one protein directory, plus the model directories that could not be used.
#[derive(Debug)]
pub struct LoadedModels {
    pub models: Vec<Model>,
    pub skipped: Vec<MalformedModelError>,
}

/// The outcome of selecting models for one protein.
#[derive(Debug)]
pub struct ProteinSelection {
    pub protein: String,
    pub rows: Vec<SelectionRow>,
    pub candidates: usize,
    pub skipped: Vec<MalformedModelError>,
}

/// Where a protein's selection table was written.
#[derive(Debug)]
pub struct WrittenSelection {
    pub selection: ProteinSelection,
    pub output: PathBuf,
}

/// The protein name of a SWISS-MODEL directory is its final path component.
pub fn protein_name(directory: &Path) -> String {
    directory
        .file_name()
        .unwrap_or(directory.as_os_str())
        .to_string_lossy()
        .to_string()
}

/// The table path for a protein: `<output_dir>/<protein>.models`, or beside the protein
/// directory when no output directory is given.
pub fn output_path(directory: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{}.{}", protein_name(directory), SELECTION_EXTENSION);
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => directory
            .parent()
            .map(|p| p.join(&file_name))
            .unwrap_or_else(|| PathBuf::from(&file_name)),
    }
}

/// Parses every model directory of a protein. Unparseable models are logged and skipped.
pub fn load_models(directory: &Path) -> Result<LoadedModels, EngineError> {
    let model_dirs = discover_model_dirs(directory).map_err(|e| EngineError::Discovery {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let mut models = Vec::with_capacity(model_dirs.len());
    let mut skipped = Vec::new();
    for model_dir in model_dirs {
        match read_model_dir(&model_dir) {
            Ok(model) => models.push(model),
            Err(e) => {
                warn!("Skipping model: {}", e);
                skipped.push(e);
            }
        }
    }
    Ok(LoadedModels { models, skipped })
}

#[instrument(skip_all, fields(protein = %protein_name(directory)))]
pub fn select_protein(
    directory: &Path,
    selector: &ModelSelector,
) -> Result<ProteinSelection, EngineError> {
    let loaded = load_models(directory)?;
    let rows: Vec<SelectionRow> = selector
        .select(&loaded.models)
        .iter()
        .map(|s| s.to_row())
        .collect();

    info!(
        "Selected {} of {} models ({} skipped as malformed)",
        rows.len(),
        loaded.models.len(),
        loaded.skipped.len()
    );

    Ok(ProteinSelection {
        protein: protein_name(directory),
        rows,
        candidates: loaded.models.len(),
        skipped: loaded.skipped,
    })
}

/// Selects models for each protein directory independently, in parallel, and writes one
/// selection table per protein.
#[instrument(skip_all, name = "select_workflow")]
pub fn run(
    directories: &[PathBuf],
    thresholds: SelectionThresholds,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<Vec<WrittenSelection>, EngineError> {
    let selector = ModelSelector::new(thresholds);
    info!(
        "Selecting models for {} protein(s) with thresholds {:?}",
        directories.len(),
        thresholds
    );

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }

    reporter.report(Progress::BatchStart {
        total_proteins: directories.len() as u64,
    });

    let results = directories
        .par_iter()
        .map(|directory| -> Result<WrittenSelection, EngineError> {
            let selection = select_protein(directory, &selector)?;
            let output = output_path(directory, output_dir);
            write_selection_to_path(&output, &selection.rows)?;

            for skipped in &selection.skipped {
                reporter.report(Progress::ModelSkipped {
                    protein: selection.protein.clone(),
                    model: protein_name(&skipped.directory),
                });
            }
            reporter.report(Progress::ProteinFinished {
                protein: selection.protein.clone(),
                selected: selection.rows.len(),
            });

            Ok(WrittenSelection { selection, output })
        })
        .collect::<Result<Vec<_>, _>>();

    reporter.report(Progress::BatchFinish);
    results
}
