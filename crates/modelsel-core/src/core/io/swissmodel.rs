use crate::core::models::model::Model;
use crate::core::models::region::{ProteinRegion, RegionParseError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const INFO_FILE: &str = "info.json";
pub const REPORT_FILE: &str = "report.json";
pub const MODEL_FILE: &str = "model.pdb";

#[derive(Debug, Error)]
#[error("Malformed model in '{}': {kind}", .directory.display())]
pub struct MalformedModelError {
    pub directory: PathBuf,
    #[source]
    pub kind: MalformedModelKind,
}

impl MalformedModelError {
    fn new(directory: &Path, kind: MalformedModelKind) -> Self {
        Self {
            directory: directory.to_path_buf(),
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum MalformedModelKind {
    #[error("Cannot read '{file}': {source}")]
    Io {
        file: &'static str,
        source: io::Error,
    },

    #[error("Invalid JSON in '{file}': {source}")]
    Json {
        file: &'static str,
        source: serde_json::Error,
    },

    #[error("Invalid residue range: {0}")]
    Region(#[from] RegionParseError),

    #[error("Field '{field}' has invalid value '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

/// A JSON scalar that SWISS-MODEL sometimes writes as a number and sometimes as a string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn as_f64(&self, field: &'static str) -> Result<f64, MalformedModelKind> {
        let value = match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(field))
    }

    fn as_isize(&self, field: &'static str) -> Result<isize, MalformedModelKind> {
        match self {
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < isize::MAX as f64 => Ok(*n as isize),
            Scalar::Number(_) => Err(self.invalid(field)),
            Scalar::Text(s) => s.trim().parse().map_err(|_| self.invalid(field)),
        }
    }

    fn invalid(&self, field: &'static str) -> MalformedModelKind {
        let value = match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        };
        MalformedModelKind::InvalidValue { field, value }
    }
}

#[derive(Debug, Deserialize)]
struct InfoDocument {
    residue_range: Vec<ResidueRange>,
    creation_date: String,
}

#[derive(Debug, Deserialize)]
struct ResidueRange {
    residue_from: isize,
    residue_to: isize,
}

#[derive(Debug, Deserialize)]
struct ReportDocument {
    modelling: Modelling,
}

#[derive(Debug, Deserialize)]
struct Modelling {
    chain: String,
    pdb_id: String,
    offset: Scalar,
    short_method: String,
    coverage: Scalar,
    seq_id: Scalar,
    #[serde(rename = "QMean")]
    qmean: QMean,
}

#[derive(Debug, Deserialize)]
struct QMean {
    global_scores: GlobalScores,
}

#[derive(Debug, Deserialize)]
struct GlobalScores {
    qmean6_norm_score: f64,
    qmean6_z_score: f64,
}

fn read_document<T: DeserializeOwned>(
    directory: &Path,
    file: &'static str,
) -> Result<T, MalformedModelKind> {
    let content = fs::read_to_string(directory.join(file))
        .map_err(|source| MalformedModelKind::Io { file, source })?;
    serde_json::from_str(&content).map_err(|source| MalformedModelKind::Json { file, source })
}

fn build_model(
    number: String,
    info: InfoDocument,
    report: ReportDocument,
) -> Result<Model, MalformedModelKind> {
    let modelling = report.modelling;
    let ranges: Vec<(isize, isize)> = info
        .residue_range
        .iter()
        .map(|r| (r.residue_from, r.residue_to))
        .collect();
    let region = ProteinRegion::from_ranges(modelling.chain.clone(), &ranges)?;

    Ok(Model {
        number,
        template: modelling.pdb_id,
        chain: modelling.chain,
        region,
        offset: modelling.offset.as_isize("modelling.offset")?,
        method: modelling.short_method,
        coverage: modelling.coverage.as_f64("modelling.coverage")?,
        seq_id: modelling.seq_id.as_f64("modelling.seq_id")?,
        qmean6: modelling.qmean.global_scores.qmean6_norm_score,
        qmean6_z: modelling.qmean.global_scores.qmean6_z_score,
        date: info.creation_date,
    })
}

/// Builds a [`Model`] from the `info.json` and `report.json` of a SWISS-MODEL model directory.
///
/// The model number is the directory name.
pub fn read_model_dir(directory: &Path) -> Result<Model, MalformedModelError> {
    let number = directory
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    debug!("Reading SWISS-MODEL model {} from {:?}", number, directory);

    let load = || -> Result<Model, MalformedModelKind> {
        let info: InfoDocument = read_document(directory, INFO_FILE)?;
        let report: ReportDocument = read_document(directory, REPORT_FILE)?;
        build_model(number.clone(), info, report)
    };
    load().map_err(|kind| MalformedModelError::new(directory, kind))
}

/// Parses a model from the two documents directly, without touching the filesystem.
pub fn parse_model(number: &str, info: &str, report: &str) -> Result<Model, MalformedModelKind> {
    let info: InfoDocument = serde_json::from_str(info).map_err(|source| {
        MalformedModelKind::Json {
            file: INFO_FILE,
            source,
        }
    })?;
    let report: ReportDocument = serde_json::from_str(report).map_err(|source| {
        MalformedModelKind::Json {
            file: REPORT_FILE,
            source,
        }
    })?;
    build_model(number.to_string(), info, report)
}

fn is_model_dir_name(name: &str) -> bool {
    name.len() == 2 && name.bytes().all(|b| b.is_ascii_digit())
}

/// Lists the model directories of a protein's SWISS-MODEL directory, sorted by name.
///
/// Model directories are the sub-directories named with exactly two digits.
pub fn discover_model_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if is_model_dir_name(&entry.file_name().to_string_lossy()) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::Path;

    pub fn info_json(ranges: &[(isize, isize)], date: &str) -> String {
        let ranges = ranges
            .iter()
            .map(|(from, to)| {
                format!(
                    r#"{{"chain_name": "A", "residue_from": {}, "residue_to": {}}}"#,
                    from, to
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"{{"residue_range": [{}], "creation_date": "{}", "model_id": "abc"}}"#,
            ranges, date
        )
    }

    pub fn report_json(template: &str, seq_id: f64, coverage: f64, qmean6_z: f64) -> String {
        format!(
            r#"{{
                "modelling": {{
                    "chain": "A",
                    "pdb_id": "{}",
                    "offset": "0",
                    "short_method": "X-ray",
                    "coverage": {},
                    "seq_id": {},
                    "QMean": {{
                        "global_scores": {{
                            "qmean6_norm_score": 0.71,
                            "qmean6_z_score": {}
                        }}
                    }}
                }},
                "version": "1.0"
            }}"#,
            template, coverage, seq_id, qmean6_z
        )
    }

    pub fn write_model_dir(root: &Path, number: &str, info: &str, report: &str) {
        let dir = root.join(number);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(super::INFO_FILE), info).unwrap();
        fs::write(dir.join(super::REPORT_FILE), report).unwrap();
        fs::write(dir.join(super::MODEL_FILE), format!("REMARK model {}\n", number)).unwrap();
    }
}
