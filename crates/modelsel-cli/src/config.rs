use crate::cli::SelectArgs;
use crate::error::{CliError, Result};
use modelsel::engine::config::{SelectionThresholds, SelectionThresholdsBuilder};
use modelsel::engine::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialThresholdsConfig {
    #[serde(rename = "min-seq-id")]
    min_seq_id: Option<f64>,
    #[serde(rename = "min-coverage")]
    min_coverage: Option<f64>,
    #[serde(rename = "min-qmean-z")]
    min_qmean_z: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSelectConfig {
    thresholds: Option<PartialThresholdsConfig>,
}

impl PartialSelectConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the config file named on the command line, if any.
    pub fn from_args(args: &SelectArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final thresholds. Precedence, lowest first: built-in defaults, config file,
    /// `--set` values, dedicated flags.
    pub fn merge_with_cli(mut self, args: &SelectArgs) -> Result<SelectionThresholds> {
        self.apply_set_values(&args.set_values)?;
        let file = self.thresholds.take().unwrap_or_default();
        let defaults = SelectionThresholds::default();

        let min_seq_id = args
            .min_seq_id
            .or(file.min_seq_id)
            .unwrap_or(defaults.min_seq_id);
        let min_coverage = args
            .min_coverage
            .or(file.min_coverage)
            .unwrap_or(defaults.min_coverage);
        let min_qmean_z = args
            .min_qmean_z
            .or(file.min_qmean_z)
            .unwrap_or(defaults.min_qmean_z);

        SelectionThresholdsBuilder::new()
            .min_seq_id(min_seq_id)
            .min_coverage(min_coverage)
            .min_qmean_z(min_qmean_z)
            .build()
            .map_err(|e| CliError::Core(EngineError::Config(e)))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let value: f64 = value_str.trim().parse().map_err(|_| {
                CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
            })?;

            let thresholds = self.thresholds.get_or_insert_with(Default::default);
            match key.trim() {
                "thresholds.min-seq-id" => thresholds.min_seq_id = Some(value),
                "thresholds.min-coverage" => thresholds.min_coverage = Some(value),
                "thresholds.min-qmean-z" => thresholds.min_qmean_z = Some(value),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
