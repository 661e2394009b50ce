use thiserror::Error;

pub const DEFAULT_MIN_SEQ_ID: f64 = 0.0;
pub const DEFAULT_MIN_COVERAGE: f64 = 0.0;
pub const DEFAULT_MIN_QMEAN_Z: f64 = -4.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Threshold '{name}' must be a finite number (got {value})")]
    NonFinite { name: &'static str, value: f64 },
}

/// Minimum quality a model must strictly exceed to take part in selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionThresholds {
    pub min_seq_id: f64,
    pub min_coverage: f64,
    pub min_qmean_z: f64,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            min_seq_id: DEFAULT_MIN_SEQ_ID,
            min_coverage: DEFAULT_MIN_COVERAGE,
            min_qmean_z: DEFAULT_MIN_QMEAN_Z,
        }
    }
}

#[derive(Default)]
pub struct SelectionThresholdsBuilder {
    min_seq_id: Option<f64>,
    min_coverage: Option<f64>,
    min_qmean_z: Option<f64>,
}

impl SelectionThresholdsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_seq_id(mut self, value: f64) -> Self {
        self.min_seq_id = Some(value);
        self
    }
    pub fn min_coverage(mut self, value: f64) -> Self {
        self.min_coverage = Some(value);
        self
    }
    pub fn min_qmean_z(mut self, value: f64) -> Self {
        self.min_qmean_z = Some(value);
        self
    }

    pub fn build(self) -> Result<SelectionThresholds, ConfigError> {
        let finite = |name: &'static str, value: f64| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ConfigError::NonFinite { name, value })
            }
        };

        Ok(SelectionThresholds {
            min_seq_id: finite("min_seq_id", self.min_seq_id.unwrap_or(DEFAULT_MIN_SEQ_ID))?,
            min_coverage: finite(
                "min_coverage",
                self.min_coverage.unwrap_or(DEFAULT_MIN_COVERAGE),
            )?,
            min_qmean_z: finite("min_qmean_z", self.min_qmean_z.unwrap_or(DEFAULT_MIN_QMEAN_Z))?,
        })
    }
}
