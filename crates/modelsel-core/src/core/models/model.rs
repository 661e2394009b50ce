use super::region::ProteinRegion;
use std::collections::BTreeSet;

/// Sequence identity at which a model is taken to be the target itself rather than a homolog.
pub const DIRECT_SEQ_ID: f64 = 100.0;

/// Metadata for one SWISS-MODEL homology model of a target protein.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub number: String,        // Model identifier, the name of its directory (e.g. "01")
    pub template: String,      // Template structure identifier (PDB code)
    pub chain: String,         // Chain within the template
    pub region: ProteinRegion, // Target positions covered by the model
    pub offset: isize,         // Offset between template and target numbering
    pub method: String,        // Modelling method tag (e.g. "X-ray")
    pub coverage: f64,         // Fraction of the target sequence covered, 0-1
    pub seq_id: f64,           // Percent sequence identity to the template, 0-100
    pub qmean6: f64,           // Normalised QMEAN6 score
    pub qmean6_z: f64,         // QMEAN6 Z-score
    pub date: String,          // Creation date as reported
}

impl Model {
    /// Whether the template is the target sequence itself.
    pub fn is_direct(&self) -> bool {
        self.seq_id >= DIRECT_SEQ_ID
    }

    /// The distinct target positions this model covers.
    ///
    /// A model whose region is unbounded cannot be enumerated and covers nothing.
    pub fn covered_positions(&self) -> BTreeSet<isize> {
        self.region.position_set().unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn model(number: &str, seq_id: f64, qmean6_z: f64, positions: &str) -> Model {
        Model {
            number: number.to_string(),
            template: format!("{}xyz", number),
            chain: "A".to_string(),
            region: ProteinRegion::new("A", Some(positions), false).unwrap(),
            offset: 0,
            method: "X-ray".to_string(),
            coverage: 0.5,
            seq_id,
            qmean6: 0.7,
            qmean6_z,
            date: "2020-05-01".to_string(),
        }
    }
}
