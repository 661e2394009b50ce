//! # Core Models Module
//!
//! Data structures describing proteins at the level the model selection works on.
//!
//! - [`region`] - `ProteinRegion`, a set of positions on a named chain parsed from range notation
//! - [`residue`] - Residue records that can be tested for membership in a region
//! - [`model`] - `Model`, the metadata of one SWISS-MODEL homology model

pub mod model;
pub mod region;
pub mod residue;
