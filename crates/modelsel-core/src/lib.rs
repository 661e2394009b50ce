//! # modelsel Core Library
//!
//! Selection of a non-redundant set of SWISS-MODEL homology models that together cover as much
//! of a target protein sequence as possible.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer split:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ProteinRegion`, `Model`, PDB residues)
//!   and I/O for the formats the pipeline exchanges (SWISS-MODEL JSON reports, PDB files and
//!   selection tables).
//!
//! - **[`engine`]: The Logic Core.** The greedy model selection algorithm, its quality
//!   thresholds and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures tying `core` and `engine` together,
//!   such as selecting models for whole protein directories or generating substitution lists
//!   from a structure.

pub mod core;
pub mod engine;
pub mod workflows;
