//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - [`models`] - Protein regions, residue records and homology model metadata
//! - [`io`] - Readers and writers for SWISS-MODEL directories, PDB files and selection tables
//! - [`utils`] - Residue name lookups

pub mod io;
pub mod models;
pub mod utils;
