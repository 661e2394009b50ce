//! Provides input/output functionality for the file formats used around model selection.
//!
//! SWISS-MODEL model directories are parsed into [`Model`](crate::core::models::model::Model)
//! records, PDB files are read down to residue level, and selections are exchanged as
//! tab-separated tables.

pub mod pdb;
pub mod swissmodel;
pub mod table;
pub mod traits;
