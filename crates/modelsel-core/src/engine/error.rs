use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::table::TableError;
use crate::workflows::variants::SectionsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot scan directory '{}': {source}", .path.display())]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Selection table error: {0}")]
    Table(#[from] TableError),

    #[error("Structure file '{}' could not be read: {source}", .path.display())]
    Structure { path: PathBuf, source: PdbError },

    #[error("Sections file '{}' is invalid: {source}", .path.display())]
    Sections {
        path: PathBuf,
        #[source]
        source: SectionsError,
    },

    #[error("Failed to copy '{}' to '{}': {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
