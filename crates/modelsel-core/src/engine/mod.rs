//! # Engine Module
//!
//! The model selection logic, independent of where models come from or where the result goes.
//!
//! - [`selection`] - Filtering, ranking and greedy coverage of candidate models
//! - [`config`] - Quality thresholds applied before selection
//! - [`progress`] - Callback-based progress reporting for long running workflows
//! - [`error`] - Errors surfaced by the workflows built on the engine

pub mod config;
pub mod error;
pub mod progress;
pub mod selection;
