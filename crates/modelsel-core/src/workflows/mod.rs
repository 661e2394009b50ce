//! # Workflows Module
//!
//! High-level procedures that users of the library call directly. Each workflow handles its own
//! input loading, logging and error attribution, and leaves rendering to the caller.
//!
//! - **Model selection** ([`select`]) - Discover SWISS-MODEL models for one or more proteins,
//!   select a non-redundant covering set and write per-protein selection tables.
//! - **Substitution lists** ([`variants`]) - Enumerate every single amino acid substitution
//!   of the residues of a structure, optionally restricted to regions.
//! - **Selection catalogue** ([`catalog`]) - List selected models across proteins and copy
//!   their structures into a per-protein layout.

pub mod catalog;
pub mod select;
pub mod variants;
