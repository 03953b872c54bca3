//! fstransfer - resource migration for split projects
//!
//! fstransfer is a CLI tool and library for moving image assets and i18n
//! property entries into a module that is being split out of a larger
//! project. It finds which resources the target modules use, which they
//! carry without using, which they borrow from other modules, and which are
//! shared with the rest of the project, then copies, deletes and rewrites
//! accordingly.
//!
//! ## Module Structure
//!
//! - `actions`: Migration steps with filesystem side effects
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, extraction, inventory and reconciliation
//! - `issues`: Issue type definitions for non-fatal conditions
//! - `report`: Plain-text report files
//! - `utils`: Shared path helpers

pub mod actions;
pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod report;
pub mod utils;
