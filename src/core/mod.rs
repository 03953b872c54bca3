//! Core migration engine.
//!
//! The pipeline for one run:
//!
//! 1. **Scan**: partition the project's source files into target and other
//!    modules (`scanner`)
//! 2. **Extract**: pull resource references out of every source file
//!    (`extract`, `records`)
//! 3. **Inventory**: list the resources the target modules physically carry
//!    (`inventory` for images, `properties` for locale entries)
//! 4. **Reconcile**: classify every resource as in use, unused, dependent or
//!    shared (`reconcile`)
//!
//! `context` ties the steps together; the side effects live in `crate::actions`.

pub mod context;
pub mod encoding;
pub mod extract;
pub mod inventory;
pub mod paths;
pub mod properties;
pub mod reconcile;
pub mod records;
pub mod scanner;

pub use context::{ImageContext, LocaleContext, ProjectLayout};
pub use encoding::{DecodeResult, TextEncoding};
pub use extract::ReferenceExtractor;
pub use inventory::AssetInventory;
pub use properties::{LocaleStore, MAIN_LOCALE_TAG};
pub use reconcile::{AssetClassification, LocaleClassification};
pub use records::{ReferenceSet, SourceFileRecord};
pub use scanner::ModulePartition;
