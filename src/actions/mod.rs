//! Side effects of a migration run.
//!
//! Executors turn a classified context into a [`MigrationPlan`]: a list of
//! low-level file [`Operation`]s plus the issues found while planning. The
//! plan is then either run or previewed.
//!
//! ```text
//! ImageContext / LocaleContext (classification)
//!     ↓
//! migrate_assets / migrate_locales (planning)
//!     ↓
//! Operation (copy, move, delete, write)
//!     ↓
//! execute (apply) or preview (dry-run)
//! ```
//!
//! Operations run in plan order with no rollback. Any I/O failure while
//! executing aborts the run.

mod assets;
mod locales;
mod operation;
mod rewrite;
mod traits;

pub use assets::{TransferRecord, migrate_assets};
pub use locales::{migrate_locales, strip_keys};
pub use operation::Operation;
pub use rewrite::{plan_rewrites, replace_outside};
pub use traits::{ActionStats, MigrationPlan};
