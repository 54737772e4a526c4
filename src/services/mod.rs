//! Service layer for PassWall
//!
//! Bulk operations on the credential collection. Each service borrows the
//! store and the active encryption provider for the duration of one call.

pub mod export;
pub mod import;

pub use export::{ExportService, EXPORT_FILE_NAME};
pub use import::{ImportDefaults, ImportResult, ImportService};
