//! CSV-driven label/genre reconciliation for a media library.
//!
//! This crate reads import files, matches rows to library entries,
//! applies additive tag updates, tallies a run summary, and exports the
//! library back to CSV. It talks to the server only through
//! [`Catalog`](plextags_shared::Catalog).

pub mod apply;
pub mod export;
pub mod reader;
pub mod reconcile;
pub mod summary;
pub mod sync;

#[cfg(test)]
mod testing;

pub use apply::{UpdateFlags, apply_genres, apply_labels, new_tags};
pub use export::{ExportResult, export_to_csv};
pub use reader::{CsvImport, CsvRow, read_csv};
pub use reconcile::{RowOutcome, reconcile_row, resolve};
pub use summary::RunSummary;
pub use sync::{ProgressReporter, SilentProgress, SyncOptions, update_from_csv};
