//! The catalog seam between the reconciliation core and a media server.

use crate::error::Result;
use crate::types::{CatalogEntry, LibType, Tag};

/// A remote, possibly slow, possibly failing library of entries.
///
/// Implementations must keep tag edits additive: after `add_labels` or
/// `add_genre` returns `Ok`, the entry holds a superset of the tags it had
/// before, both on the server and in the caller's copy.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Search entries by title, optionally restricted to a release year.
    /// Results are in the server's order.
    async fn search(
        &self,
        title: &str,
        year: Option<u32>,
        libtype: LibType,
    ) -> Result<Vec<CatalogEntry>>;

    /// Every entry of the given kind.
    async fn list_all(&self, libtype: LibType) -> Result<Vec<CatalogEntry>>;

    /// Fetch the complete, current state of an entry. Search listings may
    /// carry partial tag lists; the default assumes they do not.
    async fn reload(&self, entry: &CatalogEntry) -> Result<CatalogEntry> {
        Ok(entry.clone())
    }

    /// Attach labels to an entry in one call.
    async fn add_labels(&self, entry: &mut CatalogEntry, labels: &[Tag]) -> Result<()>;

    /// Attach a single genre to an entry.
    async fn add_genre(&self, entry: &mut CatalogEntry, genre: &Tag) -> Result<()>;
}
