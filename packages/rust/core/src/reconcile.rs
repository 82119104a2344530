//! Matching CSV rows to library entries and applying their tag deltas.
//!
//! Resolution searches by title and year, falls back to title only, and
//! takes the first result in the server's order. Ambiguous titles are not
//! disambiguated any further.

use tracing::{info, warn};

use plextags_shared::{Catalog, CatalogEntry, LibType, Result};

use crate::apply::{UpdateFlags, apply_genres, apply_labels};
use crate::reader::CsvRow;
use crate::summary::RunSummary;

/// What happened to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Nothing requested (or no usable title); never searched.
    Skipped,
    /// No library entry matched.
    NotFound,
    /// Matched, but every requested tag was already present.
    Unchanged,
    /// Matched and at least one tag added.
    Updated { labels: usize, genres: usize },
}

/// Resolve a row to at most one library entry.
///
/// With a year, search `(title, year)` first and fall back to the title
/// alone. The first hit is reloaded so its tag lists are complete.
pub async fn resolve<C: Catalog>(catalog: &C, row: &CsvRow) -> Result<Option<CatalogEntry>> {
    let mut results = match row.year {
        Some(year) => {
            let hits = catalog.search(&row.title, Some(year), LibType::Show).await?;
            if hits.is_empty() {
                catalog.search(&row.title, None, LibType::Show).await?
            } else {
                hits
            }
        }
        None => catalog.search(&row.title, None, LibType::Show).await?,
    };

    if results.is_empty() {
        return Ok(None);
    }

    let first = results.swap_remove(0);
    catalog.reload(&first).await.map(Some)
}

/// Run one row through resolve → diff → mutate and tally the result.
pub async fn reconcile_row<C: Catalog>(
    catalog: &C,
    row: &CsvRow,
    flags: UpdateFlags,
    summary: &mut RunSummary,
) -> Result<RowOutcome> {
    if !row.has_request() {
        info!(title = %row.title, "skipping: no labels or genres specified");
        summary.record_skipped();
        return Ok(RowOutcome::Skipped);
    }

    if row.title.is_empty() {
        warn!("skipping row with an empty title");
        summary.record_skipped();
        return Ok(RowOutcome::Skipped);
    }

    let Some(mut entry) = resolve(catalog, row).await? else {
        warn!("show not found: '{}'", row.display_name());
        summary.record_not_found(&row.title);
        return Ok(RowOutcome::NotFound);
    };

    info!(show = %entry.display_name(), "processing");

    let labels = apply_labels(catalog, &mut entry, &row.labels, flags.labels).await?;
    let genres = apply_genres(catalog, &mut entry, &row.genres, flags.genres).await?;
    summary.record_added(labels, genres);

    if labels > 0 || genres > 0 {
        Ok(RowOutcome::Updated { labels, genres })
    } else {
        Ok(RowOutcome::Unchanged)
    }
}
