//! Additive label/genre updates on a resolved entry.

use tracing::info;

use plextags_shared::{Catalog, CatalogEntry, Result, Tag};

/// Which tag categories a run updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateFlags {
    pub labels: bool,
    pub genres: bool,
}

impl UpdateFlags {
    /// Both categories on.
    pub const ALL: Self = Self {
        labels: true,
        genres: true,
    };

    pub fn any(self) -> bool {
        self.labels || self.genres
    }

    /// Human-readable list of the enabled categories, e.g. `labels and genres`.
    pub fn describe(self) -> String {
        let mut parts = Vec::new();
        if self.labels {
            parts.push("labels");
        }
        if self.genres {
            parts.push("genres");
        }
        parts.join(" and ")
    }
}

/// Requested tags not already present, in request order, each at most once.
pub fn new_tags(requested: &[Tag], existing: &[Tag]) -> Vec<Tag> {
    let mut fresh: Vec<Tag> = Vec::new();
    for tag in requested {
        if !existing.contains(tag) && !fresh.contains(tag) {
            fresh.push(tag.clone());
        }
    }
    fresh
}

/// Add the missing labels to `entry` in one batched call.
///
/// Returns the number of labels added. When `enabled` is false nothing is
/// diffed and 0 is returned.
pub async fn apply_labels<C: Catalog>(
    catalog: &C,
    entry: &mut CatalogEntry,
    requested: &[Tag],
    enabled: bool,
) -> Result<usize> {
    if !enabled {
        return Ok(0);
    }

    let fresh = new_tags(requested, &entry.labels);
    if fresh.is_empty() {
        info!(existing = %Tag::join(&entry.labels), "no new labels to add");
        return Ok(0);
    }

    catalog.add_labels(entry, &fresh).await?;
    info!(added = %Tag::join(&fresh), "added labels");
    Ok(fresh.len())
}

/// Add the missing genres to `entry`, one call per genre.
///
/// Returns the number of genres added. When `enabled` is false nothing is
/// diffed and 0 is returned.
pub async fn apply_genres<C: Catalog>(
    catalog: &C,
    entry: &mut CatalogEntry,
    requested: &[Tag],
    enabled: bool,
) -> Result<usize> {
    if !enabled {
        return Ok(0);
    }

    let fresh = new_tags(requested, &entry.genres);
    if fresh.is_empty() {
        info!(existing = %Tag::join(&entry.genres), "no new genres to add");
        return Ok(0);
    }

    for genre in &fresh {
        catalog.add_genre(entry, genre).await?;
    }
    info!(added = %Tag::join(&fresh), "added genres");
    Ok(fresh.len())
}
