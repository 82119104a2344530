//! Core domain types shared by the Plex client and the reconciliation core.

use std::fmt;

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A normalized label or genre value: trimmed and never empty.
///
/// Everything that enters the core (CSV cells, Plex tag objects) is
/// converted to a `Tag` at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Build a tag from raw text. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Split a comma-separated cell into tags, dropping empty tokens.
    pub fn split_list(text: &str) -> Vec<Tag> {
        text.split(',').filter_map(Tag::new).collect()
    }

    /// Join tags with `", "` in the given order.
    pub fn join(tags: &[Tag]) -> String {
        tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(", ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// LibType
// ---------------------------------------------------------------------------

/// Kind of library item a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibType {
    Show,
}

impl LibType {
    /// Numeric metadata type used by the Plex API.
    pub fn plex_type(self) -> u8 {
        match self {
            Self::Show => 2,
        }
    }
}

impl fmt::Display for LibType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => f.write_str("show"),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// A single show record in the remote library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Server-side identifier (Plex `ratingKey`).
    pub key: String,
    /// Display title.
    pub title: String,
    /// Release year, when the server knows it.
    pub year: Option<u32>,
    /// Labels in the server's order.
    pub labels: Vec<Tag>,
    /// Genres in the server's order.
    pub genres: Vec<Tag>,
}

impl CatalogEntry {
    /// `Title (Year)` or just `Title`.
    pub fn display_name(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_trims_and_rejects_blank() {
        assert_eq!(Tag::new("  Crime ").unwrap().as_str(), "Crime");
        assert!(Tag::new("   ").is_none());
        assert!(Tag::new("").is_none());
    }

    #[test]
    fn split_list_drops_empty_tokens() {
        let tags = Tag::split_list("Crime, , Drama,,  Thriller ");
        let names: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["Crime", "Drama", "Thriller"]);
        assert!(Tag::split_list(" , ").is_empty());
    }

    #[test]
    fn split_list_keeps_duplicates_in_order() {
        let tags = Tag::split_list("B, A, B");
        assert_eq!(Tag::join(&tags), "B, A, B");
    }

    #[test]
    fn display_name_includes_year() {
        let mut entry = CatalogEntry {
            key: "1".into(),
            title: "Breaking Bad".into(),
            year: Some(2008),
            labels: vec![],
            genres: vec![],
        };
        assert_eq!(entry.display_name(), "Breaking Bad (2008)");
        entry.year = None;
        assert_eq!(entry.display_name(), "Breaking Bad");
    }

    #[test]
    fn show_maps_to_plex_type_two() {
        assert_eq!(LibType::Show.plex_type(), 2);
        assert_eq!(LibType::Show.to_string(), "show");
    }
}
