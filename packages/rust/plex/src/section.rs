//! A Plex library section exposed as a [`Catalog`].

use tracing::{debug, instrument};

use plextags_shared::{Catalog, CatalogEntry, LibType, PlexTagsError, Result, Tag};

use crate::http::PlexHttp;

/// One library section (e.g. "TV Shows") on a connected server.
#[derive(Debug, Clone)]
pub struct LibrarySection {
    http: PlexHttp,
    key: String,
    title: String,
}

impl LibrarySection {
    pub(crate) fn new(http: PlexHttp, key: String, title: String) -> Self {
        Self { http, key, title }
    }

    /// Section key on the server.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Section title as shown in Plex.
    pub fn title(&self) -> &str {
        &self.title
    }

    fn all_path(&self) -> String {
        format!("/library/sections/{}/all", self.key)
    }

    async fn query_all(&self, query: &[(&str, String)]) -> Result<Vec<CatalogEntry>> {
        let container = self.http.get(&self.all_path(), query).await?;
        Ok(container.metadata.into_iter().map(CatalogEntry::from).collect())
    }

    /// Replace the full tag list of one field on an item. Plex edits are
    /// replacing, so callers pass the merged list.
    async fn edit_tags(&self, rating_key: &str, field: &str, tags: &[Tag]) -> Result<()> {
        let query = edit_query(rating_key, field, tags);
        self.http.put(&self.all_path(), &query).await
    }
}

/// Build the query string for a tag edit on a show.
fn edit_query(rating_key: &str, field: &str, tags: &[Tag]) -> Vec<(String, String)> {
    let mut query = vec![
        ("type".to_string(), LibType::Show.plex_type().to_string()),
        ("id".to_string(), rating_key.to_string()),
        (format!("{field}.locked"), "1".to_string()),
    ];
    query.extend(
        tags.iter()
            .enumerate()
            .map(|(i, tag)| (format!("{field}[{i}].tag.tag"), tag.to_string())),
    );
    query
}

/// Existing tags followed by the additions not already present.
fn merge_tags(existing: &[Tag], additions: &[Tag]) -> Vec<Tag> {
    let mut merged = existing.to_vec();
    for tag in additions {
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }
    merged
}

impl Catalog for LibrarySection {
    #[instrument(skip(self), fields(section = %self.title))]
    async fn search(
        &self,
        title: &str,
        year: Option<u32>,
        libtype: LibType,
    ) -> Result<Vec<CatalogEntry>> {
        let mut query = vec![
            ("type", libtype.plex_type().to_string()),
            ("title", title.to_string()),
        ];
        if let Some(year) = year {
            query.push(("year", year.to_string()));
        }
        let results = self.query_all(&query).await?;
        debug!(count = results.len(), "search results");
        Ok(results)
    }

    async fn list_all(&self, libtype: LibType) -> Result<Vec<CatalogEntry>> {
        self.query_all(&[("type", libtype.plex_type().to_string())]).await
    }

    async fn reload(&self, entry: &CatalogEntry) -> Result<CatalogEntry> {
        let path = format!("/library/metadata/{}", entry.key);
        let container = self.http.get(&path, &[]).await?;
        container
            .metadata
            .into_iter()
            .next()
            .map(CatalogEntry::from)
            .ok_or_else(|| {
                PlexTagsError::parse(format!("{path}: item {} returned no metadata", entry.key))
            })
    }

    async fn add_labels(&self, entry: &mut CatalogEntry, labels: &[Tag]) -> Result<()> {
        let current = self.reload(entry).await?;
        let merged = merge_tags(&current.labels, labels);
        self.edit_tags(&entry.key, "label", &merged).await?;
        entry.labels = merged;
        Ok(())
    }

    async fn add_genre(&self, entry: &mut CatalogEntry, genre: &Tag) -> Result<()> {
        let current = self.reload(entry).await?;
        let merged = merge_tags(&current.genres, std::slice::from_ref(genre));
        self.edit_tags(&entry.key, "genre", &merged).await?;
        entry.genres = merged;
        Ok(())
    }
}
