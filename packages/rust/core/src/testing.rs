//! In-memory catalog used by the core's unit tests.

use std::sync::Mutex;

use plextags_shared::{Catalog, CatalogEntry, LibType, PlexTagsError, Result, Tag};

pub(crate) fn tags(names: &[&str]) -> Vec<Tag> {
    names.iter().filter_map(|n| Tag::new(n)).collect()
}

pub(crate) fn entry(
    key: &str,
    title: &str,
    year: Option<u32>,
    labels: &[&str],
    genres: &[&str],
) -> CatalogEntry {
    CatalogEntry {
        key: key.into(),
        title: title.into(),
        year,
        labels: tags(labels),
        genres: tags(genres),
    }
}

#[derive(Default)]
struct State {
    entries: Vec<CatalogEntry>,
    searches: Vec<(String, Option<u32>)>,
    label_calls: usize,
    genre_calls: usize,
}

/// Search matches like Plex does: case-insensitive substring on the title,
/// exact year when one is given, results in insertion order.
pub(crate) struct MemoryCatalog {
    state: Mutex<State>,
    /// When set, every search fails with a network error.
    offline: bool,
}

impl MemoryCatalog {
    pub(crate) fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            state: Mutex::new(State {
                entries,
                ..State::default()
            }),
            offline: false,
        }
    }

    pub(crate) fn offline() -> Self {
        Self {
            state: Mutex::new(State::default()),
            offline: true,
        }
    }

    pub(crate) fn get(&self, key: &str) -> CatalogEntry {
        let state = self.state.lock().unwrap();
        state
            .entries
            .iter()
            .find(|e| e.key == key)
            .cloned()
            .unwrap_or_else(|| panic!("no entry with key {key}"))
    }

    pub(crate) fn searches(&self) -> Vec<(String, Option<u32>)> {
        self.state.lock().unwrap().searches.clone()
    }

    pub(crate) fn label_calls(&self) -> usize {
        self.state.lock().unwrap().label_calls
    }

    pub(crate) fn genre_calls(&self) -> usize {
        self.state.lock().unwrap().genre_calls
    }

    fn update(&self, key: &str, edit: impl FnOnce(&mut CatalogEntry)) -> CatalogEntry {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .entries
            .iter_mut()
            .find(|e| e.key == key)
            .unwrap_or_else(|| panic!("no entry with key {key}"));
        edit(stored);
        stored.clone()
    }
}

fn merge(into: &mut Vec<Tag>, additions: &[Tag]) {
    for tag in additions {
        if !into.contains(tag) {
            into.push(tag.clone());
        }
    }
}

impl Catalog for MemoryCatalog {
    async fn search(
        &self,
        title: &str,
        year: Option<u32>,
        _libtype: LibType,
    ) -> Result<Vec<CatalogEntry>> {
        if self.offline {
            return Err(PlexTagsError::Network("connection refused".into()));
        }
        let mut state = self.state.lock().unwrap();
        state.searches.push((title.to_string(), year));
        let needle = title.to_lowercase();
        Ok(state
            .entries
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .filter(|e| year.is_none() || e.year == year)
            .cloned()
            .collect())
    }

    async fn list_all(&self, _libtype: LibType) -> Result<Vec<CatalogEntry>> {
        Ok(self.state.lock().unwrap().entries.clone())
    }

    async fn reload(&self, entry: &CatalogEntry) -> Result<CatalogEntry> {
        Ok(self.get(&entry.key))
    }

    async fn add_labels(&self, entry: &mut CatalogEntry, labels: &[Tag]) -> Result<()> {
        let stored = self.update(&entry.key, |e| merge(&mut e.labels, labels));
        self.state.lock().unwrap().label_calls += 1;
        entry.labels = stored.labels;
        Ok(())
    }

    async fn add_genre(&self, entry: &mut CatalogEntry, genre: &Tag) -> Result<()> {
        let stored = self.update(&entry.key, |e| merge(&mut e.genres, std::slice::from_ref(genre)));
        self.state.lock().unwrap().genre_calls += 1;
        entry.genres = stored.genres;
        Ok(())
    }
}
