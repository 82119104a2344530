//! JSON shapes returned by the Plex Media Server API.
//!
//! Only the fields this tool reads are modelled. Tag objects are converted
//! to [`Tag`] here so nothing downstream ever sees the raw JSON form.

use serde::Deserialize;

use plextags_shared::{CatalogEntry, Tag};

/// Every Plex JSON response wraps its payload in `MediaContainer`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "MediaContainer")]
    pub media_container: MediaContainer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaContainer {
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(rename = "Directory", default)]
    pub directories: Vec<Directory>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Metadata>,
}

/// A library section as listed by `/library/sections`.
#[derive(Debug, Deserialize)]
pub(crate) struct Directory {
    pub key: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// One library item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Metadata {
    pub rating_key: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(rename = "Genre", default)]
    pub genres: Vec<TagObject>,
    #[serde(rename = "Label", default)]
    pub labels: Vec<TagObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagObject {
    pub tag: String,
}

fn to_tags(objects: Vec<TagObject>) -> Vec<Tag> {
    objects.iter().filter_map(|t| Tag::new(&t.tag)).collect()
}

impl From<Metadata> for CatalogEntry {
    fn from(item: Metadata) -> Self {
        Self {
            key: item.rating_key,
            title: item.title,
            year: item.year,
            labels: to_tags(item.labels),
            genres: to_tags(item.genres),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_converts_to_entry() {
        let json = r#"{
            "MediaContainer": {
                "size": 1,
                "Metadata": [{
                    "ratingKey": "4021",
                    "title": "Breaking Bad",
                    "year": 2008,
                    "Genre": [{"tag": "Drama"}, {"tag": "Crime"}],
                    "Label": [{"tag": "Favorite"}]
                }]
            }
        }"#;
        let envelope: Envelope = serde_json::from_str(json).expect("parse");
        let item = envelope.media_container.metadata.into_iter().next().unwrap();
        let entry = CatalogEntry::from(item);

        assert_eq!(entry.key, "4021");
        assert_eq!(entry.year, Some(2008));
        assert_eq!(Tag::join(&entry.genres), "Drama, Crime");
        assert_eq!(Tag::join(&entry.labels), "Favorite");
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"MediaContainer": {"Metadata": [{"ratingKey": "7", "title": "Untitled"}]}}"#;
        let envelope: Envelope = serde_json::from_str(json).expect("parse");
        let entry = CatalogEntry::from(envelope.media_container.metadata.into_iter().next().unwrap());
        assert_eq!(entry.year, None);
        assert!(entry.labels.is_empty());
        assert!(entry.genres.is_empty());
    }

    #[test]
    fn empty_container_has_no_items() {
        let envelope: Envelope = serde_json::from_str(r#"{"MediaContainer": {"size": 0}}"#).unwrap();
        assert!(envelope.media_container.metadata.is_empty());
        assert!(envelope.media_container.directories.is_empty());
    }
}
