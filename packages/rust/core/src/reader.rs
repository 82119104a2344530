//! Encoding-resilient CSV reader for label/genre import files.
//!
//! The file is read once as bytes and decoded with each candidate encoding
//! in order; the first encoding that decodes the whole file is parsed as
//! CSV. Decoding before parsing means no row is ever acted on under an
//! encoding that later turns out to be wrong.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use plextags_shared::{PlexTagsError, Result, Tag, TextEncoding};

use crate::apply::UpdateFlags;

/// Required column.
pub const TITLE_COLUMN: &str = "Title";
/// Optional release year column.
pub const YEAR_COLUMN: &str = "Year";
/// Optional comma-separated labels column.
pub const LABELS_COLUMN: &str = "Labels";
/// Optional comma-separated genres column. The asymmetric name is part of
/// the file format users already have.
pub const GENRES_COLUMN: &str = "addGenre";

// ---------------------------------------------------------------------------
// CsvRow
// ---------------------------------------------------------------------------

/// One import row, already trimmed and split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// Show title as written in the file.
    pub title: String,
    /// Release year, when the cell holds a positive integer.
    pub year: Option<u32>,
    /// Requested labels in file order. Not deduplicated.
    pub labels: Vec<Tag>,
    /// Requested genres in file order. Not deduplicated.
    pub genres: Vec<Tag>,
    has_request: bool,
}

impl CsvRow {
    /// Build a row from raw cell text. `labels_text`/`genres_text` should
    /// already be blank for categories that are not being updated.
    pub fn from_cells(title: &str, year: &str, labels_text: &str, genres_text: &str) -> Self {
        let labels_text = labels_text.trim();
        let genres_text = genres_text.trim();
        Self {
            title: title.trim().to_string(),
            year: parse_year(year),
            labels: Tag::split_list(labels_text),
            genres: Tag::split_list(genres_text),
            has_request: !labels_text.is_empty() || !genres_text.is_empty(),
        }
    }

    /// Whether the row asked for anything at all. A cell holding only
    /// separators (`", ,"`) still counts as a request.
    pub fn has_request(&self) -> bool {
        self.has_request
    }

    /// `Title (Year)` or just `Title`.
    pub fn display_name(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

/// A year is usable only when it is all ASCII digits and positive.
pub fn parse_year(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok().filter(|&y| y > 0)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A decoded and parsed import file.
#[derive(Debug, Clone)]
pub struct CsvImport {
    /// Path the rows came from.
    pub path: PathBuf,
    /// Encoding that decoded the file.
    pub encoding: TextEncoding,
    /// Rows in file order.
    pub rows: Vec<CsvRow>,
}

/// Read an import file, trying `encodings` in order.
///
/// Fails with `FileNotFound` if the file is missing, `DecodeFailure` if no
/// encoding decodes it, and `InvalidFormat` if the header lacks `Title`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_csv(path: &Path, encodings: &[TextEncoding], flags: UpdateFlags) -> Result<CsvImport> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PlexTagsError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PlexTagsError::io(path, e),
    })?;

    for &encoding in encodings {
        info!(%encoding, "trying encoding");
        match encoding.decode(&bytes) {
            Some(text) => {
                let rows = parse_rows(&text, flags)?;
                debug!(%encoding, rows = rows.len(), "decoded CSV");
                return Ok(CsvImport {
                    path: path.to_path_buf(),
                    encoding,
                    rows,
                });
            }
            None => debug!(%encoding, "decode failed, trying next encoding"),
        }
    }

    Err(PlexTagsError::DecodeFailure {
        path: path.to_path_buf(),
        tried: encodings.iter().map(|e| e.label().to_string()).collect(),
    })
}

/// Parse decoded CSV text into rows.
pub fn parse_rows(text: &str, flags: UpdateFlags) -> Result<Vec<CsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PlexTagsError::parse(format!("failed to read CSV header: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let title_idx = column(TITLE_COLUMN).ok_or_else(|| {
        PlexTagsError::invalid_format(format!(
            "CSV file is missing the required '{TITLE_COLUMN}' column"
        ))
    })?;
    let year_idx = column(YEAR_COLUMN);
    let labels_idx = column(LABELS_COLUMN);
    let genres_idx = column(GENRES_COLUMN);

    if flags.labels && labels_idx.is_none() {
        warn!("'{LABELS_COLUMN}' column not found but label updates were requested");
    }
    if flags.genres && genres_idx.is_none() {
        warn!("'{GENRES_COLUMN}' column not found but genre updates were requested");
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PlexTagsError::parse(format!("malformed CSV row: {e}")))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let labels_text = if flags.labels { cell(labels_idx) } else { "" };
        let genres_text = if flags.genres { cell(genres_idx) } else { "" };

        rows.push(CsvRow::from_cells(
            cell(Some(title_idx)),
            cell(year_idx),
            labels_text,
            genres_text,
        ));
    }

    Ok(rows)
}
