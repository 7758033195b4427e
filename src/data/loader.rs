use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Row};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that stops a resource from becoming a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("requesting {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("load worker stopped before reporting a result")]
    Interrupted,
}

// ---------------------------------------------------------------------------
// Source – where the CSV text comes from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` strings are URLs, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => write!(f, "{u}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization of the designated numeric-looking column
// ---------------------------------------------------------------------------

/// Cleans one column at load time: grouping commas are stripped and a
/// missing or empty value becomes `placeholder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub column: String,
    pub placeholder: String,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            column: "Traffic".to_string(),
            placeholder: "Not provided".to_string(),
        }
    }
}

impl Normalization {
    pub fn apply(&self, raw: Option<&str>) -> String {
        let stripped = raw.unwrap_or("").replace(',', "");
        if stripped.is_empty() {
            self.placeholder.clone()
        } else {
            stripped
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch and parse a resource in one go.
pub fn load(source: &Source, normalization: &Normalization) -> Result<Dataset, LoadError> {
    let text = fetch_text(source)?;
    parse_csv(&text, normalization)
}

/// Retrieve the raw text of a resource. Non-2xx HTTP answers are errors.
pub fn fetch_text(source: &Source) -> Result<String, LoadError> {
    match source {
        Source::Path(path) => read_file(path),
        Source::Url(url) => fetch_url(url),
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn fetch_url(url: &str) -> Result<String, LoadError> {
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url).map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(http_err)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse comma-separated text whose first line is the header.
///
/// Records may be shorter or longer than the header: missing cells become
/// `""`, surplus cells are dropped. Blank lines are skipped. The normalized
/// column is appended to the header when the resource lacks it.
pub fn parse_csv(text: &str, normalization: &Normalization) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Ok(Dataset::default());
    }

    let mut columns: Vec<String> = Vec::with_capacity(headers.len() + 1);
    for h in &headers {
        if !columns.contains(h) {
            columns.push(h.clone());
        }
    }
    if !columns.contains(&normalization.column) {
        columns.push(normalization.column.clone());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() <= 1 && record.get(0).map_or(true, str::is_empty) {
            continue;
        }

        let mut row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), record.get(i).unwrap_or("")))
            .collect();

        let cleaned = normalization.apply(row.get(&normalization.column));
        row.insert(normalization.column.as_str(), cleaned);
        rows.push(row);
    }

    Ok(Dataset::new(columns, rows))
}
