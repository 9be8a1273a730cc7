//! Disk Backend Module
//!
//! Durable cache store that survives process restarts. Each entry lives in a
//! directory named by its cache key and holds three files: `status` (decimal
//! status code), `headers` (one JSON record per line) and `body` (raw bytes).
//! The backend enforces no expiry; entries persist until cleared.

use std::path::{Component, Path, PathBuf};

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::cache::ResponseEntry;
use crate::error::{CacheError, Result};

const STATUS_FILE: &str = "status";
const HEADERS_FILE: &str = "headers";
const BODY_FILE: &str = "body";

// == Header Serialization ==
/// One persisted header line: a name with its ordered values.
#[derive(Debug, Serialize, Deserialize)]
struct HeaderRecord {
    name: String,
    values: Vec<String>,
}

/// Encodes a header map as one JSON record per line.
///
/// JSON framing keeps field boundaries explicit, so values containing commas
/// or other delimiters round-trip intact. Values that are not valid UTF-8
/// cannot be represented and are skipped.
pub(crate) fn encode_headers(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_owned))
            .collect();
        if values.is_empty() {
            debug!(header = %name, "skipping header with no representable values");
            continue;
        }
        let record = HeaderRecord {
            name: name.as_str().to_owned(),
            values,
        };
        if let Ok(line) = serde_json::to_string(&record) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Decodes a headers file produced by [`encode_headers`].
///
/// Parsing is best-effort: a malformed line, or a name or value the header
/// map rejects, is dropped without failing the rest of the entry.
pub(crate) fn decode_headers(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: HeaderRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "dropping malformed header line");
                continue;
            }
        };
        let Ok(name) = record.name.parse::<HeaderName>() else {
            debug!(header = %record.name, "dropping header with invalid name");
            continue;
        };
        for value in record.values {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    headers.append(name.clone(), value);
                }
                Err(_) => {
                    debug!(header = %name, "dropping header value rejected by the map");
                }
            }
        }
    }
    headers
}

// == Disk Store ==
/// Filesystem-backed cache store rooted at a single directory.
#[derive(Debug)]
pub struct DiskStore {
    /// Directory all entry directories live under
    root: PathBuf,
}

impl DiskStore {
    // == Constructor ==
    /// Creates a store rooted at `root`. Nothing is touched on disk until
    /// [`init`](Self::init) or the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // == Init ==
    /// Creates the root directory if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!(root = %self.root.display(), "disk cache initialized");
        Ok(())
    }

    /// Resolves the directory an entry for `key` lives in.
    ///
    /// Keys become directory names, so anything that could step outside the
    /// root (absolute paths, `..` components) is rejected. Keys containing
    /// `/` are fine and nest naturally.
    fn entry_dir(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("empty key".to_string()));
        }
        let relative = Path::new(key);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    // == Set ==
    /// Persists `entry` under `key`, replacing any previous files.
    ///
    /// The three files are written one after another without a cross-file
    /// atomicity guarantee; a reader racing this call degrades to a miss.
    pub async fn set(&self, key: &str, entry: &ResponseEntry) -> Result<()> {
        let dir = self.entry_dir(key)?;
        fs::create_dir_all(&dir).await?;

        fs::write(dir.join(STATUS_FILE), entry.status.as_u16().to_string()).await?;
        fs::write(dir.join(HEADERS_FILE), encode_headers(&entry.headers)).await?;
        fs::write(dir.join(BODY_FILE), &entry.body).await?;

        debug!(key = %key, bytes = entry.body.len(), "persisted cache entry");
        Ok(())
    }

    // == Get ==
    /// Reads the entry stored under `key`.
    ///
    /// Returns `None` if any of the three files is missing or unreadable, or
    /// the status file does not hold a valid status code. A partially
    /// written entry is a full miss, never a partial result.
    pub async fn get(&self, key: &str) -> Option<ResponseEntry> {
        let dir = self.entry_dir(key).ok()?;

        let status_raw = fs::read_to_string(dir.join(STATUS_FILE)).await.ok()?;
        let status = status_raw
            .trim()
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())?;
        let headers_raw = fs::read_to_string(dir.join(HEADERS_FILE)).await.ok()?;
        let body = fs::read(dir.join(BODY_FILE)).await.ok()?;

        Some(ResponseEntry::new(status, decode_headers(&headers_raw), body))
    }

    // == Clear ==
    /// Recursively removes the entire root directory with every entry in it.
    ///
    /// A root that does not exist counts as already cleared.
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
