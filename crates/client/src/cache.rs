use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use funnel_core::content::SiteContent;
use funnel_core::lead::Subscriber;
use funnel_core::visitor::{Visitor, VISITOR_CAP};

const CONTENT_FILE: &str = "content.json";
const EMAILS_FILE: &str = "emails.json";
const VISITORS_FILE: &str = "visitors.json";

/// Best-effort offline mirror of the durable store, one JSON file per
/// key under a cache directory. Never authoritative while the durable
/// store is answering, and never the source of an error: I/O failures
/// degrade to "no cache" with a log line.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(err) = fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), %err, "could not create cache directory");
        }
        Self { dir }
    }

    /// Load the cached content document, if one is present and parses.
    /// Sections and fields missing from the cached copy come back as
    /// defaults, so a partial cache still yields a total document.
    pub fn load_content(&self) -> Option<SiteContent> {
        let path = self.path(CONTENT_FILE);
        let raw = fs::read(&path).ok()?;
        match serde_json::from_slice(&raw) {
            Ok(content) => Some(content),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "discarding unparseable content cache");
                None
            }
        }
    }

    pub fn store_content(&self, content: &SiteContent) {
        self.write(CONTENT_FILE, content);
    }

    /// Prepend a locally-buffered lead, keeping the newest 1000.
    pub fn append_email(&self, subscriber: &Subscriber) {
        let mut list: Vec<Subscriber> = self.read_list(EMAILS_FILE);
        list.insert(0, subscriber.clone());
        list.truncate(VISITOR_CAP);
        self.write(EMAILS_FILE, &list);
    }

    pub fn emails(&self) -> Vec<Subscriber> {
        self.read_list(EMAILS_FILE)
    }

    /// Drop a buffered lead by id. Returns whether anything was removed.
    pub fn remove_email(&self, id: &str) -> bool {
        let mut list: Vec<Subscriber> = self.read_list(EMAILS_FILE);
        let before = list.len();
        list.retain(|s| s.id != id);
        if list.len() == before {
            return false;
        }
        self.write(EMAILS_FILE, &list);
        true
    }

    /// Prepend to the visit mirror, capped at the newest 1000.
    pub fn append_visitor(&self, visitor: &Visitor) {
        let mut list: Vec<Visitor> = self.read_list(VISITORS_FILE);
        list.insert(0, visitor.clone());
        list.truncate(VISITOR_CAP);
        self.write(VISITORS_FILE, &list);
    }

    /// Newest-first, as stored.
    pub fn visitors(&self) -> Vec<Visitor> {
        self.read_list(VISITORS_FILE)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_list<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.path(file);
        let Ok(raw) = fs::read(&path) else {
            return Vec::new();
        };
        match serde_json::from_slice(&raw) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "discarding unparseable cache file");
                Vec::new()
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) {
        let path = self.path(file);
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                if let Err(err) = write_atomically(&path, &bytes) {
                    tracing::warn!(path = %path.display(), %err, "cache write failed");
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cache serialization failed");
            }
        }
    }
}

/// Write via a sibling temp file and rename, so a crash mid-write never
/// leaves a truncated cache behind.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
