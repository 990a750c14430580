//! Dataset listing accumulated over a run.
//!
//! Multi-session pipelines consume a datasets file with one line per
//! tetrode. Keys are recorded first-seen-wins across the whole run and
//! the listing is only written to disk when explicitly requested.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One line per distinct dataset key, in first-seen order.
#[derive(Debug, Default)]
pub struct DatasetManifest {
    seen: HashSet<String>,
    listing: String,
}

impl DatasetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dataset key. Returns true the first time a key is seen;
    /// repeats are ignored.
    pub fn record(&mut self, key: &str) -> bool {
        if !self.seen.insert(key.to_string()) {
            return false;
        }
        self.listing.push_str(key);
        self.listing.push(' ');
        self.listing.push_str(key);
        self.listing.push('\n');
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn listing(&self) -> &str {
        &self.listing
    }

    /// Write the accumulated listing. Callers decide whether a run wants
    /// this at all; nothing is flushed implicitly.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.listing)
            .with_context(|| format!("writing dataset listing '{}'", path.display()))?;
        Ok(())
    }
}
