//! Per-tetrode sorting parameters.
//!
//! Every tetrode output directory carries a `params.json` read by the
//! downstream pipeline. The record is written as a single compact line.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Fixed filename of the params artifact inside a tetrode directory.
pub const PARAMS_FILENAME: &str = "params.json";

/// Acquisition sampling rate in Hz used when no override is configured.
pub const DEFAULT_SAMPLERATE: u32 = 30_000;

/// Sorting parameters consumed by the downstream pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortParams {
    pub samplerate: u32,
}

impl Default for SortParams {
    fn default() -> Self {
        Self {
            samplerate: DEFAULT_SAMPLERATE,
        }
    }
}

/// Write `params.json` into a tetrode directory, replacing any prior
/// content.
pub fn write_params(tetrode_dir: &Path, params: &SortParams) -> Result<()> {
    let path = tetrode_dir.join(PARAMS_FILENAME);
    let encoded = serde_json::to_string(params).context("encoding sorting params")?;
    fs::write(&path, encoded)
        .with_context(|| format!("writing sorting params '{}'", path.display()))?;
    Ok(())
}
