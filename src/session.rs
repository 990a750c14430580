//! Recording-name schema.
//!
//! A day's recording directories encode their metadata in the directory
//! name: `{date}_{animal}[_{epoch}].{tetrode}.mnt`, e.g.
//! `20161205_JZ1_04.nt1.mnt`. Raw per-tetrode files inside an epoch
//! directory carry the tetrode in a dot-segment instead, e.g.
//! `20161205_JZ1_02.nt1.mda`.
//!
//! Parsing is strict: a name that does not match the schema is a typed
//! error, never a half-filled value.

use anyhow::{bail, Result};

/// Suffix of per-epoch (and per-tetrode) recording directories.
pub const MNT_SUFFIX: &str = ".mnt";

/// Suffix of raw multi-dimensional-array data files and epoch directories.
pub const MDA_SUFFIX: &str = ".mda";

/// Suffix of the per-(date, animal) output directory consumed by the
/// sorting pipeline.
pub const MOUNTAIN_SUFFIX: &str = ".mountain";

/// Metadata parsed from a recording directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionName {
    /// Experiment date, `YYYYMMDD` by convention.
    pub date: String,
    /// Animal name, e.g. `JZ1`.
    pub animal: String,
    /// Epoch number within the day; absent for tetrode-level link
    /// directories that aggregate all epochs.
    pub epoch: Option<String>,
    /// Dataset key identifying the tetrode, e.g. `nt1`.
    pub tetrode: String,
}

impl SessionName {
    /// Parse a `.mnt` recording directory name.
    ///
    /// The tetrode is the trailing dot-segment before the `.mnt` suffix;
    /// date, animal, and optional epoch come from the underscore-delimited
    /// fields of the leading dot-segment.
    pub fn parse_mnt_dir_name(name: &str) -> Result<Self> {
        let Some(stem) = name.strip_suffix(MNT_SUFFIX) else {
            bail!(
                "'{}' is not a recording directory name (missing '{}' suffix)",
                name,
                MNT_SUFFIX
            );
        };
        let Some((_, tetrode)) = stem.rsplit_once('.') else {
            bail!("'{}' has no tetrode dot-segment before '{}'", name, MNT_SUFFIX);
        };
        if tetrode.is_empty() {
            bail!("'{}' has an empty tetrode dot-segment", name);
        }

        let session_part = stem.split('.').next().unwrap_or_default();
        let mut fields = session_part.split('_');
        let date = fields.next().unwrap_or_default();
        let animal = fields.next().unwrap_or_default();
        let epoch = fields.next();
        if date.is_empty() || animal.is_empty() {
            bail!(
                "'{}' is missing date/animal fields (expected '{{date}}_{{animal}}[_{{epoch}}].{{tetrode}}{}')",
                name,
                MNT_SUFFIX
            );
        }

        Ok(Self {
            date: date.to_string(),
            animal: animal.to_string(),
            epoch: epoch.map(str::to_string),
            tetrode: tetrode.to_string(),
        })
    }

    /// Name of the output directory for this session's (date, animal) pair.
    pub fn mountain_dir_name(&self) -> String {
        format!("{}_{}{}", self.date, self.animal, MOUNTAIN_SUFFIX)
    }
}

/// Extract the tetrode segment from a raw `.mda` filename.
///
/// `20161205_JZ1_02.nt1.mda` yields `nt1`; filenames without an `nt`
/// dot-segment in the last underscore field yield `None`.
pub fn tetrode_from_mda_name(name: &str) -> Option<&str> {
    let stem = name.strip_suffix(MDA_SUFFIX)?;
    let tail = stem.rsplit('_').next()?;
    let mut segments = tail.split('.');
    segments.next()?;
    let tetrode = segments.next()?;
    if tetrode.starts_with("nt") && tetrode.len() > 2 {
        Some(tetrode)
    } else {
        None
    }
}
