//! Output tree materialization.
//!
//! The sorting pipeline expects a tetrode-first tree under the day's
//! root:
//!
//! ```text
//! {root}/{date}_{animal}.mountain/{tetrode}/params.json
//! {root}/{date}_{animal}.mountain/{tetrode}/raw.mda.prv
//! ```
//!
//! Directory creation is create-or-skip: an existing directory is never
//! an error, so re-running a day's setup is safe. Within one run, each
//! tetrode directory is materialized at most once; a second epoch of the
//! same tetrode reuses it.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::params::{self, SortParams};
use crate::session::SessionName;

/// Materializes the per-tetrode output tree under a day's root.
pub struct DayLayout {
    root: PathBuf,
    materialized: HashSet<PathBuf>,
}

impl DayLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            materialized: HashSet::new(),
        }
    }

    /// Output directory for a session's (date, animal) pair.
    pub fn mountain_dir(&self, session: &SessionName) -> PathBuf {
        self.root.join(session.mountain_dir_name())
    }

    /// Output directory for a session's tetrode.
    pub fn tetrode_dir(&self, session: &SessionName) -> PathBuf {
        self.mountain_dir(session).join(&session.tetrode)
    }

    /// Ensure the mountain and tetrode directories exist and carry the
    /// params artifact. Repeat calls for the same tetrode directory are
    /// no-ops within a run.
    pub fn materialize_tetrode(
        &mut self,
        session: &SessionName,
        sort_params: &SortParams,
    ) -> Result<PathBuf> {
        let tetrode_dir = self.tetrode_dir(session);
        if self.materialized.contains(&tetrode_dir) {
            return Ok(tetrode_dir);
        }

        ensure_dir(&self.mountain_dir(session))?;
        ensure_dir(&tetrode_dir)?;
        params::write_params(&tetrode_dir, sort_params)?;

        self.materialized.insert(tetrode_dir.clone());
        Ok(tetrode_dir)
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("creating output directory '{}'", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PARAMS_FILENAME;
    use tempfile::TempDir;

    fn session(name: &str) -> SessionName {
        SessionName::parse_mnt_dir_name(name).unwrap()
    }

    #[test]
    fn materialize_creates_tree_and_params() {
        let temp = TempDir::new().unwrap();
        let mut layout = DayLayout::new(temp.path());

        let tetrode_dir = layout
            .materialize_tetrode(&session("20161205_JZ1_04.nt1.mnt"), &SortParams::default())
            .unwrap();

        assert_eq!(
            tetrode_dir,
            temp.path().join("20161205_JZ1.mountain").join("nt1")
        );
        assert!(tetrode_dir.is_dir());
        let content = fs::read_to_string(tetrode_dir.join(PARAMS_FILENAME)).unwrap();
        assert_eq!(content, r#"{"samplerate":30000}"#);
    }

    #[test]
    fn same_tetrode_is_materialized_once_per_run() {
        let temp = TempDir::new().unwrap();
        let mut layout = DayLayout::new(temp.path());
        let sort_params = SortParams::default();

        let first = layout
            .materialize_tetrode(&session("20161205_JZ1_04.nt1.mnt"), &sort_params)
            .unwrap();
        // A second epoch of the same tetrode must not rewrite the params.
        fs::write(first.join(PARAMS_FILENAME), "sentinel").unwrap();
        let second = layout
            .materialize_tetrode(&session("20161205_JZ1_05.nt1.mnt"), &sort_params)
            .unwrap();

        assert_eq!(first, second);
        let content = fs::read_to_string(second.join(PARAMS_FILENAME)).unwrap();
        assert_eq!(content, "sentinel");
    }

    #[test]
    fn distinct_tetrodes_get_distinct_directories() {
        let temp = TempDir::new().unwrap();
        let mut layout = DayLayout::new(temp.path());
        let sort_params = SortParams::default();

        let nt1 = layout
            .materialize_tetrode(&session("20161205_JZ1_04.nt1.mnt"), &sort_params)
            .unwrap();
        let nt2 = layout
            .materialize_tetrode(&session("20161205_JZ1_04.nt2.mnt"), &sort_params)
            .unwrap();

        assert_ne!(nt1, nt2);
        assert!(nt1.is_dir());
        assert!(nt2.is_dir());
        assert_eq!(nt1.parent(), nt2.parent());
    }

    #[test]
    fn fresh_run_overwrites_params_in_existing_tree() {
        let temp = TempDir::new().unwrap();
        let sort_params = SortParams::default();

        let first = DayLayout::new(temp.path())
            .materialize_tetrode(&session("20161205_JZ1_04.nt1.mnt"), &sort_params)
            .unwrap();
        fs::write(first.join(PARAMS_FILENAME), "stale").unwrap();

        let second = DayLayout::new(temp.path())
            .materialize_tetrode(&session("20161205_JZ1_04.nt1.mnt"), &sort_params)
            .unwrap();

        assert_eq!(first, second);
        let content = fs::read_to_string(second.join(PARAMS_FILENAME)).unwrap();
        assert_eq!(content, r#"{"samplerate":30000}"#);
    }
}
