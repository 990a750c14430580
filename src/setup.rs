//! Day-setup run: scan, materialize, dispatch, summarize.
//!
//! Walks the immediate children of the day root, filters to `.mnt`
//! recording directories, and applies the per-unit steps: parse the
//! name, ensure the output tree, record the dataset key, dispatch the
//! pointer-file generator. Generator tasks are joined after the scan so
//! their exit codes end up in the run summary.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::DayLayout;
use crate::manifest::DatasetManifest;
use crate::params::SortParams;
use crate::preflight;
use crate::prv::{PrvCreator, PRV_FILENAME};
use crate::session::{SessionName, MNT_SUFFIX};

/// Options for a day-setup run.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Pointer-file generator executable.
    pub prv_exe: String,
    /// Sampling rate written into each tetrode's params artifact.
    pub samplerate: u32,
    /// Where to write the dataset listing; `None` keeps it in memory.
    pub datasets_out: Option<PathBuf>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            prv_exe: crate::prv::DEFAULT_PRV_EXE.to_string(),
            samplerate: crate::params::DEFAULT_SAMPLERATE,
            datasets_out: None,
        }
    }
}

/// Outcome of a day-setup run.
#[derive(Debug)]
pub struct RunSummary {
    /// Recording directories fully processed.
    pub units_processed: usize,
    /// Qualifying directories skipped because their names did not parse.
    pub units_skipped: usize,
    /// Distinct dataset keys recorded.
    pub datasets: usize,
    /// One entry per generator invocation that failed or exited nonzero.
    pub generator_failures: Vec<String>,
}

/// Run the layout transformation for one day root.
pub fn run_day_setup(root: &Path, options: &SetupOptions) -> Result<RunSummary> {
    if !root.is_dir() {
        bail!(
            "recording root '{}' is not a listable directory",
            root.display()
        );
    }
    preflight::check_generator(&options.prv_exe)?;

    let recording_dirs = find_recording_dirs(root)?;
    let creator = PrvCreator::new(&options.prv_exe);
    let sort_params = SortParams {
        samplerate: options.samplerate,
    };
    let mut layout = DayLayout::new(root);
    let mut manifest = DatasetManifest::new();
    let mut tasks = Vec::new();
    let mut units_processed = 0usize;
    let mut units_skipped = 0usize;

    for recording_dir in &recording_dirs {
        let name = recording_dir
            .file_name()
            .and_then(|part| part.to_str())
            .unwrap_or_default();
        let session = match SessionName::parse_mnt_dir_name(name) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("[setup] skipping '{}': {}", name, err);
                units_skipped += 1;
                continue;
            }
        };

        println!("[setup] {} {}", session.date, session.animal);
        let tetrode_dir = layout.materialize_tetrode(&session, &sort_params)?;
        manifest.record(&session.tetrode);
        tasks.push(creator.dispatch(recording_dir, &tetrode_dir.join(PRV_FILENAME)));
        units_processed += 1;
    }

    let mut generator_failures = Vec::new();
    for task in tasks {
        let outcome = task.join();
        if !outcome.success {
            eprintln!(
                "[setup] generator failed for '{}': {}",
                outcome.label, outcome.detail
            );
            generator_failures.push(format!("{}: {}", outcome.label, outcome.detail));
        }
    }

    if let Some(path) = &options.datasets_out {
        manifest.write_to(path)?;
        println!("[setup] wrote dataset listing '{}'", path.display());
    }

    println!(
        "[setup] {} units processed, {} skipped, {} datasets, {} generator failures",
        units_processed,
        units_skipped,
        manifest.len(),
        generator_failures.len()
    );

    Ok(RunSummary {
        units_processed,
        units_skipped,
        datasets: manifest.len(),
        generator_failures,
    })
}

/// Immediate children of the root that qualify as recording directories.
/// Listing order is whatever the filesystem yields.
fn find_recording_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)
        .with_context(|| format!("listing recording root '{}'", root.display()))?
    {
        let entry = entry
            .with_context(|| format!("iterating recording root '{}'", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|part| part.to_str()) else {
            continue;
        };
        if name.ends_with(MNT_SUFFIX) {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_only_mnt_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("20161205_JZ1_04.nt1.mnt")).unwrap();
        fs::create_dir(temp.path().join("scratch")).unwrap();
        fs::write(temp.path().join("notes.mnt"), "not a directory").unwrap();

        let dirs = find_recording_dirs(temp.path()).unwrap();

        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].ends_with("20161205_JZ1_04.nt1.mnt"));
    }

    #[test]
    fn missing_root_fails_before_any_mutation() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no_such_day");

        let result = run_day_setup(&missing, &SetupOptions::default());

        assert!(result.is_err());
        assert!(!missing.exists());
    }

    #[test]
    fn missing_generator_fails_before_any_mutation() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("20161205_JZ1_04.nt1.mnt")).unwrap();
        let options = SetupOptions {
            prv_exe: "definitely_not_a_real_generator_12345".to_string(),
            ..SetupOptions::default()
        };

        let result = run_day_setup(temp.path(), &options);

        assert!(result.is_err());
        assert!(!temp.path().join("20161205_JZ1.mountain").exists());
    }
}
