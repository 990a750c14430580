//! Epoch-to-tetrode symlink farm.
//!
//! Raw acquisition writes one directory per epoch
//! (`{date}_{animal}_{epoch}.mda/`) holding one `.mda` file per tetrode.
//! Sorting wants the transpose: one `.mnt` directory per tetrode holding
//! that tetrode's files from every epoch. Rather than copying the large
//! recordings, this builds a farm of symlinks:
//!
//! ```text
//! {root}/{date}_{animal}.mnt/{date}_{animal}.{tetrode}.mnt/{file} -> raw file
//! ```
//!
//! Stale links of the same name are replaced, so re-running after new
//! epochs arrive is safe.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::session::{self, MDA_SUFFIX, MNT_SUFFIX};

/// Outcome of a link run.
#[derive(Debug, Default)]
pub struct LinkSummary {
    pub links_created: usize,
    pub files_skipped: usize,
}

/// Build per-tetrode `.mnt` symlink directories from a day's raw epoch
/// directories.
pub fn link_epoch_files(root: &Path) -> Result<LinkSummary> {
    if !root.is_dir() {
        bail!("day root '{}' is not a listable directory", root.display());
    }

    let mut summary = LinkSummary::default();
    for entry in
        fs::read_dir(root).with_context(|| format!("listing day root '{}'", root.display()))?
    {
        let entry =
            entry.with_context(|| format!("iterating day root '{}'", root.display()))?;
        let epoch_dir = entry.path();
        if !epoch_dir.is_dir() {
            continue;
        }
        let Some(dir_name) = epoch_dir.file_name().and_then(|part| part.to_str()) else {
            continue;
        };
        let Some(stem) = dir_name.strip_suffix(MDA_SUFFIX) else {
            continue;
        };

        let mut fields = stem.split('_');
        let (Some(date), Some(animal)) = (fields.next(), fields.next()) else {
            eprintln!("[link] skipping '{}': missing date/animal fields", dir_name);
            continue;
        };
        if date.is_empty() || animal.is_empty() {
            eprintln!("[link] skipping '{}': missing date/animal fields", dir_name);
            continue;
        }

        println!("[link] {} {}", date, animal);
        let mnt_dir = root.join(format!("{}_{}{}", date, animal, MNT_SUFFIX));
        link_epoch_dir(&epoch_dir, &mnt_dir, date, animal, &mut summary)?;
    }
    Ok(summary)
}

fn link_epoch_dir(
    epoch_dir: &Path,
    mnt_dir: &Path,
    date: &str,
    animal: &str,
    summary: &mut LinkSummary,
) -> Result<()> {
    for entry in fs::read_dir(epoch_dir)
        .with_context(|| format!("listing epoch directory '{}'", epoch_dir.display()))?
    {
        let entry = entry
            .with_context(|| format!("iterating epoch directory '{}'", epoch_dir.display()))?;
        let raw_path = entry.path();
        if !raw_path.is_file() {
            continue;
        }
        let Some(file_name) = raw_path.file_name().and_then(|part| part.to_str()) else {
            continue;
        };
        if !file_name.ends_with(MDA_SUFFIX) {
            continue;
        }
        let Some(tetrode) = session::tetrode_from_mda_name(file_name) else {
            eprintln!("[link] skipping '{}': no tetrode segment", file_name);
            summary.files_skipped += 1;
            continue;
        };

        let tetrode_dir = mnt_dir.join(format!("{}_{}.{}{}", date, animal, tetrode, MNT_SUFFIX));
        fs::create_dir_all(&tetrode_dir).with_context(|| {
            format!("creating tetrode link directory '{}'", tetrode_dir.display())
        })?;

        let link_path = tetrode_dir.join(file_name);
        if link_path.is_symlink() || link_path.exists() {
            fs::remove_file(&link_path).with_context(|| {
                format!("removing stale tetrode link '{}'", link_path.display())
            })?;
        }
        let target = fs::canonicalize(&raw_path)
            .with_context(|| format!("resolving raw file '{}'", raw_path.display()))?;
        std::os::unix::fs::symlink(&target, &link_path).with_context(|| {
            format!(
                "linking '{}' -> '{}'",
                link_path.display(),
                target.display()
            )
        })?;
        summary.links_created += 1;
    }
    Ok(())
}
