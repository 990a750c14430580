use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use mountain_setup::config;
use mountain_setup::links;
use mountain_setup::params::DEFAULT_SAMPLERATE;
use mountain_setup::prv::DEFAULT_PRV_EXE;
use mountain_setup::{run_day_setup, SetupOptions};

fn usage() -> &'static str {
    "Usage:\n  mountain-setup <root_dir> [--datasets <file>] [--prv-exe <name>]\n  mountain-setup link <root_dir>\n\n\
     <root_dir> holds the day's per-epoch recording directories.\n\
     'link' builds the per-tetrode .mnt symlink farm from raw .mda epoch directories."
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            println!("{}", usage());
            bail!("missing root directory argument");
        }
        [link_cmd] if link_cmd == "link" => {
            println!("{}", usage());
            bail!("missing root directory argument");
        }
        [link_cmd, root] if link_cmd == "link" => run_link(Path::new(root)),
        _ => run_setup(&args),
    }
}

fn run_link(root: &Path) -> Result<()> {
    let summary = links::link_epoch_files(root)?;
    println!(
        "[link] {} links created, {} files skipped",
        summary.links_created, summary.files_skipped
    );
    Ok(())
}

fn run_setup(args: &[String]) -> Result<()> {
    let mut root: Option<PathBuf> = None;
    let mut datasets: Option<PathBuf> = None;
    let mut prv_exe: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--datasets" => {
                let Some(value) = iter.next() else {
                    bail!("--datasets requires a file argument\n{}", usage());
                };
                datasets = Some(PathBuf::from(value));
            }
            "--prv-exe" => {
                let Some(value) = iter.next() else {
                    bail!("--prv-exe requires an executable name\n{}", usage());
                };
                prv_exe = Some(value.clone());
            }
            other if other.starts_with('-') => {
                bail!("unknown flag '{}'\n{}", other, usage());
            }
            other => {
                if root.is_some() {
                    bail!("unexpected extra argument '{}'\n{}", other, usage());
                }
                root = Some(PathBuf::from(other));
            }
        }
    }

    let Some(root) = root else {
        println!("{}", usage());
        bail!("missing root directory argument");
    };

    let loaded = config::load_setup_config(&root)?;
    let options = SetupOptions {
        prv_exe: prv_exe
            .or(loaded.prv_exe)
            .unwrap_or_else(|| DEFAULT_PRV_EXE.to_string()),
        samplerate: loaded.samplerate.unwrap_or(DEFAULT_SAMPLERATE),
        datasets_out: datasets.or_else(|| loaded.datasets_file.as_deref().map(|f| root.join(f))),
    };

    run_day_setup(&root, &options)?;
    Ok(())
}
