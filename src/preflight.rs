//! Preflight checks for run validation.
//!
//! Validates that the host has the external tools a run will spawn
//! before any output directory is created. This turns per-unit spawn
//! failures into one clear diagnostic up front.

use anyhow::{bail, Result};

/// Check if a command can be resolved on PATH.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Check that specific tools are available.
///
/// Each tuple is (command_name, package_name). Returns an error listing
/// every missing tool and the package that provides it.
pub fn check_required_tools(tools: &[(&str, &str)]) -> Result<()> {
    let mut missing = Vec::new();

    for (tool, package) in tools {
        if !command_exists(tool) {
            missing.push((*tool, *package));
        }
    }

    if !missing.is_empty() {
        let msg = missing
            .iter()
            .map(|(t, p)| format!("  {} (install: {})", t, p))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Missing required host tools:\n{}", msg);
    }

    Ok(())
}

/// Check that the pointer-file generator is available before a run.
pub fn check_generator(exe: &str) -> Result<()> {
    check_required_tools(&[(exe, "mountainlab")])
}
