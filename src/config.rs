//! Optional per-day run configuration.
//!
//! A day root may carry a `setup.toml` overriding run defaults:
//!
//! ```toml
//! [setup]
//! samplerate = 30000
//! prv_exe = "ml-prv-create"
//! datasets_file = "datasets.txt"
//! ```
//!
//! Every key is optional; an absent file means defaults. Command-line
//! flags take precedence over the file.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config filename looked up in the day root.
pub const CONFIG_FILENAME: &str = "setup.toml";

/// Values loaded from `setup.toml`, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSetupConfig {
    pub samplerate: Option<u32>,
    pub prv_exe: Option<String>,
    pub datasets_file: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SetupToml {
    setup: SetupSectionToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SetupSectionToml {
    samplerate: Option<u32>,
    prv_exe: Option<String>,
    datasets_file: Option<String>,
}

/// Load `setup.toml` from the day root if present.
pub fn load_setup_config(root: &Path) -> Result<LoadedSetupConfig> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.is_file() {
        return Ok(LoadedSetupConfig::default());
    }

    let config_bytes = fs::read_to_string(&config_path)
        .with_context(|| format!("reading setup config '{}'", config_path.display()))?;
    let parsed: SetupToml = toml::from_str(&config_bytes)
        .with_context(|| format!("parsing setup config '{}'", config_path.display()))?;
    let section = parsed.setup;

    if section.samplerate == Some(0) {
        bail!(
            "invalid setup config '{}': samplerate must be nonzero",
            config_path.display()
        );
    }
    if let Some(exe) = &section.prv_exe {
        if exe.trim().is_empty() {
            bail!(
                "invalid setup config '{}': prv_exe must not be empty",
                config_path.display()
            );
        }
    }

    Ok(LoadedSetupConfig {
        samplerate: section.samplerate,
        prv_exe: section.prv_exe,
        datasets_file: section.datasets_file,
    })
}
