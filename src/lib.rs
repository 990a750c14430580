//! Day-setup utilities for MountainSort spike sorting.
//!
//! A day of tetrode recordings arrives as one directory per epoch; the
//! sorting pipeline wants one directory per tetrode with a lightweight
//! pointer file per epoch's raw data instead of copies. This crate
//! provides the layout transformation and its surrounding plumbing:
//!
//! - **Name schema** - typed parsing of recording directory names
//! - **Layout** - mountain/tetrode output tree materialization
//! - **Pointer files** - dispatching the external `ml-prv-create` generator
//! - **Links** - building the per-tetrode `.mnt` symlink farm from raw epochs
//! - **Preflight** - host tool validation before any output is created
//!
//! # Example
//!
//! ```rust,ignore
//! use mountain_setup::{run_day_setup, SetupOptions};
//! use std::path::Path;
//!
//! let summary = run_day_setup(Path::new("/data/JZ1/20161205"), &SetupOptions::default())?;
//! println!("{} tetrode datasets set up", summary.datasets);
//! ```

pub mod config;
pub mod layout;
pub mod links;
pub mod manifest;
pub mod params;
pub mod preflight;
pub mod prv;
pub mod session;
pub mod setup;

pub use session::SessionName;
pub use setup::{run_day_setup, RunSummary, SetupOptions};
