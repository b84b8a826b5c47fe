//! Configuration: XDG paths and the per-invocation run settings.
//!
//! Flags travel in an explicit [`RunConfig`] handed to each command; there
//! is no process-global flag state.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the XDG config/data roots.
const APP_DIR: &str = "zap";
/// Credential file inside the data directory.
const DEVICE_FILE: &str = "device.json";
/// Pairing QR image inside the data directory.
const QR_FILE: &str = "pairing_qr.svg";

/// Resolved filesystem locations for this installation.
#[derive(Clone, Debug)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve against the platform XDG directories.
    pub fn resolve() -> anyhow::Result<Self> {
        let config_dir = dirs::config_dir()
            .context("could not determine the config directory")?
            .join(APP_DIR);
        let data_dir = dirs::data_dir()
            .context("could not determine the data directory")?
            .join(APP_DIR);
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Paths rooted at an explicit directory (tests, portable installs).
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    /// Create the config and data directories if missing.
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!("failed to create config directory {}", self.config_dir.display())
        })?;
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("failed to create data directory {}", self.data_dir.display())
        })?;
        Ok(())
    }

    pub fn device_file(&self) -> PathBuf {
        self.data_dir.join(DEVICE_FILE)
    }

    pub fn qr_file(&self) -> PathBuf {
        self.data_dir.join(QR_FILE)
    }
}

/// Per-invocation settings, built from CLI flags.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub debug: bool,
    /// Confirmation wait for sends; zero means fire-and-forget.
    pub wait: Duration,
    /// Whether to open the rendered QR with the platform viewer.
    pub open_viewer: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            debug: false,
            wait: crate::dispatch::DEFAULT_WAIT,
            open_viewer: true,
        }
    }
}
