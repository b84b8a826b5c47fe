//! Pairing-artifact rendering.
//!
//! Turns a pairing code into something scannable. Everything here is
//! best-effort: a render or viewer failure is logged as a warning and the
//! raw code remains available as a text fallback.

use anyhow::Context;
use qrcode::render::svg;
use qrcode::QrCode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Renders one pairing code to a user-presentable artifact.
pub trait PairingArtifact: Send + Sync {
    /// Render `code`, replacing any previously rendered artifact.
    fn render(&self, code: &str) -> anyhow::Result<PathBuf>;

    /// Remove the artifact. Tolerates it not existing.
    fn cleanup(&self);
}

/// SVG QR code written under the data directory and opened with the
/// platform viewer.
pub struct QrArtifact {
    path: PathBuf,
    open_viewer: bool,
}

impl QrArtifact {
    pub fn new(path: impl Into<PathBuf>, open_viewer: bool) -> Self {
        Self {
            path: path.into(),
            open_viewer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PairingArtifact for QrArtifact {
    fn render(&self, code: &str) -> anyhow::Result<PathBuf> {
        let svg_string = QrCode::new(code.as_bytes())
            .context("encode pairing code as QR")?
            .render::<svg::Color>()
            .min_dimensions(256, 256)
            .build();

        // New codes replace the old artifact in place; stale scans are worse
        // than no artifact at all.
        let _ = fs::remove_file(&self.path);
        fs::write(&self.path, svg_string)
            .with_context(|| format!("write QR image to {}", self.path.display()))?;

        if self.open_viewer {
            if let Err(e) = open::that_detached(&self.path) {
                warn!(path = %self.path.display(), error = %e,
                    "could not open QR image with the platform viewer; open it manually");
            }
        }
        Ok(self.path.clone())
    }

    fn cleanup(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed pairing artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e,
                "could not remove pairing artifact"),
        }
    }
}

/// No-op renderer for environments without a display (and for tests).
pub struct NullArtifact;

impl PairingArtifact for NullArtifact {
    fn render(&self, _code: &str) -> anyhow::Result<PathBuf> {
        Ok(PathBuf::new())
    }

    fn cleanup(&self) {}
}
