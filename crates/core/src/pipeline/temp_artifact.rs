use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Scope guard for the temporary canonical WAV.
///
/// Removal happens on `Drop`, so the file cannot outlive the invocation on
/// any exit path — normal return, soft failure, or panic. Removal is
/// best-effort: a missing file is a no-op and other failures are logged,
/// never propagated.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => log::debug!("removed temporary file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "failed to remove temporary file {}: {e}",
                self.path.display()
            ),
        }
    }
}
