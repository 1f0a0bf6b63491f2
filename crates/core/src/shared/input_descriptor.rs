use std::path::{Path, PathBuf};

use crate::shared::constants::{CANONICAL_EXTENSIONS, CONVERTIBLE_EXTENSIONS};
use crate::shared::error::TranscribeError;

/// How the input's container relates to the canonical decodable format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatCategory {
    /// Natively decodable by the recognition stage.
    Canonical,
    /// Must be re-encoded to a temporary canonical WAV first.
    Convertible,
}

/// A validated input path plus its derived format category.
///
/// Construction performs the existence check and extension classification;
/// nothing downstream runs for paths that fail here.
#[derive(Clone, Debug)]
pub struct InputDescriptor {
    path: PathBuf,
    category: FormatCategory,
}

impl InputDescriptor {
    pub fn from_path(path: &Path) -> Result<Self, TranscribeError> {
        if !path.exists() {
            return Err(TranscribeError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        let category = if CANONICAL_EXTENSIONS.contains(&extension.as_str()) {
            FormatCategory::Canonical
        } else if CONVERTIBLE_EXTENSIONS.contains(&extension.as_str()) {
            FormatCategory::Convertible
        } else {
            return Err(TranscribeError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        };

        Ok(Self {
            path: path.to_path_buf(),
            category,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn category(&self) -> FormatCategory {
        self.category
    }

    pub fn needs_conversion(&self) -> bool {
        self.category == FormatCategory::Convertible
    }
}
