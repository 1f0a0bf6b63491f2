use std::path::PathBuf;

use thiserror::Error;

use crate::shared::model_resolver::ModelResolveError;

/// Hard failures that abort the pipeline before a transcript is attempted
/// or while persisting one. Recognition-stage failures are soft and live in
/// [`crate::pipeline::transcribe_file_use_case::SoftFailure`].
#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported file format '.{extension}' for {path} (supported: mp3, wav, flac, aiff)")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("failed to convert {path} to WAV: {message}")]
    Conversion { path: PathBuf, message: String },
    #[error(transparent)]
    ModelResolve(#[from] ModelResolveError),
    #[error("failed to write transcript to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
