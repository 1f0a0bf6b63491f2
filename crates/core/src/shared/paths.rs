use std::path::{Path, PathBuf};

use crate::shared::constants::{TEMP_WAV_SUFFIX, TRANSCRIPT_SUFFIX};

/// Sibling path the transcript is persisted to: `<stem>_transcription.txt`.
pub fn transcript_path(input: &Path) -> PathBuf {
    sibling(input, TRANSCRIPT_SUFFIX)
}

/// Sibling path for the temporary canonical WAV: `<stem>_temp.wav`.
///
/// Not unique across invocations; two concurrent runs on the same input
/// race on this name.
pub fn temp_wav_path(input: &Path) -> PathBuf {
    sibling(input, TEMP_WAV_SUFFIX)
}

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}{suffix}"))
}
