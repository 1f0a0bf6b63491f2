use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;

/// Domain interface for encoding an AudioSegment as a canonical WAV file.
pub trait WavWriter: Send {
    /// Write `audio` as 16-bit PCM WAV at `path`, overwriting any
    /// existing file.
    fn write_wav(&self, path: &Path, audio: &AudioSegment)
        -> Result<(), Box<dyn std::error::Error>>;
}
