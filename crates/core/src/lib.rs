//! Offline transcription of local audio files.
//!
//! Decodes a supported container to canonical mono PCM, calibrates an
//! ambient-noise profile, and runs whisper.cpp inference to produce a
//! text transcript.

pub mod audio;
pub mod format;
pub mod pipeline;
pub mod shared;
