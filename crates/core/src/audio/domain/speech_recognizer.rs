use thiserror::Error;

use super::audio_segment::AudioSegment;
use super::noise_profile::NoiseProfile;
use super::transcript::Transcript;

/// Result of a recognition attempt over a whole buffer.
///
/// "No confident hypothesis" is a routine outcome, not an error, so it is
/// an explicit variant rather than an `Err` case.
#[derive(Clone, Debug, PartialEq)]
pub enum RecognitionOutcome {
    Transcribed(Transcript),
    NoSpeech,
}

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("failed to load speech model: {0}")]
    ModelLoad(String),
    #[error("speech backend error: {0}")]
    Inference(String),
    #[error("invalid audio input: {0}")]
    InvalidAudio(String),
}

/// Domain interface for offline speech-to-text transcription.
///
/// The noise profile is calibrated by the caller and threaded in
/// explicitly; implementations must not keep adaptive state between calls.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        noise: &NoiseProfile,
    ) -> Result<RecognitionOutcome, RecognizeError>;
}
