use std::fmt;
use std::path::PathBuf;

use crate::audio::domain::noise_profile::NoiseProfile;
use crate::audio::domain::speech_recognizer::{
    RecognitionOutcome, RecognizeError, SpeechRecognizer,
};
use crate::audio::domain::transcript::Transcript;
use crate::format::domain::audio_reader::AudioReader;
use crate::format::domain::wav_writer::WavWriter;
use crate::pipeline::temp_artifact::TempArtifact;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::shared::error::TranscribeError;
use crate::shared::input_descriptor::InputDescriptor;
use crate::shared::paths::temp_wav_path;

/// A failure that ends the transcription attempt but not the process:
/// cleanup still runs and the caller reports it as "no transcript".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoftFailure {
    NoSpeech,
    Backend(String),
    Unexpected(String),
}

impl fmt::Display for SoftFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftFailure::NoSpeech => {
                write!(f, "speech recognition could not understand the audio")
            }
            SoftFailure::Backend(msg) => write!(f, "speech recognition error: {msg}"),
            SoftFailure::Unexpected(msg) => write!(f, "error during transcription: {msg}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PipelineOutcome {
    Transcribed(Transcript),
    Failed(SoftFailure),
}

/// Sequential transcription pipeline for one validated input.
///
/// Normalizes convertible inputs to a temporary canonical WAV, loads the
/// canonical audio, calibrates a noise profile over the leading slice, and
/// recognizes the full buffer. The temporary WAV is owned by a
/// [`TempArtifact`] guard, so it is removed on every exit path.
pub struct TranscribeFileUseCase {
    reader: Box<dyn AudioReader>,
    wav_writer: Box<dyn WavWriter>,
    recognizer: Box<dyn SpeechRecognizer>,
    calibration_secs: f64,
}

impl TranscribeFileUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        wav_writer: Box<dyn WavWriter>,
        recognizer: Box<dyn SpeechRecognizer>,
        calibration_secs: f64,
    ) -> Self {
        Self {
            reader,
            wav_writer,
            recognizer,
            calibration_secs,
        }
    }

    pub fn run(&self, input: &InputDescriptor) -> Result<PipelineOutcome, TranscribeError> {
        // 1. Normalize convertible inputs to a temporary canonical WAV.
        //    Conversion failure is terminal for this input; no retry.
        let mut _temp_guard: Option<TempArtifact> = None;
        let audio_path: PathBuf = if input.needs_conversion() {
            let temp_path = temp_wav_path(input.path());
            log::info!(
                "converting {} to {}",
                input.path().display(),
                temp_path.display()
            );

            let decoded = self
                .reader
                .read_audio(input.path(), WHISPER_SAMPLE_RATE)
                .map_err(|e| conversion_error(input, e.to_string()))?
                .ok_or_else(|| conversion_error(input, "no audio stream".to_string()))?;

            // Guard before the write so a partial file is also cleaned up.
            _temp_guard = Some(TempArtifact::new(temp_path.clone()));
            self.wav_writer
                .write_wav(&temp_path, &decoded)
                .map_err(|e| conversion_error(input, e.to_string()))?;

            temp_path
        } else {
            input.path().to_path_buf()
        };

        // 2. Load the canonical audio. From here on failures are soft: the
        //    guard drops on return and the caller reports "no transcript".
        log::info!("loading audio file {}", audio_path.display());
        let audio = match self.reader.read_audio(&audio_path, WHISPER_SAMPLE_RATE) {
            Ok(Some(audio)) => audio,
            Ok(None) => {
                return Ok(PipelineOutcome::Failed(soft(SoftFailure::Unexpected(
                    "no audio stream in canonical file".to_string(),
                ))))
            }
            Err(e) => {
                return Ok(PipelineOutcome::Failed(soft(SoftFailure::Unexpected(
                    e.to_string(),
                ))))
            }
        };

        // 3. Calibrate ambient noise over the leading slice.
        let noise = NoiseProfile::calibrate(&audio, self.calibration_secs);
        log::debug!(
            "calibrated over {:.1}s, energy threshold {:.4}",
            self.calibration_secs,
            noise.energy_threshold()
        );

        // 4. Recognize the full buffer.
        log::info!("transcribing {:.1}s of audio", audio.duration());
        let outcome = match self.recognizer.transcribe(&audio, &noise) {
            Ok(RecognitionOutcome::Transcribed(transcript)) => {
                PipelineOutcome::Transcribed(transcript)
            }
            Ok(RecognitionOutcome::NoSpeech) => PipelineOutcome::Failed(soft(SoftFailure::NoSpeech)),
            Err(e @ (RecognizeError::ModelLoad(_) | RecognizeError::Inference(_))) => {
                PipelineOutcome::Failed(soft(SoftFailure::Backend(e.to_string())))
            }
            Err(e) => PipelineOutcome::Failed(soft(SoftFailure::Unexpected(e.to_string()))),
        };

        Ok(outcome)
    }
}

fn conversion_error(input: &InputDescriptor, message: String) -> TranscribeError {
    TranscribeError::Conversion {
        path: input.path().to_path_buf(),
        message,
    }
}

fn soft(failure: SoftFailure) -> SoftFailure {
    log::warn!("{failure}");
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_segment::AudioSegment;
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    // ─── Stubs ───

    struct StubReader {
        segment: Option<AudioSegment>,
        fail: bool,
    }

    impl AudioReader for StubReader {
        fn read_audio(
            &self,
            _: &Path,
            _: u32,
        ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
            if self.fail {
                return Err("decode failed".into());
            }
            Ok(self.segment.clone())
        }
    }

    struct StubWavWriter {
        written: Arc<Mutex<Option<PathBuf>>>,
        fail: bool,
    }

    impl WavWriter for StubWavWriter {
        fn write_wav(
            &self,
            path: &Path,
            _: &AudioSegment,
        ) -> Result<(), Box<dyn std::error::Error>> {
            fs::write(path, b"RIFF")?;
            *self.written.lock().unwrap() = Some(path.to_path_buf());
            if self.fail {
                return Err("disk full".into());
            }
            Ok(())
        }
    }

    enum RecognizerBehaviour {
        Text(&'static str),
        NoSpeech,
        BackendError,
        UnexpectedError,
        Panic,
    }

    struct StubRecognizer {
        behaviour: RecognizerBehaviour,
        seen_threshold: Arc<Mutex<Option<f32>>>,
    }

    impl SpeechRecognizer for StubRecognizer {
        fn transcribe(
            &self,
            _: &AudioSegment,
            noise: &NoiseProfile,
        ) -> Result<RecognitionOutcome, RecognizeError> {
            *self.seen_threshold.lock().unwrap() = Some(noise.energy_threshold());
            match self.behaviour {
                RecognizerBehaviour::Text(t) => {
                    Ok(RecognitionOutcome::Transcribed(Transcript::new(t)))
                }
                RecognizerBehaviour::NoSpeech => Ok(RecognitionOutcome::NoSpeech),
                RecognizerBehaviour::BackendError => {
                    Err(RecognizeError::Inference("model exploded".to_string()))
                }
                RecognizerBehaviour::UnexpectedError => {
                    Err(RecognizeError::InvalidAudio("negative length".to_string()))
                }
                RecognizerBehaviour::Panic => panic!("recognizer crashed"),
            }
        }
    }

    fn silent_audio() -> AudioSegment {
        AudioSegment::new(vec![0.0; 16000], 16000)
    }

    fn make_input(dir: &TempDir, name: &str) -> InputDescriptor {
        let path = dir.path().join(name);
        fs::write(&path, b"container bytes").unwrap();
        InputDescriptor::from_path(&path).unwrap()
    }

    fn use_case(
        segment: Option<AudioSegment>,
        behaviour: RecognizerBehaviour,
    ) -> (TranscribeFileUseCase, Arc<Mutex<Option<PathBuf>>>) {
        let written = Arc::new(Mutex::new(None));
        let uc = TranscribeFileUseCase::new(
            Box::new(StubReader {
                segment,
                fail: false,
            }),
            Box::new(StubWavWriter {
                written: written.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                behaviour,
                seen_threshold: Arc::new(Mutex::new(None)),
            }),
            0.5,
        );
        (uc, written)
    }

    #[test]
    fn test_canonical_input_skips_conversion() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "speech.wav");
        let (uc, written) = use_case(Some(silent_audio()), RecognizerBehaviour::Text("hello"));

        let outcome = uc.run(&input).unwrap();

        assert_eq!(
            outcome,
            PipelineOutcome::Transcribed(Transcript::new("hello"))
        );
        assert!(written.lock().unwrap().is_none());
        assert!(!dir.path().join("speech_temp.wav").exists());
    }

    #[test]
    fn test_convertible_input_creates_and_removes_temp_wav() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "speech.mp3");
        let (uc, written) = use_case(Some(silent_audio()), RecognizerBehaviour::Text("hi"));

        let outcome = uc.run(&input).unwrap();

        assert_eq!(outcome, PipelineOutcome::Transcribed(Transcript::new("hi")));
        let temp = dir.path().join("speech_temp.wav");
        assert_eq!(written.lock().unwrap().as_deref(), Some(temp.as_path()));
        assert!(!temp.exists());
    }

    #[test]
    fn test_temp_removed_on_no_speech() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "quiet.mp3");
        let (uc, _) = use_case(Some(silent_audio()), RecognizerBehaviour::NoSpeech);

        let outcome = uc.run(&input).unwrap();

        assert_eq!(outcome, PipelineOutcome::Failed(SoftFailure::NoSpeech));
        assert!(!dir.path().join("quiet_temp.wav").exists());
    }

    #[test]
    fn test_temp_removed_on_backend_error() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "broken.mp3");
        let (uc, _) = use_case(Some(silent_audio()), RecognizerBehaviour::BackendError);

        let outcome = uc.run(&input).unwrap();

        assert!(matches!(
            outcome,
            PipelineOutcome::Failed(SoftFailure::Backend(_))
        ));
        assert!(!dir.path().join("broken_temp.wav").exists());
    }

    #[test]
    fn test_temp_removed_on_unexpected_error() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "odd.mp3");
        let (uc, _) = use_case(Some(silent_audio()), RecognizerBehaviour::UnexpectedError);

        let outcome = uc.run(&input).unwrap();

        assert!(matches!(
            outcome,
            PipelineOutcome::Failed(SoftFailure::Unexpected(_))
        ));
        assert!(!dir.path().join("odd_temp.wav").exists());
    }

    #[test]
    fn test_temp_removed_when_recognizer_panics() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "crash.mp3");
        let (uc, _) = use_case(Some(silent_audio()), RecognizerBehaviour::Panic);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| uc.run(&input)));

        assert!(result.is_err());
        assert!(!dir.path().join("crash_temp.wav").exists());
    }

    #[test]
    fn test_decode_failure_is_conversion_error_with_no_temp() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "bad.mp3");
        let written = Arc::new(Mutex::new(None));
        let uc = TranscribeFileUseCase::new(
            Box::new(StubReader {
                segment: None,
                fail: true,
            }),
            Box::new(StubWavWriter {
                written: written.clone(),
                fail: false,
            }),
            Box::new(StubRecognizer {
                behaviour: RecognizerBehaviour::Text("unreachable"),
                seen_threshold: Arc::new(Mutex::new(None)),
            }),
            0.5,
        );

        let result = uc.run(&input);

        assert!(matches!(result, Err(TranscribeError::Conversion { .. })));
        assert!(written.lock().unwrap().is_none());
        assert!(!dir.path().join("bad_temp.wav").exists());
    }

    #[test]
    fn test_no_audio_stream_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "video_only.mp3");
        let (uc, _) = use_case(None, RecognizerBehaviour::Text("unreachable"));

        let result = uc.run(&input);

        assert!(matches!(result, Err(TranscribeError::Conversion { .. })));
    }

    #[test]
    fn test_failed_wav_write_cleans_partial_temp() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "partial.mp3");
        let written = Arc::new(Mutex::new(None));
        let uc = TranscribeFileUseCase::new(
            Box::new(StubReader {
                segment: Some(silent_audio()),
                fail: false,
            }),
            Box::new(StubWavWriter {
                written: written.clone(),
                fail: true,
            }),
            Box::new(StubRecognizer {
                behaviour: RecognizerBehaviour::Text("unreachable"),
                seen_threshold: Arc::new(Mutex::new(None)),
            }),
            0.5,
        );

        let result = uc.run(&input);

        assert!(matches!(result, Err(TranscribeError::Conversion { .. })));
        // The stub wrote a partial file before failing; the guard removed it.
        assert!(written.lock().unwrap().is_some());
        assert!(!dir.path().join("partial_temp.wav").exists());
    }

    #[test]
    fn test_calibrated_profile_reaches_recognizer() {
        let dir = TempDir::new().unwrap();
        let input = make_input(&dir, "speech.wav");
        let seen = Arc::new(Mutex::new(None));
        let uc = TranscribeFileUseCase::new(
            Box::new(StubReader {
                segment: Some(silent_audio()),
                fail: false,
            }),
            Box::new(StubWavWriter {
                written: Arc::new(Mutex::new(None)),
                fail: false,
            }),
            Box::new(StubRecognizer {
                behaviour: RecognizerBehaviour::Text("ok"),
                seen_threshold: seen.clone(),
            }),
            0.5,
        );

        uc.run(&input).unwrap();

        // Silent leader calibrates to the energy floor.
        let threshold = seen.lock().unwrap().unwrap();
        assert!(threshold > 0.0);
    }
}
