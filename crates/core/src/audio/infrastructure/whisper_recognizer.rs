use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::noise_profile::NoiseProfile;
use crate::audio::domain::speech_recognizer::{
    RecognitionOutcome, RecognizeError, SpeechRecognizer,
};
use crate::audio::domain::transcript::Transcript;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Runs greedy decoding over the full buffer. Audio that never rises above
/// the calibrated noise threshold is reported as `NoSpeech` without
/// spending inference time on it.
#[derive(Debug)]
pub struct WhisperRecognizer {
    model_path: PathBuf,
    language: String,
}

impl WhisperRecognizer {
    pub fn new(model_path: &Path, language: &str) -> Result<Self, RecognizeError> {
        if !model_path.exists() {
            return Err(RecognizeError::ModelLoad(format!(
                "model not found at: {}",
                model_path.display()
            )));
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
            language: language.to_string(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        noise: &NoiseProfile,
    ) -> Result<RecognitionOutcome, RecognizeError> {
        if audio.samples().is_empty() {
            return Err(RecognizeError::InvalidAudio(
                "audio buffer is empty".to_string(),
            ));
        }

        if !noise.detects_activity(audio) {
            return Ok(RecognitionOutcome::NoSpeech);
        }

        let model_path = self
            .model_path
            .to_str()
            .ok_or_else(|| RecognizeError::ModelLoad("invalid model path".to_string()))?;
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| RecognizeError::ModelLoad(e.to_string()))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| RecognizeError::Inference(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some(self.language.as_str()));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| RecognizeError::Inference(e.to_string()))?;

        let mut text = String::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let token_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens ([_BEG_], <|endoftext|>, etc.)
                let trimmed = token_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                text.push_str(token_text);
            }
        }

        let transcript = Transcript::new(text);
        if transcript.is_empty() {
            Ok(RecognitionOutcome::NoSpeech)
        } else {
            Ok(RecognitionOutcome::Transcribed(transcript))
        }
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
