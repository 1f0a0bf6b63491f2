/// Extensions the recognition backend decodes without a conversion step.
pub const CANONICAL_EXTENSIONS: &[&str] = &["wav", "flac", "aiff"];

/// Extensions that are re-encoded to a temporary canonical WAV first.
pub const CONVERTIBLE_EXTENSIONS: &[&str] = &["mp3"];

pub const WHISPER_MODEL_FILENAME: &str = "ggml-tiny.en.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin";

/// Sample rate whisper.cpp expects.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Seconds of leading audio used for ambient-noise calibration.
pub const DEFAULT_CALIBRATION_SECS: f64 = 0.5;

pub const TRANSCRIPT_SUFFIX: &str = "_transcription.txt";
pub const TEMP_WAV_SUFFIX: &str = "_temp.wav";
