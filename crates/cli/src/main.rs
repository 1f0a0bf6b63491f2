use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use audioscribe_core::audio::domain::transcript::Transcript;

use audioscribe_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use audioscribe_core::format::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use audioscribe_core::format::infrastructure::hound_wav_writer::HoundWavWriter;
use audioscribe_core::pipeline::transcribe_file_use_case::{
    PipelineOutcome, TranscribeFileUseCase,
};
use audioscribe_core::shared::constants::DEFAULT_CALIBRATION_SECS;
use audioscribe_core::shared::error::TranscribeError;
use audioscribe_core::shared::input_descriptor::InputDescriptor;
use audioscribe_core::shared::model_resolver;
use audioscribe_core::shared::paths::transcript_path;

/// Offline transcription of audio files.
#[derive(Parser, Debug)]
#[command(name = "audioscribe")]
struct Cli {
    /// Input audio file (mp3, wav, flac, or aiff).
    input: PathBuf,

    /// Seconds of leading audio used for ambient-noise calibration.
    #[arg(long, default_value_t = DEFAULT_CALIBRATION_SECS)]
    calibration_duration: f64,

    /// Path to a whisper ggml model (resolved from cache / downloaded when omitted).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Spoken language hint passed to the recognizer.
    #[arg(long, default_value = "en")]
    language: String,
}

fn main() {
    env_logger::init();

    // Argument errors exit 1, not clap's default 2. Help and version
    // output are not errors.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    // Validation happens before any resource is allocated.
    let input = InputDescriptor::from_path(&cli.input)?;

    let model_path = model_resolver::resolve(
        cli.model.as_deref(),
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let recognizer = WhisperRecognizer::new(&model_path, &cli.language)?;
    let use_case = TranscribeFileUseCase::new(
        Box::new(FfmpegAudioReader),
        Box::new(HoundWavWriter),
        Box::new(recognizer),
        cli.calibration_duration,
    );

    match use_case.run(&input)? {
        PipelineOutcome::Transcribed(transcript) => {
            let out_path = write_transcript(input.path(), &transcript)?;
            println!("{}", transcript.text());
            log::info!("transcript written to {}", out_path.display());
            Ok(())
        }
        PipelineOutcome::Failed(failure) => Err(failure.to_string().into()),
    }
}

/// Persist the transcript verbatim as UTF-8 next to the input and return
/// the derived path. A pre-existing file there is silently overwritten.
fn write_transcript(input: &Path, transcript: &Transcript) -> Result<PathBuf, TranscribeError> {
    let out_path = transcript_path(input);
    fs::write(&out_path, transcript.text()).map_err(|e| TranscribeError::OutputWrite {
        path: out_path.clone(),
        source: e,
    })?;
    Ok(out_path)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.calibration_duration.is_finite() || cli.calibration_duration < 0.0 {
        return Err(format!(
            "Calibration duration must be a non-negative number of seconds, got {}",
            cli.calibration_duration
        )
        .into());
    }
    if cli.language.is_empty() {
        return Err("Language must not be empty".into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading speech model... {pct}%");
    } else {
        eprint!("\rDownloading speech model... {downloaded} bytes");
    }
}
