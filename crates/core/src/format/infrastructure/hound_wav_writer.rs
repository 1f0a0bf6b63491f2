use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;
use crate::format::domain::wav_writer::WavWriter;

/// Writes an AudioSegment as a 16-bit PCM mono WAV file using hound.
pub struct HoundWavWriter;

impl WavWriter for HoundWavWriter {
    fn write_wav(
        &self,
        path: &Path,
        audio: &AudioSegment,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: audio.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in audio.samples() {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    #[test]
    fn test_written_wav_round_trips_spec() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.wav");
        let audio = AudioSegment::new(vec![0.0, 0.5, -0.5, 1.0], 16000);

        HoundWavWriter.write_wav(&path, &audio).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0);
        assert_relative_eq!(samples[1] as f32 / i16::MAX as f32, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip.wav");
        let audio = AudioSegment::new(vec![2.0, -2.0], 16000);

        HoundWavWriter.write_wav(&path, &audio).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples[0], i16::MAX);
        assert_eq!(samples[1], -i16::MAX);
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("again.wav");
        HoundWavWriter
            .write_wav(&path, &AudioSegment::new(vec![0.0; 100], 16000))
            .unwrap();
        HoundWavWriter
            .write_wav(&path, &AudioSegment::new(vec![0.0; 10], 16000))
            .unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 10);
    }

    #[test]
    fn test_write_to_missing_directory_errors() {
        let audio = AudioSegment::new(vec![0.0; 10], 16000);
        let result = HoundWavWriter.write_wav(Path::new("/nonexistent/dir/x.wav"), &audio);
        assert!(result.is_err());
    }
}
