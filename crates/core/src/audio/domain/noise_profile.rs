use crate::audio::domain::audio_segment::AudioSegment;

/// Speech must rise this factor above the calibrated ambient RMS.
const AMBIENT_MARGIN: f32 = 1.5;

/// Lower bound on the threshold so digitally silent leaders don't make
/// everything count as speech.
const ENERGY_FLOOR: f32 = 0.01;

/// Window used when scanning for activity, in fractions of a second.
const ACTIVITY_WINDOW_SECS: f64 = 0.1;

/// Detection thresholds derived from the leading slice of the audio.
///
/// Calibration is an explicit operation returning a value that is passed
/// into recognition, rather than hidden mutable state on the recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseProfile {
    energy_threshold: f32,
}

impl NoiseProfile {
    /// Measure ambient RMS over the first `duration_secs` of `audio` and
    /// derive the energy threshold speech has to exceed.
    pub fn calibrate(audio: &AudioSegment, duration_secs: f64) -> Self {
        let ambient = rms(audio.leading(duration_secs));
        Self {
            energy_threshold: (ambient * AMBIENT_MARGIN).max(ENERGY_FLOOR),
        }
    }

    pub fn energy_threshold(&self) -> f32 {
        self.energy_threshold
    }

    /// True when any activity window in `audio` exceeds the threshold.
    pub fn detects_activity(&self, audio: &AudioSegment) -> bool {
        let window = ((audio.sample_rate() as f64 * ACTIVITY_WINDOW_SECS) as usize).max(1);
        audio
            .samples()
            .chunks(window)
            .any(|chunk| rms(chunk) > self.energy_threshold)
    }
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}
