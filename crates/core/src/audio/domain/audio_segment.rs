/// A segment of decoded audio: mono PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// The first `secs` seconds of samples, clamped to the segment length.
    pub fn leading(&self, secs: f64) -> &[f32] {
        let count = (secs.max(0.0) * self.sample_rate as f64) as usize;
        &self.samples[..count.min(self.samples.len())]
    }
}
