//! Single receiver impairment model
//!
//! One receiver sees the source after a propagation delay, with its own
//! local-oscillator phase and gain, plus thermal noise:
//!
//!   y[i] = g · e^{jθ} · s[(i - d) mod N] + n[i]
//!
//! The delay is circular because frames are treated as one period of a
//! periodic signal. Noise power tracks the measured power of each source
//! frame so `snr_db` holds whatever the source level.

use num_complex::Complex32;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::noise::ComplexNoise;

/// Impairments applied by one receiver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiverParams {
    /// Circular delay in samples, positive = arrives later
    pub delay_samples: isize,
    /// Local oscillator phase offset in radians
    pub phase_rad: f64,
    /// Linear amplitude gain
    pub gain: f64,
    /// Signal-to-noise ratio; `f64::INFINITY` disables noise
    pub snr_db: f64,
}

impl ReceiverParams {
    /// No delay, no phase, unit gain, no noise
    pub fn ideal() -> Self {
        Self {
            delay_samples: 0,
            phase_rad: 0.0,
            gain: 1.0,
            snr_db: f64::INFINITY,
        }
    }

    pub fn with_delay(mut self, delay_samples: isize) -> Self {
        self.delay_samples = delay_samples;
        self
    }

    pub fn with_phase(mut self, phase_rad: f64) -> Self {
        self.phase_rad = phase_rad;
        self
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_snr_db(mut self, snr_db: f64) -> Self {
        self.snr_db = snr_db;
        self
    }
}

/// Stateful receiver (owns its noise stream)
pub struct Receiver {
    params: ReceiverParams,
    noise: ComplexNoise,
}

impl Receiver {
    pub fn new(params: ReceiverParams, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::from_rng(params, &mut rng)
    }

    pub(crate) fn from_rng(params: ReceiverParams, rng: &mut ChaCha8Rng) -> Self {
        Self {
            params,
            noise: ComplexNoise::new(0.0, rng),
        }
    }

    pub fn params(&self) -> &ReceiverParams {
        &self.params
    }

    /// Apply this receiver's impairments to one source frame
    pub fn observe(&mut self, source: &[Complex32]) -> Vec<Complex32> {
        let n = source.len();
        if n == 0 {
            return Vec::new();
        }

        let rotation = Complex32::from_polar(self.params.gain as f32, self.params.phase_rad as f32);
        let noisy = self.params.snr_db.is_finite();
        if noisy {
            let signal_power = source.iter().map(|s| s.norm_sqr() as f64).sum::<f64>() / n as f64;
            let received_power = signal_power * self.params.gain * self.params.gain;
            self.noise
                .set_power(received_power * 10.0_f64.powf(-self.params.snr_db / 10.0));
        }

        let d = self.params.delay_samples.rem_euclid(n as isize) as usize;
        (0..n)
            .map(|i| {
                let clean = source[(i + n - d) % n] * rotation;
                if noisy {
                    clean + self.noise.next_sample()
                } else {
                    clean
                }
            })
            .collect()
    }
}
