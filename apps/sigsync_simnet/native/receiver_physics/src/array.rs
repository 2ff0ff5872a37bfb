//! Receiver array
//!
//! P receivers observing one source. Receiver 0 maps to the reference port
//! of the aligner; the rest are its secondaries.

use num_complex::Complex32;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::receiver::{Receiver, ReceiverParams};

pub struct ReceiverArray {
    receivers: Vec<Receiver>,
}

impl ReceiverArray {
    /// One receiver per entry in `params`, noise streams derived from `seed`
    pub fn new(params: Vec<ReceiverParams>, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let receivers = params
            .into_iter()
            .map(|p| Receiver::from_rng(p, &mut rng))
            .collect();
        Self { receivers }
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn params(&self, index: usize) -> Option<&ReceiverParams> {
        self.receivers.get(index).map(|r| r.params())
    }

    /// One impaired frame per receiver, in receiver order
    pub fn capture(&mut self, source: &[Complex32]) -> Vec<Vec<Complex32>> {
        self.receivers.iter_mut().map(|r| r.observe(source)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::QpskSource;

    #[test]
    fn test_capture_one_frame_per_receiver() {
        let mut array = ReceiverArray::new(
            vec![
                ReceiverParams::ideal(),
                ReceiverParams::ideal().with_delay(2),
                ReceiverParams::ideal().with_phase(1.0),
            ],
            0,
        );
        let source = QpskSource::new(2).next_frame(16);
        let frames = array.capture(&source);

        assert_eq!(array.len(), 3);
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.len() == 16));
        assert_eq!(frames[0], source);
        assert_eq!(frames[1][2], source[0]);
    }

    #[test]
    fn test_noise_independent_per_receiver() {
        let noisy = ReceiverParams::ideal().with_snr_db(10.0);
        let mut array = ReceiverArray::new(vec![noisy, noisy], 99);
        let source = QpskSource::new(2).next_frame(64);
        let frames = array.capture(&source);
        assert_ne!(frames[0], frames[1]);
    }

    #[test]
    fn test_seed_reproducible() {
        let params = vec![
            ReceiverParams::ideal().with_snr_db(5.0),
            ReceiverParams::ideal().with_delay(-4).with_snr_db(5.0),
        ];
        let source = QpskSource::new(2).next_frame(64);
        let a = ReceiverArray::new(params.clone(), 7).capture(&source);
        let b = ReceiverArray::new(params, 7).capture(&source);
        assert_eq!(a, b);
    }
}
