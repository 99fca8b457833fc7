use rand::Rng;
use rand_distr::StandardNormal;

/// number of draws attempted before falling back on the maximum step
const MAX_RESAMPLES: usize = 32;

/**
Samples step magnitudes from a Lévy distribution of scale c: c / z² where z is a standard
normal draw. Most steps are small, a few are very large.

Draws that are not finite (z = 0) or larger than `max_step` are resampled. After
`MAX_RESAMPLES` rejected draws, `max_step` is returned.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevySampler {
    /// scale parameter c (> 0)
    scale: f64,
    /// largest step returned (> 0)
    max_step: f64,
}

impl LevySampler {
    /** creates a sampler given:
    - scale: Lévy scale c
    - max_step: upper bound on the returned steps

    # Panics
    - if one of the parameters is not a positive finite number
    */
    pub fn new(scale:f64, max_step:f64) -> Self {
        assert!(scale.is_finite() && scale > 0., "invalid Lévy scale {}", scale);
        assert!(max_step.is_finite() && max_step > 0., "invalid maximum step {}", max_step);
        Self { scale, max_step }
    }

    /// scale parameter
    pub fn scale(&self) -> f64 { self.scale }

    /// maximum step
    pub fn max_step(&self) -> f64 { self.max_step }

    /// draws a step in (0, max_step]
    pub fn sample<R:Rng>(&self, rng:&mut R) -> f64 {
        for _ in 0..MAX_RESAMPLES {
            let z:f64 = rng.sample(StandardNormal);
            let step = self.scale / (z * z);
            if step.is_finite() && step > 0. && step <= self.max_step {
                return step;
            }
        }
        self.max_step
    }

    /// draws a step, rounds it and bounds it by limit
    pub fn sample_count<R:Rng>(&self, rng:&mut R, limit:usize) -> usize {
        let step = self.sample(rng).round();
        if step >= limit as f64 { limit } else { step as usize }
    }
}
