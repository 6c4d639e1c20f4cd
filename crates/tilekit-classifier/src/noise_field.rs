//! Coherent noise sampled by a rule's noise predicate.

use glam::DVec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use tilekit_rules::NoiseParams;

use crate::ClassifyError;

/// A deterministic, band-limited scalar field.
///
/// Identical `(seed, point, params)` inputs must return identical values.
pub trait NoiseField {
    /// Samples the field at `point`.
    fn sample(&mut self, seed: u32, point: DVec3, params: &NoiseParams)
    -> Result<f64, ClassifyError>;
}

/// Fractal Brownian motion over Perlin noise.
///
/// Building an fBm source allocates one Perlin table per octave, so the most
/// recently used source is kept and reused while seed and parameters repeat.
#[derive(Default)]
pub struct FbmNoiseField {
    cached: Option<(u32, NoiseParams, Fbm<Perlin>)>,
}

impl FbmNoiseField {
    /// Creates a field with an empty source cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nominal bound on `|sample|` for the given parameters: the geometric
    /// series of octave amplitudes, each octave assumed to lie in `[-1, 1]`.
    pub fn max_amplitude(params: &NoiseParams) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..params.octaves.max(1) {
            sum += amp;
            amp *= params.persistence;
        }
        sum
    }

    fn source(&mut self, seed: u32, params: &NoiseParams) -> &Fbm<Perlin> {
        if !matches!(&self.cached, Some((s, p, _)) if *s == seed && p == params) {
            self.cached = None;
        }
        let (_, _, fbm) = self.cached.get_or_insert_with(|| {
            let fbm = Fbm::<Perlin>::new(seed)
                .set_octaves(params.octaves.max(1) as usize)
                .set_frequency(params.frequency)
                .set_lacunarity(params.lacunarity)
                .set_persistence(params.persistence);
            (seed, *params, fbm)
        });
        fbm
    }
}

impl NoiseField for FbmNoiseField {
    fn sample(
        &mut self,
        seed: u32,
        point: DVec3,
        params: &NoiseParams,
    ) -> Result<f64, ClassifyError> {
        if !(params.frequency.is_finite()
            && params.lacunarity.is_finite()
            && params.persistence.is_finite())
        {
            return Err(ClassifyError::Noise {
                seed,
                reason: format!("non-finite noise parameters {params:?}"),
            });
        }

        let value = self.source(seed, params).get(point.to_array());
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ClassifyError::Noise {
                seed,
                reason: format!("non-finite sample at {point}"),
            })
        }
    }
}
