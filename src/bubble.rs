use rand::distr::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::vector;

/// Standard deviation of the per-step position jitter.
pub const POSITION_STEP: f64 = 0.1;
/// Standard deviation of the per-step size jitter.
pub const SIZE_STEP: f64 = 0.01;
/// Standard deviation of the per-step orientation jitter, before renormalizing.
pub const ORIENTATION_STEP: f64 = 0.01;

/// One moving sphere (3D) or disc (2D).
///
/// `size` is a radius but is never clamped, so a long run can drive it
/// below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble<const D: usize> {
    pub position: [f64; D],
    pub size: f64,
    /// Facing direction, always unit length.
    pub orientation: [f64; D],
}

impl<const D: usize> Bubble<D> {
    /// Builds a bubble, normalizing `orientation`. Returns `None` if the
    /// orientation has no direction.
    pub fn new(position: [f64; D], size: f64, orientation: [f64; D]) -> Option<Self> {
        let orientation = vector::normalized(orientation)?;
        Some(Self {
            position,
            size,
            orientation,
        })
    }

    /// Random-walks the bubble by one step.
    ///
    /// `dt` is accepted for the driver's benefit but does not scale the
    /// step: every call moves by the same fixed-magnitude jitter.
    pub fn advance<R: Rng + ?Sized>(&mut self, _dt: f64, rng: &mut R) {
        for x in &mut self.position {
            *x += gaussian(rng, POSITION_STEP);
        }
        self.size += gaussian(rng, SIZE_STEP);

        let mut heading = self.orientation;
        for c in &mut heading {
            *c += gaussian(rng, ORIENTATION_STEP);
        }
        self.turn_towards(heading);
    }

    /// Points the bubble along `heading`. A zero or non-finite heading leaves
    /// the previous orientation in place and returns `false`.
    pub fn turn_towards(&mut self, heading: [f64; D]) -> bool {
        match vector::normalized(heading) {
            Some(unit) => {
                self.orientation = unit;
                true
            }
            None => {
                log::warn!("orientation perturbed to zero length, keeping previous heading");
                false
            }
        }
    }
}

/// Creates `config.count` bubbles scattered around the origin.
///
/// The configuration is validated first; nothing is sampled from `rng`
/// when it is rejected.
pub fn initialize<const D: usize, R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Vec<Bubble<D>>, SimulationError> {
    config.validate_for(D)?;

    let spread = Normal::new(0.0, config.position_scale)
        .map_err(|e| SimulationError::InvalidConfig(e.to_string()))?;
    let sizes = Uniform::new_inclusive(config.size_min, config.size_max)
        .map_err(|e| SimulationError::InvalidConfig(e.to_string()))?;

    let mut bubbles = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let position: [f64; D] = std::array::from_fn(|_| spread.sample(rng));
        let size = sizes.sample(rng);
        let orientation = random_direction(rng);
        bubbles.push(Bubble {
            position,
            size,
            orientation,
        });
    }

    log::debug!(
        "initialized {} bubbles in {}D (scale {}, sizes {}..={})",
        bubbles.len(),
        D,
        config.position_scale,
        config.size_min,
        config.size_max
    );
    Ok(bubbles)
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    std_dev * z
}

/// Standard normal draw per coordinate, normalized. Zero-length draws are
/// re-sampled.
fn random_direction<const D: usize, R: Rng + ?Sized>(rng: &mut R) -> [f64; D] {
    loop {
        let v: [f64; D] = std::array::from_fn(|_| StandardNormal.sample(rng));
        if let Some(unit) = vector::normalized(v) {
            return unit;
        }
    }
}
