//! Randomized click points and delays.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use majsoul_rpa_protocols::{Region, RpaError};

/// Edge bias used by plain clicks.
pub const DEFAULT_EDGE_BIAS: f64 = 2.0;

/// Rejection attempts per axis before falling back to a central uniform draw.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Pixel delta of one wheel "click".
pub const SCROLL_DELTA_PER_CLICK: f64 = 116.0;

/// Source of humanized randomness.
///
/// Click points are drawn per axis from a normal distribution centered on the
/// region, with standard deviation `half_extent / edge_bias`, and redrawn until
/// they land strictly inside the region. A small bias spreads clicks over the
/// whole region; a large one clusters them at the center.
pub struct Sampler {
    rng: ChaCha8Rng,
    max_attempts: u32,
}

impl Sampler {
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Deterministic sampler, for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draw a point strictly inside `region`.
    pub fn sample_point(&mut self, region: &Region, edge_bias: f64) -> Result<(f64, f64), RpaError> {
        if !edge_bias.is_finite() || edge_bias <= 0.0 {
            return Err(RpaError::InvalidParameter(format!(
                "edge bias must be positive, got {edge_bias}"
            )));
        }
        if region.width <= 0 || region.height <= 0 {
            return Err(RpaError::InvalidRegion {
                left: region.left,
                top: region.top,
                width: region.width,
                height: region.height,
            });
        }

        let x = self.sample_axis(f64::from(region.left), f64::from(region.width), edge_bias)?;
        let y = self.sample_axis(f64::from(region.top), f64::from(region.height), edge_bias)?;
        Ok((x, y))
    }

    fn sample_axis(&mut self, origin: f64, extent: f64, edge_bias: f64) -> Result<f64, RpaError> {
        let mu = origin + extent / 2.0;
        let sigma = (extent / 2.0) / edge_bias;
        let normal = Normal::new(mu, sigma)
            .map_err(|e| RpaError::InvalidParameter(format!("sigma {sigma}: {e}")))?;

        for _ in 0..self.max_attempts {
            let p = normal.sample(&mut self.rng);
            if origin < p && p < origin + extent {
                return Ok(p);
            }
        }

        debug!(
            "No sample inside ({}, {}) after {} attempts, drawing uniformly",
            origin,
            origin + extent,
            self.max_attempts
        );
        Ok(origin + extent * self.rng.gen_range(0.25..0.75))
    }

    /// A delay around `base`, spread normally by `spread` and clamped to two spreads.
    pub fn jittered_delay(&mut self, base: Duration, spread: Duration) -> Duration {
        if spread.is_zero() {
            return base;
        }
        let (base_s, spread_s) = (base.as_secs_f64(), spread.as_secs_f64());
        let low = (base_s - 2.0 * spread_s).max(0.0);
        let high = base_s + 2.0 * spread_s;
        let drawn = match Normal::new(base_s, spread_s) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => base_s,
        };
        Duration::from_secs_f64(drawn.clamp(low, high))
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
