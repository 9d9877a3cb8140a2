//! Log-distance path loss with seeded log-normal shadowing.
//!
//! The shadowing term is `σ·N(0,1)` drawn from a ChaCha8 RNG seeded
//! from `seed XOR link_fingerprint`, where the fingerprint hashes the
//! TX and RX positions snapped to a 0.1 m grid. The same link therefore
//! always sees the same shadowing, while neighbouring links decorrelate.
//!
//! Constructed via the builder pattern: [`LogNormalShadowingModel::builder`].

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use raypath_core::{ConfigError, Fnv1a, ModelError, ModelKind, PropagationContext};
use raypath_model::{EvalContext, PropagationModel};

use crate::log_distance::LogDistanceModel;

/// Grid used to derive the per-link seed, meters.
const SEED_GRID_M: f32 = 0.1;

/// Log-distance model plus a deterministic shadowing term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogNormalShadowingModel {
    base: LogDistanceModel,
    sigma_db: f32,
    seed: u64,
}

/// Builder for [`LogNormalShadowingModel`].
#[derive(Clone, Debug)]
pub struct LogNormalShadowingBuilder {
    exponent: f32,
    reference_distance_m: f32,
    sigma_db: f32,
    seed: u64,
}

impl LogNormalShadowingModel {
    /// Create a builder with `n = 3`, `d0 = 1 m`, `σ = 8 dB`, seed 0.
    pub fn builder() -> LogNormalShadowingBuilder {
        LogNormalShadowingBuilder {
            exponent: 3.0,
            reference_distance_m: 1.0,
            sigma_db: 8.0,
            seed: 0,
        }
    }

    /// Shadowing standard deviation, dB.
    pub fn sigma_db(&self) -> f32 {
        self.sigma_db
    }

    /// Seed mixed into every per-link RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The shadowing offset applied to `ctx`, dB.
    pub fn shadowing_db(&self, ctx: &PropagationContext) -> f32 {
        let link = Fnv1a::new()
            .vec3_quantized(ctx.transmitter_position, SEED_GRID_M)
            .vec3_quantized(ctx.receiver_position, SEED_GRID_M)
            .finish();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ link);
        (f64::from(self.sigma_db) * box_muller(&mut rng)) as f32
    }
}

/// Standard normal sample via the Box-Muller transform.
fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

impl LogNormalShadowingBuilder {
    /// Path-loss exponent (default: 3).
    pub fn exponent(mut self, exponent: f32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Reference distance in meters (default: 1).
    pub fn reference_distance_m(mut self, d0: f32) -> Self {
        self.reference_distance_m = d0;
        self
    }

    /// Shadowing standard deviation in dB (default: 8). Must be >= 0.
    pub fn sigma_db(mut self, sigma: f32) -> Self {
        self.sigma_db = sigma;
        self
    }

    /// RNG seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the model, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the log-distance parameters are invalid or
    /// `sigma_db` is negative or not finite.
    pub fn build(self) -> Result<LogNormalShadowingModel, ConfigError> {
        let base = LogDistanceModel::new(self.exponent, self.reference_distance_m)?;
        if !self.sigma_db.is_finite() || self.sigma_db < 0.0 {
            return Err(ConfigError::invalid(
                "sigma_db",
                format!("must be finite and >= 0, got {}", self.sigma_db),
            ));
        }
        Ok(LogNormalShadowingModel {
            base,
            sigma_db: self.sigma_db,
            seed: self.seed,
        })
    }
}

impl PropagationModel for LogNormalShadowingModel {
    fn name(&self) -> &str {
        "LogNormalShadowing"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::LogNormalShadowing
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        ctx.validate()?;
        Ok(self.base.loss_unchecked(ctx) + self.shadowing_db(ctx))
    }

    fn cache_fingerprint(&self) -> u64 {
        self.base
            .hash_into(Fnv1a::new())
            .f32(self.sigma_db)
            .u64(self.seed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raypath_core::Vec3;
    use raypath_scene::BoxScene;

    fn ctx_at(x: f32) -> PropagationContext {
        PropagationContext::new(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(x, 1.5, 0.0),
            900.0,
            ModelKind::LogNormalShadowing,
        )
    }

    fn loss(m: &LogNormalShadowingModel, ctx: &PropagationContext) -> f32 {
        let scene = BoxScene::new();
        m.path_loss_db(ctx, &EvalContext::new(&scene)).unwrap()
    }

    #[test]
    fn same_link_same_shadowing() {
        let m = LogNormalShadowingModel::builder().seed(42).build().unwrap();
        let c = ctx_at(250.0);
        assert_eq!(loss(&m, &c), loss(&m, &c));
        // Sub-grid jitter maps to the same seed.
        assert_eq!(m.shadowing_db(&c), m.shadowing_db(&ctx_at(250.01)));
    }

    #[test]
    fn seed_changes_shadowing() {
        let a = LogNormalShadowingModel::builder().seed(1).build().unwrap();
        let b = LogNormalShadowingModel::builder().seed(2).build().unwrap();
        let c = ctx_at(250.0);
        assert_ne!(a.shadowing_db(&c), b.shadowing_db(&c));
        assert_ne!(a.cache_fingerprint(), b.cache_fingerprint());
    }

    #[test]
    fn zero_sigma_reduces_to_log_distance() {
        let m = LogNormalShadowingModel::builder().sigma_db(0.0).build().unwrap();
        let c = ctx_at(300.0);
        let base = LogDistanceModel::default().loss_unchecked(&c);
        assert_eq!(loss(&m, &c), base);
    }

    #[test]
    fn shadowing_statistics_are_plausible() {
        let m = LogNormalShadowingModel::builder().sigma_db(6.0).seed(7).build().unwrap();
        let samples: Vec<f64> = (0..2000)
            .map(|i| f64::from(m.shadowing_db(&ctx_at(20.0 + i as f32))))
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.6, "mean = {mean}");
        assert!((var.sqrt() - 6.0).abs() < 0.6, "std = {}", var.sqrt());
    }

    #[test]
    fn negative_sigma_rejected() {
        assert!(matches!(
            LogNormalShadowingModel::builder().sigma_db(-1.0).build(),
            Err(ConfigError::InvalidValue { field: "sigma_db", .. })
        ));
        assert!(LogNormalShadowingModel::builder().exponent(-2.0).build().is_err());
    }
}
