//! Geometric ray-tracing model.
//!
//! Each evaluation is a stateless search over the obstacles near the
//! link. Four discovery routines share one shape: generate candidates,
//! filter them geometrically, test clearance against the scene, then
//! compute loss and phase. Survivors are summed by [`combine`].
//!
//! | Mechanism   | Candidates                          | Extra loss            | Phase        |
//! |-------------|-------------------------------------|-----------------------|--------------|
//! | Direct      | the TX–RX segment                   | none                  | 0            |
//! | Reflection  | image-method point on each wall     | Fresnel `|Γ|`         | `π/2..π`     |
//! | Diffraction | roof and corner edges near the path | knife-edge `J(v)`     | `−π/4`       |
//! | Scattering  | jittered samples on each wall       | diffuse lobe + base   | 0            |
//!
//! Degenerate geometry drops the candidate silently. When nothing
//! survives the result is [`RayTracingConfig::blocked_loss_db`].

mod combine;
mod config;
mod diffraction;
mod direct;
mod reflection;
mod scattering;

pub use combine::combine;
pub use config::{CombineMode, RayTracingConfig, MAX_LOBE_EXPONENT};

use glam::Vec3;
use raypath_core::{
    Aabb, ConfigError, LayerMask, ModelError, ModelKind, PathContribution,
    PathMechanism, PropagationContext,
};
use raypath_model::{EvalContext, PropagationModel};
use raypath_scene::{ObstacleList, Scene};
use tracing::debug;

/// Per-evaluation link geometry shared by the discovery routines.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Link {
    pub tx: Vec3,
    pub rx: Vec3,
    pub frequency_mhz: f32,
    pub wavelength_m: f32,
    pub layers: LayerMask,
}

impl Link {
    fn new(ctx: &PropagationContext, config: &RayTracingConfig) -> Self {
        Self {
            tx: ctx.transmitter_position,
            rx: ctx.receiver_position,
            frequency_mhz: ctx.frequency_mhz,
            wavelength_m: ctx.wavelength_m(),
            layers: ctx.obstacle_layers.unwrap_or(config.layers),
        }
    }

    /// Obstacles within `margin` of the TX–RX bounding box, ascending.
    fn nearby(&self, scene: &dyn Scene, margin: f32) -> ObstacleList {
        let search = Aabb::new(self.tx, self.rx).expanded(margin);
        scene.overlap_box(search.center(), search.half_extents(), self.layers)
    }
}

/// Every path found for one link, plus the combined loss.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceReport {
    /// Surviving paths, in discovery order: direct, reflections,
    /// diffractions, scattering.
    pub paths: Vec<PathContribution>,
    /// Combined one-way loss, dB.
    pub loss_db: f32,
}

impl TraceReport {
    /// Number of paths produced by `mechanism`.
    pub fn count(&self, mechanism: PathMechanism) -> usize {
        self.paths.iter().filter(|p| p.mechanism == mechanism).count()
    }

    /// Returns `true` if no path survived.
    pub fn is_blocked(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Ray-tracing propagation model.
///
/// # Thread Safety
///
/// Holds only the validated configuration, so a single instance can
/// serve any number of concurrent evaluations.
#[derive(Clone, Debug)]
pub struct RayTracingModel {
    config: RayTracingConfig,
    fingerprint: u64,
}

impl RayTracingModel {
    /// Create a model from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config.validate()` fails.
    pub fn new(config: RayTracingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fingerprint = config.fingerprint();
        Ok(Self {
            config,
            fingerprint,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &RayTracingConfig {
        &self.config
    }

    /// Discover and combine every path for `ctx`.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidContext`] if `ctx` fails validation. Scene
    /// degeneracies never produce errors.
    pub fn trace(
        &self,
        ctx: &PropagationContext,
        env: &EvalContext<'_>,
    ) -> Result<TraceReport, ModelError> {
        ctx.validate()?;
        let cfg = &self.config;
        let link = Link::new(ctx, cfg);
        let mut paths = Vec::new();

        direct::discover(&link, cfg, env, &mut paths);
        let nearby = link.nearby(env.scene(), cfg.search_margin_m);
        reflection::discover(&link, &nearby, cfg, env, &mut paths);
        diffraction::discover(&link, &nearby, cfg, env, &mut paths);
        if cfg.enable_scattering {
            scattering::discover(&link, &nearby, cfg, env, &mut paths);
        }

        let loss_db = combine(
            &paths,
            cfg.combine_mode,
            link.wavelength_m,
            cfg.blocked_loss_db,
        );
        let report = TraceReport { paths, loss_db };
        debug!(
            obstacles = nearby.len(),
            direct = report.count(PathMechanism::Direct),
            reflection = report.count(PathMechanism::Reflection),
            diffraction = report.count(PathMechanism::Diffraction),
            scattering = report.count(PathMechanism::Scattering),
            "ray trace combined to {:.2} dB",
            loss_db
        );
        Ok(report)
    }
}

impl Default for RayTracingModel {
    fn default() -> Self {
        let config = RayTracingConfig::default();
        let fingerprint = config.fingerprint();
        Self {
            config,
            fingerprint,
        }
    }
}

impl PropagationModel for RayTracingModel {
    fn name(&self) -> &str {
        "RayTracing"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::RayTracing
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        self.trace(ctx, env).map(|r| r.loss_db)
    }

    fn cache_fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
