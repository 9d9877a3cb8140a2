//! Okumura-Hata and COST-231 Hata empirical models.
//!
//! Both use the context's antenna heights (base station = transmitter,
//! mobile = receiver) rather than the positions' Y coordinates. Heights
//! are floored at 1 m and distance at 10 m to keep the fits finite
//! outside their validity range.

use raypath_core::{Fnv1a, ModelError, ModelKind, PropagationContext};
use raypath_model::{EvalContext, PropagationModel};

const MIN_HEIGHT_M: f32 = 1.0;
const MIN_DISTANCE_KM: f32 = 0.01;

/// Urban environment class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CityKind {
    /// Small or medium-sized city.
    #[default]
    SmallMedium,
    /// Large city / metropolitan centre.
    Metropolitan,
}

impl CityKind {
    fn id(self) -> u32 {
        match self {
            Self::SmallMedium => 0,
            Self::Metropolitan => 1,
        }
    }
}

/// Mobile antenna height correction `a(h_m)`, dB.
fn mobile_correction_db(city: CityKind, frequency_mhz: f32, hm: f32) -> f32 {
    let log_f = frequency_mhz.log10();
    match city {
        CityKind::SmallMedium => (1.1 * log_f - 0.7) * hm - (1.56 * log_f - 0.8),
        CityKind::Metropolitan if frequency_mhz >= 300.0 => {
            3.2 * (11.75 * hm).log10().powi(2) - 4.97
        }
        CityKind::Metropolitan => 8.29 * (1.54 * hm).log10().powi(2) - 1.1,
    }
}

/// Shared Hata form: `A + B·log f − 13.82·log h_b − a(h_m) + (44.9 − 6.55·log h_b)·log d`.
fn hata_form(ctx: &PropagationContext, city: CityKind, a: f32, b: f32) -> f32 {
    let f = ctx.frequency_mhz;
    let hb = ctx.transmitter_height.max(MIN_HEIGHT_M);
    let hm = ctx.receiver_height.max(MIN_HEIGHT_M);
    let d_km = (ctx.distance() / 1000.0).max(MIN_DISTANCE_KM);
    a + b * f.log10() - 13.82 * hb.log10() - mobile_correction_db(city, f, hm)
        + (44.9 - 6.55 * hb.log10()) * d_km.log10()
}

/// Okumura-Hata urban model (150–1500 MHz).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HataModel {
    /// Environment class.
    pub city: CityKind,
}

impl PropagationModel for HataModel {
    fn name(&self) -> &str {
        "Hata"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Hata
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        ctx.validate()?;
        Ok(hata_form(ctx, self.city, 69.55, 26.16))
    }

    fn cache_fingerprint(&self) -> u64 {
        Fnv1a::new().u32(self.city.id()).finish()
    }
}

/// COST-231 extension of Hata (1500–2000 MHz).
///
/// Adds 3 dB in metropolitan centres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cost231Model {
    /// Environment class.
    pub city: CityKind,
}

impl PropagationModel for Cost231Model {
    fn name(&self) -> &str {
        "Cost231"
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Cost231
    }

    fn path_loss_db(
        &self,
        ctx: &PropagationContext,
        _env: &EvalContext<'_>,
    ) -> Result<f32, ModelError> {
        ctx.validate()?;
        let c = match self.city {
            CityKind::SmallMedium => 0.0,
            CityKind::Metropolitan => 3.0,
        };
        Ok(hata_form(ctx, self.city, 46.3, 33.9) + c)
    }

    fn cache_fingerprint(&self) -> u64 {
        Fnv1a::new().u32(self.city.id()).finish()
    }
}
