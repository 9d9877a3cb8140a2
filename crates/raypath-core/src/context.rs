//! The per-query [`PropagationContext`] and the [`ModelKind`] selector.

use std::fmt;

use glam::Vec3;

use crate::error::ContextError;
use crate::id::LayerMask;

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Minimum TX–RX separation a context may describe, in meters.
pub const MIN_DISTANCE: f32 = 0.1;

/// Lowest accepted transmitter power, in dBm.
pub const MIN_TX_POWER_DBM: f32 = -50.0;

/// Highest accepted transmitter power, in dBm.
pub const MAX_TX_POWER_DBM: f32 = 100.0;

/// Selects the propagation model that evaluates a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    /// Friis free-space spreading.
    FreeSpace,
    /// Log-distance with a configurable exponent.
    LogDistance,
    /// Log-distance plus a seeded log-normal shadowing term.
    LogNormalShadowing,
    /// Okumura-Hata, small/medium city.
    Hata,
    /// COST-231 extension of Hata.
    Cost231,
    /// Two-ray ground reflection.
    TwoRayGround,
    /// Geometric ray tracing against the obstacle scene.
    RayTracing,
}

impl ModelKind {
    /// Every model kind, in declaration order.
    pub const ALL: [ModelKind; 7] = [
        ModelKind::FreeSpace,
        ModelKind::LogDistance,
        ModelKind::LogNormalShadowing,
        ModelKind::Hata,
        ModelKind::Cost231,
        ModelKind::TwoRayGround,
        ModelKind::RayTracing,
    ];

    /// Stable numeric id, used in cache fingerprints.
    pub fn id(self) -> u8 {
        match self {
            Self::FreeSpace => 0,
            Self::LogDistance => 1,
            Self::LogNormalShadowing => 2,
            Self::Hata => 3,
            Self::Cost231 => 4,
            Self::TwoRayGround => 5,
            Self::RayTracing => 6,
        }
    }

    /// Human-readable model name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FreeSpace => "free-space",
            Self::LogDistance => "log-distance",
            Self::LogNormalShadowing => "log-normal-shadowing",
            Self::Hata => "hata",
            Self::Cost231 => "cost231",
            Self::TwoRayGround => "two-ray-ground",
            Self::RayTracing => "ray-tracing",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One transmitter/receiver pair plus the scenario parameters needed to
/// estimate the link.
///
/// Constructed fresh per query and treated as read-only by every model.
/// Derived queries (e.g. evaluating at a reference distance) go through
/// the `with_*` methods, which return a modified copy.
#[derive(Clone, Debug, PartialEq)]
pub struct PropagationContext {
    /// Transmitter position, meters, world frame (Y up).
    pub transmitter_position: Vec3,
    /// Receiver position, meters, world frame (Y up).
    pub receiver_position: Vec3,
    /// Conducted transmitter power, dBm.
    pub transmitter_power_dbm: f32,
    /// Transmit antenna gain, dBi.
    pub antenna_gain_dbi: f32,
    /// Receive antenna gain, dBi.
    pub receiver_gain_dbi: f32,
    /// Carrier frequency, MHz. Must be positive.
    pub frequency_mhz: f32,
    /// Transmitter antenna height above ground, meters.
    pub transmitter_height: f32,
    /// Receiver antenna height above ground, meters.
    pub receiver_height: f32,
    /// Model that should evaluate this context.
    pub model: ModelKind,
    /// Geometry layers used for occlusion; `None` selects every layer.
    pub obstacle_layers: Option<LayerMask>,
    /// Caller-supplied line-of-sight hint. Advisory only.
    pub is_line_of_sight: bool,
}

impl PropagationContext {
    /// Create a context with 20 dBm transmit power, isotropic antennas,
    /// and antenna heights taken from the positions' Y coordinates.
    pub fn new(transmitter: Vec3, receiver: Vec3, frequency_mhz: f32, model: ModelKind) -> Self {
        Self {
            transmitter_position: transmitter,
            receiver_position: receiver,
            transmitter_power_dbm: 20.0,
            antenna_gain_dbi: 0.0,
            receiver_gain_dbi: 0.0,
            frequency_mhz,
            transmitter_height: transmitter.y,
            receiver_height: receiver.y,
            model,
            obstacle_layers: None,
            is_line_of_sight: false,
        }
    }

    /// Copy with a different receiver position.
    pub fn with_receiver_position(&self, receiver: Vec3) -> Self {
        Self {
            receiver_position: receiver,
            ..self.clone()
        }
    }

    /// Copy with a different transmitter position.
    pub fn with_transmitter_position(&self, transmitter: Vec3) -> Self {
        Self {
            transmitter_position: transmitter,
            ..self.clone()
        }
    }

    /// Copy with a different transmitter power.
    pub fn with_transmitter_power_dbm(&self, power_dbm: f32) -> Self {
        Self {
            transmitter_power_dbm: power_dbm,
            ..self.clone()
        }
    }

    /// Copy with different antenna gains.
    pub fn with_gains(&self, antenna_gain_dbi: f32, receiver_gain_dbi: f32) -> Self {
        Self {
            antenna_gain_dbi,
            receiver_gain_dbi,
            ..self.clone()
        }
    }

    /// Copy with explicit antenna heights.
    pub fn with_heights(&self, transmitter_height: f32, receiver_height: f32) -> Self {
        Self {
            transmitter_height,
            receiver_height,
            ..self.clone()
        }
    }

    /// Copy targeting a different model.
    pub fn with_model(&self, model: ModelKind) -> Self {
        Self {
            model,
            ..self.clone()
        }
    }

    /// Copy with an explicit occlusion layer selection.
    pub fn with_layers(&self, layers: LayerMask) -> Self {
        Self {
            obstacle_layers: Some(layers),
            ..self.clone()
        }
    }

    /// Copy with a different line-of-sight hint.
    pub fn with_line_of_sight(&self, is_line_of_sight: bool) -> Self {
        Self {
            is_line_of_sight,
            ..self.clone()
        }
    }

    /// The reverse link: transmitter and receiver exchange positions,
    /// heights and antenna gains.
    pub fn swapped(&self) -> Self {
        Self {
            transmitter_position: self.receiver_position,
            receiver_position: self.transmitter_position,
            antenna_gain_dbi: self.receiver_gain_dbi,
            receiver_gain_dbi: self.antenna_gain_dbi,
            transmitter_height: self.receiver_height,
            receiver_height: self.transmitter_height,
            ..self.clone()
        }
    }

    /// Euclidean TX–RX distance, meters.
    pub fn distance(&self) -> f32 {
        self.transmitter_position.distance(self.receiver_position)
    }

    /// Carrier wavelength, meters.
    pub fn wavelength_m(&self) -> f32 {
        (SPEED_OF_LIGHT / (f64::from(self.frequency_mhz) * 1e6)) as f32
    }

    /// Effective layer selection, defaulting to every layer.
    pub fn layers(&self) -> LayerMask {
        self.obstacle_layers.unwrap_or_default()
    }

    /// Effective isotropic radiated power, dBm.
    pub fn eirp_dbm(&self) -> f32 {
        self.transmitter_power_dbm + self.antenna_gain_dbi
    }

    /// Received power for a given one-way path loss, dBm.
    pub fn received_power_dbm(&self, path_loss_db: f32) -> f32 {
        self.eirp_dbm() + self.receiver_gain_dbi - path_loss_db
    }

    /// Path loss implied by a received power, dB.
    pub fn path_loss_from_received(&self, received_dbm: f32) -> f32 {
        self.eirp_dbm() + self.receiver_gain_dbi - received_dbm
    }

    /// Check the context invariants.
    ///
    /// # Errors
    ///
    /// - [`ContextError::NonFinite`] if any numeric field is NaN or infinite.
    /// - [`ContextError::DistanceTooShort`] if TX and RX are closer than
    ///   [`MIN_DISTANCE`].
    /// - [`ContextError::NonPositiveFrequency`] if `frequency_mhz <= 0`.
    /// - [`ContextError::PowerOutOfRange`] if the transmit power lies
    ///   outside `[MIN_TX_POWER_DBM, MAX_TX_POWER_DBM]`.
    pub fn validate(&self) -> Result<(), ContextError> {
        let vectors = [
            ("transmitter_position", self.transmitter_position),
            ("receiver_position", self.receiver_position),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                return Err(ContextError::NonFinite { field });
            }
        }
        let scalars = [
            ("transmitter_power_dbm", self.transmitter_power_dbm),
            ("antenna_gain_dbi", self.antenna_gain_dbi),
            ("receiver_gain_dbi", self.receiver_gain_dbi),
            ("frequency_mhz", self.frequency_mhz),
            ("transmitter_height", self.transmitter_height),
            ("receiver_height", self.receiver_height),
        ];
        for (field, v) in scalars {
            if !v.is_finite() {
                return Err(ContextError::NonFinite { field });
            }
        }

        let distance = self.distance();
        if distance < MIN_DISTANCE {
            return Err(ContextError::DistanceTooShort { distance });
        }
        if self.frequency_mhz <= 0.0 {
            return Err(ContextError::NonPositiveFrequency {
                frequency_mhz: self.frequency_mhz,
            });
        }
        if !(MIN_TX_POWER_DBM..=MAX_TX_POWER_DBM).contains(&self.transmitter_power_dbm) {
            return Err(ContextError::PowerOutOfRange {
                power_dbm: self.transmitter_power_dbm,
            });
        }
        Ok(())
    }

    /// Whether [`validate`](Self::validate) succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
