//! Summing path contributions into one loss.

use std::f64::consts::TAU;

use num_complex::Complex64;
use raypath_core::PathContribution;

use super::config::CombineMode;

/// Combine `paths` into a single one-way loss, dB.
///
/// Powers are accumulated in f64. An empty path set, or a sum that
/// cancels to zero, yields `blocked_loss_db`; the result never exceeds
/// it.
pub fn combine(
    paths: &[PathContribution],
    mode: CombineMode,
    wavelength_m: f32,
    blocked_loss_db: f32,
) -> f32 {
    if paths.is_empty() {
        return blocked_loss_db;
    }
    let power = match mode {
        CombineMode::Incoherent => paths.iter().map(PathContribution::power_fraction).sum(),
        CombineMode::Coherent => coherent_power(paths, wavelength_m),
    };
    if !(power.is_finite() && power > 0.0) {
        return blocked_loss_db;
    }
    let loss = (-10.0 * power.log10()) as f32;
    loss.min(blocked_loss_db)
}

/// `|Σ sqrt(p_i)·e^{i(2π·d_i/λ + φ_i)}|²`.
fn coherent_power(paths: &[PathContribution], wavelength_m: f32) -> f64 {
    let lambda = f64::from(wavelength_m).max(f64::EPSILON);
    let sum: Complex64 = paths
        .iter()
        .map(|p| {
            let phase = TAU * f64::from(p.distance_m) / lambda + f64::from(p.extra_phase_rad);
            Complex64::from_polar(p.power_fraction().sqrt(), phase)
        })
        .sum();
    sum.norm_sqr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use raypath_core::PathMechanism;

    fn path(loss_db: f32, distance_m: f32, phase: f32) -> PathContribution {
        PathContribution {
            mechanism: PathMechanism::Reflection,
            loss_db,
            distance_m,
            extra_phase_rad: phase,
        }
    }

    #[test]
    fn no_paths_is_blocked() {
        assert_eq!(combine(&[], CombineMode::Incoherent, 0.125, 200.0), 200.0);
        assert_eq!(combine(&[], CombineMode::Coherent, 0.125, 200.0), 200.0);
    }

    #[test]
    fn single_path_passes_through() {
        let p = [PathContribution::direct(80.0, 100.0)];
        assert!((combine(&p, CombineMode::Incoherent, 0.125, 200.0) - 80.0).abs() < 1e-4);
        assert!((combine(&p, CombineMode::Coherent, 0.125, 200.0) - 80.0).abs() < 1e-4);
    }

    #[test]
    fn two_equal_paths_gain_three_db() {
        let p = [path(90.0, 100.0, 0.0), path(90.0, 120.0, 1.0)];
        let loss = combine(&p, CombineMode::Incoherent, 0.125, 200.0);
        assert!((loss - (90.0 - 10.0 * 2f32.log10())).abs() < 1e-3);
    }

    #[test]
    fn coherent_in_phase_gains_six_db() {
        // Same length, same phase: amplitudes add.
        let p = [path(90.0, 100.0, 0.0), path(90.0, 100.0, 0.0)];
        let loss = combine(&p, CombineMode::Coherent, 0.125, 200.0);
        assert!((loss - (90.0 - 20.0 * 2f32.log10())).abs() < 1e-3);
    }

    #[test]
    fn coherent_cancellation_hits_the_cap() {
        let p = [
            path(90.0, 100.0, 0.0),
            path(90.0, 100.0, std::f32::consts::PI),
        ];
        assert_eq!(combine(&p, CombineMode::Coherent, 0.125, 200.0), 200.0);
    }

    #[test]
    fn result_never_exceeds_blocked_loss() {
        let p = [path(250.0, 100.0, 0.0)];
        assert_eq!(combine(&p, CombineMode::Incoherent, 0.125, 200.0), 200.0);
    }
}
