//! Closed-form path-loss kernels.
//!
//! Pure functions with no scene access. Every logarithm is guarded so
//! degenerate inputs yield large finite losses instead of NaN or −∞.

use std::f32::consts::{FRAC_PI_2, PI};

/// Floor applied to log arguments.
pub const KERNEL_EPSILON: f32 = 1e-6;

/// Knife-edge losses are zero at or below this Fresnel parameter.
pub const KNIFE_EDGE_THRESHOLD: f32 = -0.78;

/// Friis free-space path loss, dB.
///
/// `32.44 + 20·log10(d_km) + 20·log10(f_MHz)`, with distance and
/// frequency clamped to [`KERNEL_EPSILON`].
pub fn free_space_path_loss_db(distance_m: f32, frequency_mhz: f32) -> f32 {
    let d_km = (distance_m / 1000.0).max(KERNEL_EPSILON);
    let f = frequency_mhz.max(KERNEL_EPSILON);
    32.44 + 20.0 * d_km.log10() + 20.0 * f.log10()
}

/// Fresnel–Kirchhoff diffraction parameter `v`.
///
/// `h` is the signed clearance of the edge above the direct path,
/// `d1`/`d2` the distances from each end to the edge.
pub fn fresnel_parameter(h: f32, d1: f32, d2: f32, wavelength_m: f32) -> f32 {
    let d1 = d1.max(KERNEL_EPSILON);
    let d2 = d2.max(KERNEL_EPSILON);
    let lambda = wavelength_m.max(KERNEL_EPSILON);
    h * ((2.0 / lambda) * ((d1 + d2) / (d1 * d2))).sqrt()
}

/// Single knife-edge diffraction loss for Fresnel parameter `v`, dB.
pub fn knife_edge_loss_db(v: f32) -> f32 {
    if v <= KNIFE_EDGE_THRESHOLD {
        return 0.0;
    }
    let x = v - 0.1;
    let arg = ((x * x + 1.0).sqrt() + x).max(KERNEL_EPSILON);
    6.9 + 20.0 * arg.log10()
}

/// Loss of one specular bounce with coefficient magnitude `gamma`, dB.
///
/// `gamma` is clamped to `[0.01, 0.99]`, bounding the loss to
/// roughly `[0.09, 40]` dB.
pub fn reflection_loss_db(gamma: f32) -> f32 {
    -20.0 * gamma.clamp(0.01, 0.99).log10()
}

/// Phase added by a bounce: `π/2` for a lossy surface rising to `π`
/// for a perfect conductor.
pub fn reflection_phase_rad(gamma: f32) -> f32 {
    FRAC_PI_2 + (PI - FRAC_PI_2) * gamma.clamp(0.0, 1.0)
}

/// Rayleigh-roughness attenuated specular reflectivity.
///
/// `ρ_rough = ρ · exp(−2·(k₀·σ_h·sin ψ)²)` where `sin ψ` of the grazing
/// angle equals the incidence cosine against the normal.
pub fn rough_reflectivity(gamma: f32, wavelength_m: f32, sigma_h_m: f32, cos_incidence: f32) -> f32 {
    let k0 = 2.0 * PI / wavelength_m.max(KERNEL_EPSILON);
    let g = k0 * sigma_h_m * cos_incidence.clamp(0.0, 1.0);
    gamma * (-2.0 * g * g).exp()
}

/// Diffuse scattering magnitude `S·(1 − ρ²)·cos_i·cos_s^m`.
pub fn diffuse_magnitude(albedo: f32, rho_rough: f32, cos_i: f32, cos_s: f32, lobe_exponent: u32) -> f32 {
    let rho = rho_rough.clamp(0.0, 1.0);
    let m = i32::try_from(lobe_exponent).unwrap_or(i32::MAX);
    albedo.clamp(0.0, 1.0)
        * (1.0 - rho * rho)
        * cos_i.clamp(0.0, 1.0)
        * cos_s.clamp(0.0, 1.0).powi(m)
}

/// Scattering loss on top of free-space spreading,
/// `−10·log10(max(diffuse_magnitude, ε))`, dB.
///
/// A single floor bounds the result at `−10·log10(ε)` however small the
/// material and lobe factors get.
pub fn scatter_loss_db(albedo: f32, rho_rough: f32, cos_i: f32, cos_s: f32, lobe_exponent: u32) -> f32 {
    let magnitude = diffuse_magnitude(albedo, rho_rough, cos_i, cos_s, lobe_exponent);
    -10.0 * magnitude.max(KERNEL_EPSILON).log10()
}
