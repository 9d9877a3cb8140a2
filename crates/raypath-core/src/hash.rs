//! FNV-1a hashing of configuration and position values.
//!
//! Used for cache fingerprints and for deriving per-link RNG seeds.
//! Not cryptographically secure; only deterministic and fast.

use glam::Vec3;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Incremental FNV-1a state.
///
/// Values are fed as little-endian bytes, so the hash is identical on
/// every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fnv1a(u64);

impl Fnv1a {
    /// Fresh state at the offset basis.
    pub fn new() -> Self {
        Self(FNV_OFFSET)
    }

    #[inline]
    fn bytes(mut self, bytes: &[u8]) -> Self {
        for &b in bytes {
            self.0 = (self.0 ^ b as u64).wrapping_mul(FNV_PRIME);
        }
        self
    }

    /// Feed a `u32`.
    #[inline]
    pub fn u32(self, v: u32) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    /// Feed an `i32`.
    #[inline]
    pub fn i32(self, v: i32) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    /// Feed a `u64`.
    #[inline]
    pub fn u64(self, v: u64) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    /// Feed an `f32` by its bit pattern.
    #[inline]
    pub fn f32(self, v: f32) -> Self {
        self.u32(v.to_bits())
    }

    /// Feed a position snapped to a grid of `step` meters.
    #[inline]
    pub fn vec3_quantized(self, v: Vec3, step: f32) -> Self {
        let [x, y, z] = quantize_vec3(v, step);
        self.i32(x).i32(y).i32(z)
    }

    /// Feed a `bool`.
    #[inline]
    pub fn bool(self, v: bool) -> Self {
        self.bytes(&[v as u8])
    }

    /// Final hash value.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

/// Snap `value` to the nearest multiple of `step`, as a step count.
///
/// Saturates at the `i32` range; NaN maps to 0.
pub fn quantize(value: f32, step: f32) -> i32 {
    (value / step).round() as i32
}

/// [`quantize`] applied per component.
pub fn quantize_vec3(v: Vec3, step: f32) -> [i32; 3] {
    [quantize(v.x, step), quantize(v.y, step), quantize(v.z, step)]
}
