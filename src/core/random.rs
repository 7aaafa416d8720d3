//! Seedable random source owned by the engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the engine RNG. `None` picks a fresh seed from the host.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(entropy_seed))
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}

/// Uniform sample in `[-half, half]`.
#[inline]
pub fn centered<R: Rng>(rng: &mut R, half: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half
}
