//! Randomness for the idle chatter roll.
//!
//! With the `rng` feature this pulls bytes from the browser's crypto RNG via
//! `getrandom`; without it (or if that call fails) a `performance.now()`
//! LCG is good enough for a cosmetic coin flip.

use web_sys::window;

/// Uniform value in [0, 1).
pub fn unit() -> f64 {
    (next_u32() >> 8) as f64 / (1u32 << 24) as f64
}

/// Index in `0..len`; 0 when `len` is 0.
pub fn index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    next_u32() as usize % len
}

#[cfg(feature = "rng")]
fn next_u32() -> u32 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(_) => clock_lcg(),
    }
}

#[cfg(not(feature = "rng"))]
fn next_u32() -> u32 {
    clock_lcg()
}

fn clock_lcg() -> u32 {
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    // Microsecond clock through a linear congruential step (not crypto secure)
    ((now * 1_000.0) as u64 as u32)
        .wrapping_mul(1_664_525)
        .wrapping_add(1_013_904_223)
}
