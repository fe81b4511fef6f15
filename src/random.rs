//! Uniform randomness for particle spawning and per-frame jitter
//!
//! The renderer samples from `Math.random` via js-sys. The simulation core
//! only sees the trait, so native tests can drive it with the seeded [`Lcg`]
//! instead.

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn sample(&mut self) -> f64;

    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.sample()
    }
}

/// `Math.random`, the browser's PRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn sample(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Small linear congruential generator, seedable and deterministic.
#[derive(Clone, Copy, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for Lcg {
    fn sample(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Drop the low bits; they have short periods in an LCG.
        f64::from(self.state >> 8) / f64::from((u32::MAX >> 8) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_is_deterministic() {
        let mut a = Lcg::new(0x5EED_5EED);
        let mut b = Lcg::new(0x5EED_5EED);
        for _ in 0..100 {
            assert_eq!(a.sample().to_bits(), b.sample().to_bits());
        }
    }

    #[test]
    fn lcg_stays_in_unit_interval() {
        let mut rng = Lcg::new(7);
        for _ in 0..10_000 {
            let v = rng.sample();
            assert!((0.0..1.0).contains(&v), "sample out of range: {v}");
        }
    }

    #[test]
    fn range_respects_bounds() {
        let mut rng = Lcg::new(42);
        for _ in 0..1_000 {
            let v = rng.range(20.0, 100.0);
            assert!((20.0..100.0).contains(&v));
        }
    }
}
