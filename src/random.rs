//! Injectable uniform randomness for the generators.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A source of uniform draws in `[0, 1)`.
///
/// Every generator takes one of these explicitly. Hand each generation call
/// its own instance; sharing one stream across cities makes their output
/// depend on call order.
pub trait RandomSource {
    /// Next draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform draw in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform draw in `[-half_width, half_width)`.
    fn symmetric(&mut self, half_width: f64) -> f64 {
        self.uniform(-half_width, half_width)
    }

    /// Uniform integer in `[0, upper)`. Returns 0 when `upper` is 0.
    fn index(&mut self, upper: usize) -> usize {
        let i = (self.next_f64() * upper as f64) as usize;
        i.min(upper.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// [`StdRng`]-backed source, seeded for reproducible runs or from the OS
/// for production use.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic stream for a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Seed offsets so the four generators of one city never share a stream.
pub mod stream {
    pub const DEMAND: u64 = 1;
    pub const WEATHER: u64 = 2;
    pub const CLUSTER: u64 = 3;
    pub const FORECAST: u64 = 4;
}

/// Derives a per-city, per-generator seed from a master seed.
///
/// FNV-1a over the city id keeps the mapping stable across platforms and
/// releases, unlike `std`'s randomized hasher.
pub fn derive_seed(master: u64, city_id: &str, stream: u64) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

    let city_hash = city_id.bytes().fold(FNV_OFFSET, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    });
    master ^ city_hash.wrapping_add(stream.wrapping_mul(GOLDEN))
}

/// Rounds to `places` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Always returns the same draw. With `0.5` every symmetric noise term is
    /// zero, which makes generator output closed-form.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedSource(pub f64);

    impl RandomSource for FixedSource {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }
}
