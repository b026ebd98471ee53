//! Unbiased integer sampling for slice selection.
//!
//! Draws come from the operating system (in the browser: `crypto.getRandomValues`
//! through `getrandom`). If that source ever fails the sampler switches for good
//! to a seeded `SmallRng`; selection stays uniform, only the quality of the
//! underlying bits degrades.

use log::warn;
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};

const SPACE: u64 = 1 << 32;

enum Source {
    Secure(OsRng),
    Fallback(SmallRng),
    Injected(Box<dyn RngCore>),
}

pub struct FairRng {
    source: Source,
    fallback_seed: u64,
}

impl FairRng {
    /// Prefers the cryptographic source; `fallback_seed` is only used if it
    /// is unavailable.
    pub fn new(fallback_seed: u64) -> Self {
        let mut buf = [0u8; 4];
        let source = match OsRng.try_fill_bytes(&mut buf) {
            Ok(()) => Source::Secure(OsRng),
            Err(e) => {
                warn!("secure random source unavailable ({e}), using fallback generator");
                Source::Fallback(SmallRng::seed_from_u64(fallback_seed))
            }
        };
        Self { source, fallback_seed }
    }

    /// Non-cryptographic sampler, same rejection scheme.
    pub fn fallback(seed: u64) -> Self {
        Self {
            source: Source::Fallback(SmallRng::seed_from_u64(seed)),
            fallback_seed: seed,
        }
    }

    /// Samples from a caller-supplied generator, e.g. a seeded `StdRng` in tests.
    pub fn from_rng<R: RngCore + 'static>(rng: R) -> Self {
        Self {
            source: Source::Injected(Box::new(rng)),
            fallback_seed: 0,
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        match &mut self.source {
            Source::Secure(os) => {
                let mut buf = [0u8; 4];
                match os.try_fill_bytes(&mut buf) {
                    Ok(()) => u32::from_le_bytes(buf),
                    Err(e) => {
                        warn!("secure random source failed ({e}), degrading to fallback generator");
                        let mut fallback = SmallRng::seed_from_u64(self.fallback_seed);
                        let draw = fallback.next_u32();
                        self.source = Source::Fallback(fallback);
                        draw
                    }
                }
            }
            Source::Fallback(rng) => rng.next_u32(),
            Source::Injected(rng) => rng.next_u32(),
        }
    }

    /// Uniform integer in `[0, n)`. Returns 0 for `n == 0`; callers check for
    /// an empty candidate set before sampling.
    pub fn uniform_int(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let n = u64::try_from(n).unwrap_or(u64::MAX).min(SPACE);
        let limit = (SPACE / n) * n;
        loop {
            let draw = self.next_u32() as u64;
            if draw < limit {
                return (draw % n) as usize;
            }
        }
    }

    /// Uniform integer in `[low, low + span)`, saturating at `u32::MAX`.
    pub fn offset_int(&mut self, low: u32, span: u32) -> u32 {
        low.saturating_add(self.uniform_int(span as usize) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    /// Replays fixed u32 draws, then repeats the last one.
    struct Scripted {
        draws: Vec<u32>,
        pos: usize,
    }

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            let v = self.draws[self.pos.min(self.draws.len() - 1)];
            self.pos += 1;
            v
        }
        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn zero_bound_returns_zero() {
        let mut rng = FairRng::from_rng(StdRng::seed_from_u64(1));
        assert_eq!(rng.uniform_int(0), 0);
    }

    #[test]
    fn values_stay_in_range() {
        let mut rng = FairRng::from_rng(StdRng::seed_from_u64(2));
        for n in 1..=40 {
            for _ in 0..200 {
                assert!(rng.uniform_int(n) < n);
            }
        }
    }

    #[test]
    fn draws_in_biased_tail_are_rejected() {
        // For n = 3 the limit is 4294967295; u32::MAX is exactly the limit and
        // must be redrawn, 7 then maps to 7 % 3.
        let mut rng = FairRng::from_rng(Scripted { draws: vec![u32::MAX, 7], pos: 0 });
        assert_eq!(rng.uniform_int(3), 1);
    }

    #[test]
    fn frequencies_are_roughly_uniform() {
        let mut rng = FairRng::from_rng(StdRng::seed_from_u64(0x5eed));
        for n in [2usize, 5, 11, 12] {
            let trials = 24_000;
            let mut counts = vec![0u32; n];
            for _ in 0..trials {
                counts[rng.uniform_int(n)] += 1;
            }
            let expected = trials as f64 / n as f64;
            for (value, &count) in counts.iter().enumerate() {
                let deviation = (count as f64 - expected).abs() / expected;
                assert!(deviation < 0.1, "n={n} value={value} count={count}");
            }
        }
    }

    #[test]
    fn fallback_is_deterministic_per_seed() {
        let mut a = FairRng::fallback(99);
        let mut b = FairRng::fallback(99);
        let xs: Vec<usize> = (0..16).map(|_| a.uniform_int(12)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.uniform_int(12)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn offset_int_saturates_near_max() {
        let mut rng = FairRng::from_rng(StdRng::seed_from_u64(6));
        for _ in 0..100 {
            assert!(rng.offset_int(u32::MAX - 3, 1000) >= u32::MAX - 3);
        }
        assert_eq!(rng.offset_int(u32::MAX, 0), u32::MAX);
    }

    #[test]
    fn offset_int_spans_range() {
        let mut rng = FairRng::from_rng(StdRng::seed_from_u64(4));
        for _ in 0..100 {
            let v = rng.offset_int(5, 4);
            assert!((5..9).contains(&v));
        }
    }
}
