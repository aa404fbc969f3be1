//! RNG oracle for the session's random rolls.
//!
//! All randomness in the game (damage variance, encounter checks, item
//! drops, species selection) flows through the [`RngOracle`] trait so tests
//! can substitute scripted rolls. The production implementation is a small
//! stateful PCG seeded once per session; reproducibility across runs is not
//! a requirement, only determinism under a fixed seed.

/// Source of random rolls for game mechanics.
pub trait RngOracle {
    /// Produce the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[min, max]` inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32() % span)
    }

    /// True with probability `percent / 100`.
    fn percent_roll(&mut self, percent: u8) -> bool {
        (self.next_u32() % 100) < u32::from(percent)
    }

    /// True once in `n` on average. `n == 0` never succeeds.
    fn one_in(&mut self, n: u32) -> bool {
        n != 0 && self.next_u32() % n == 0
    }

    /// Pick a uniformly random element of a non-empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u32() as usize) % items.len()]
    }
}

/// PCG-XSH-RR random number generator.
///
/// Single 64-bit LCG state with a permuted 32-bit output. Small, fast, and
/// good enough statistical quality for damage rolls.
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a generator from a seed. Equal seeds produce equal sequences.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        // Standard PCG initialization: one step, add seed, one more step.
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation: xorshift high bits, random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let prev = self.state;
        self.step();
        Self::output(prev)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RngOracle;

    /// Replays a fixed script of raw values, then repeats the last one.
    pub struct ScriptedRng {
        values: Vec<u32>,
        index: usize,
    }

    impl ScriptedRng {
        pub fn new(values: impl Into<Vec<u32>>) -> Self {
            Self {
                values: values.into(),
                index: 0,
            }
        }

        /// An oracle whose every roll is zero: minimum variance, every
        /// percent roll succeeds, every one-in-N drop succeeds.
        pub fn zeros() -> Self {
            Self::new([0])
        }
    }

    impl RngOracle for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.index.min(self.values.len() - 1)];
            self.index += 1;
            value
        }
    }
}
