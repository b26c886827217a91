//! MT19937 Mersenne Twister.
//!
//! The state is seeded with Knuth's multiplicative recurrence
//! (`x[i] = 69069 * x[i-1]`), so a given 32-bit seed reproduces the same
//! stream of draws on every platform. Every sampling run owns exactly one
//! generator; nothing here is global.

use rand::Rng;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

const TEMPERING_MASK_B: u32 = 0x9d2c_5680;
const TEMPERING_MASK_C: u32 = 0xefc6_0000;

/// Seed used when a draw happens before [`MersenneTwister::seed`].
pub const DEFAULT_SEED: u32 = 4357;

#[derive(Clone)]
pub struct MersenneTwister {
    state: [u32; N],
    index: usize,
    seed: Option<u32>,
}

impl std::fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwister")
            .field("seed", &self.seed)
            .field("index", &self.index)
            .finish()
    }
}

impl Default for MersenneTwister {
    fn default() -> Self {
        Self::new()
    }
}

impl MersenneTwister {
    /// Unseeded generator; the first draw seeds it with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self {
            state: [0; N],
            index: N + 1,
            seed: None,
        }
    }

    pub fn with_seed(seed: u32) -> Self {
        let mut rng = Self::new();
        rng.seed(seed);
        rng
    }

    /// Seeds from the thread RNG. Zero is excluded because it collapses the
    /// whole state vector to zeros.
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen_range(1..=u32::MAX);
        Self::with_seed(seed)
    }

    /// Reinitialises the full state; any previous draws are forgotten.
    pub fn seed(&mut self, seed: u32) {
        self.state[0] = seed;
        for i in 1..N {
            self.state[i] = self.state[i - 1].wrapping_mul(69069);
        }
        self.index = N;
        self.seed = Some(seed);
    }

    /// The seed currently in effect, if the generator has been seeded.
    pub fn seed_value(&self) -> Option<u32> {
        self.seed
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            if self.index == N + 1 {
                self.seed(DEFAULT_SEED);
            }
            self.twist();
        }

        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & TEMPERING_MASK_B;
        y ^= (y << 15) & TEMPERING_MASK_C;
        y ^= y >> 18;
        y
    }

    /// Uniform on the closed interval `[0, 1]`: `u32::MAX` maps to exactly
    /// `1.0`. Callers comparing against a probability must use `p > u`.
    pub fn next_unit_double(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    /// `floor(u * bound)` clamped into `0..bound`. `bound` must be nonzero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let idx = (self.next_unit_double() * bound as f64) as usize;
        idx.min(bound - 1)
    }

    // 一次性生成 N 个字
    fn twist(&mut self) {
        let mag01 = |y: u32| if y & 1 == 0 { 0 } else { MATRIX_A };

        for kk in 0..N - M {
            let y = (self.state[kk] & UPPER_MASK) | (self.state[kk + 1] & LOWER_MASK);
            self.state[kk] = self.state[kk + M] ^ (y >> 1) ^ mag01(y);
        }
        for kk in N - M..N - 1 {
            let y = (self.state[kk] & UPPER_MASK) | (self.state[kk + 1] & LOWER_MASK);
            self.state[kk] = self.state[kk + M - N] ^ (y >> 1) ^ mag01(y);
        }
        let y = (self.state[N - 1] & UPPER_MASK) | (self.state[0] & LOWER_MASK);
        self.state[N - 1] = self.state[M - 1] ^ (y >> 1) ^ mag01(y);

        self.index = 0;
    }
}
