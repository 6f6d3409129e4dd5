//! RNG module - injectable randomness for generation, refill and shuffling
//!
//! Every random decision in the engine goes through [`RandomSource`], so a
//! seeded source reproduces boards, refills and shuffles exactly.
//!
//! Also provides a simple LCG for deterministic play and testing.

/// Source of randomness consumed by the engine.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max). `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// One LCG step, returning the high 16 bits of the new state
    fn next_half(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG have short periods; use the high half.
        self.state >> 16
    }

    /// Current state (seeding a new `SimpleRng` with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    /// Full 32 bits, built from the high halves of two LCG steps.
    fn next_u32(&mut self) -> u32 {
        let hi = self.next_half();
        let lo = self.next_half();
        (hi << 16) | lo
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
