//! Deterministic random stream for the simulation.
//!
//! A 32-bit counter advanced by a fixed odd increment, followed by two
//! xor-shift/multiply rounds. Same seed, same sequence. Not suitable for
//! anything security related.

use rand::{RngCore, SeedableRng};

const INCREMENT: u32 = 0x6D2B_79F5;
const UNIT_SCALE: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns a value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.advance()) / UNIT_SCALE
    }

    fn advance(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let value = self.state;
        let mut t = (value ^ (value >> 15)).wrapping_mul(value | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.advance());
        let high = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
