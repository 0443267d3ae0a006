
use crate::settings::DEFAULT_RAM_SEED;

/// xorshift32. Stands in for the garbage real SRAM powers up with, so it
/// only has to be cheap and repeatable for a given seed.
pub struct Random {
    state: u32,
}

impl Random {
    pub fn new(seed: u32) -> Self {
        // xorshift never leaves zero
        let state = if seed == 0 { DEFAULT_RAM_SEED } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    pub fn fill(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = (self.next_u32() >> 24) as u8;
        }
    }
}
