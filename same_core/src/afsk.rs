//! Audio Frequency Shift Keying modulator: converts a byte buffer into
//! samples by shifting between mark/space tones at 520.83 bit/s.

use crate::engine::{Phase, SineEngine};
use crate::util::{round_div_u32, test_bit};

/// Mark (1-bit) frequency, Hz.
pub const MARK_FREQ: f32 = 2083.3;
/// Space (0-bit) frequency, Hz.
pub const SPACE_FREQ: f32 = 1562.5;
/// Bits transmitted per character, LSB first.
pub const BITS_PER_CHAR: u32 = 8;

/// Bit rate scaled by 100 to keep `samples_per_bit` integer-only
/// (520.83 bit/s).
const BIT_RATE_X100: u32 = 52083;

/// `round(sample_rate / 520.83)`, rounded half-up, never truncated.
///
/// Returns `0` if `sample_rate` is too low to produce even one sample per
/// bit; callers (`GenCtx::new`) treat that as [`crate::SameError::SampleRateTooLow`].
pub fn samples_per_bit(sample_rate: u32) -> u32 {
    round_div_u32(sample_rate * 100, BIT_RATE_X100)
}

/// Tracks progress through a byte buffer being AFSK-modulated.
#[derive(Debug, Clone, Copy, Default)]
pub struct AfskCursor {
    byte_index: usize,
    bit_index: u8,
    sample_in_bit: u32,
    phase: Phase,
}

impl AfskCursor {
    pub const fn new() -> Self {
        AfskCursor {
            byte_index: 0,
            bit_index: 0,
            sample_in_bit: 0,
            phase: Phase::zero(),
        }
    }

    /// Writes one AFSK sample for `data` at the cursor's current position
    /// and advances it. When the cursor runs past the end of `data`, it is
    /// reset to zero so the next burst of the same payload starts clean at
    /// bit 0 of byte 0.
    pub fn step<E: SineEngine>(
        &mut self,
        engine: &mut E,
        data: &[u8],
        sample_rate: u32,
        samples_per_bit: u32,
    ) -> i16 {
        debug_assert!(!data.is_empty());
        debug_assert!(self.byte_index < data.len());

        let bit = test_bit(data[self.byte_index], self.bit_index);
        let freq = if bit { MARK_FREQ } else { SPACE_FREQ };
        let t = self.sample_in_bit as f32 / sample_rate as f32;

        let sample = engine.sample(Some(&mut self.phase), sample_rate as f32, t, freq);

        self.sample_in_bit += 1;
        if self.sample_in_bit >= samples_per_bit {
            self.sample_in_bit = 0;
            self.bit_index += 1;

            if self.bit_index as u32 >= BITS_PER_CHAR {
                self.bit_index = 0;
                self.byte_index += 1;

                if self.byte_index >= data.len() {
                    *self = AfskCursor::new();
                }
            }
        }

        sample
    }
}
