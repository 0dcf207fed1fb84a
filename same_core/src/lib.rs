//! Deterministic SAME/EAS header and attention-tone waveform generation,
//! per 47 CFR §11.31.
//!
//! A host builds a [`Header`] describing one alert, hands it to
//! [`GenCtx::new`] along with a sample rate and a [`SineEngine`]
//! implementation, and then repeatedly calls [`GenCtx::samples_gen`] until
//! [`GenCtx::is_done`] to drain `i16` PCM samples in [`sequence::CHUNK`]-size
//! chunks.
//!
//! No dynamic allocation and no `f64` are used anywhere in this crate; all
//! buffers are fixed-size arrays and all floating-point math is `f32`, so it
//! runs unmodified in `#![no_std]`-adjacent embedded contexts that still
//! have a `std::sync::OnceLock`-capable allocator-free target... in
//! practice this means hosted targets today; see `SPEC_FULL.md` for the
//! `no_std` Non-goal.

#[macro_use]
extern crate log;

mod afsk;
mod attention;
mod engine;
mod error;
mod header;
mod sequence;
mod util;

pub use afsk::{samples_per_bit, BITS_PER_CHAR, MARK_FREQ, SPACE_FREQ};
pub use attention::{AttentionCursor, FREQ_FIRST, FREQ_SECOND};
pub use engine::{AppEngine, GenEngine, LibcEngine, LutEngine, Phase, SineEngine, TaylorEngine};
pub use error::SameError;
pub use header::{
    Header, LocationCodes, ATTN_SIG_DURATION_MAX, ATTN_SIG_DURATION_MIN, EOM_BUFFER,
    HEADER_SIZE_MAX, LOCATION_CODES_NUM_MAX, LOCATION_CODE_END_MARKER, PREAMBLE_NUM,
};
pub use sequence::{attn_sig_durations, GenCtx, SeqState, CHUNK};

/// Runs the active engine's one-shot global setup ahead of time, so the
/// first call to [`GenCtx::new`] doesn't pay for it. Optional: `GenCtx::new`
/// calls this itself, idempotently.
pub fn init<E: SineEngine>() {
    E::global_init();
}
