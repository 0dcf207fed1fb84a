//! Pluggable sine backends. See spec.md §4.1 and §9 for the rationale
//! behind offering four interchangeable strategies as a generic type
//! parameter rather than a runtime trait object: the compile-time form
//! costs nothing per sample and matches the source's `#ifdef`-selected
//! engine.

mod app;
mod libc;
mod lut;
mod taylor;

pub use app::AppEngine;
pub use libc::LibcEngine;
pub use lut::LutEngine;
pub use taylor::TaylorEngine;

/// Tag identifying the active sine backend, returned by
/// [`crate::GenCtx::engine_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenEngine {
    Libc,
    Lut,
    Taylor,
    App,
}

/// A single per-waveform phase accumulator, used only by [`LutEngine`].
/// AFSK, the attention signal's 853 Hz component, and its 960 Hz
/// component each need an independent accumulator so the three
/// simultaneous/sequential waveforms never share state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phase(pub(crate) f32);

impl Phase {
    pub const fn zero() -> Self {
        Phase(0.0)
    }
}

/// Contract: given an optional phase accumulator, the context's sample
/// rate, a time `t` in seconds, and a frequency `freq` in Hz, produce one
/// signed 16-bit sample approximating `round(sin(2*pi*t*freq) * 32767)`.
///
/// Implementations that don't need a phase accumulator (`LibcEngine`,
/// `TaylorEngine`, `AppEngine`) ignore the `phase` and `sample_rate`
/// arguments.
pub trait SineEngine {
    fn sample(&mut self, phase: Option<&mut Phase>, sample_rate: f32, t: f32, freq: f32) -> i16;

    /// One-shot, idempotent, process-wide setup. Only [`LutEngine`]
    /// does anything here; the default is a no-op.
    fn global_init() {}

    fn tag(&self) -> GenEngine;

    fn desc(&self) -> &'static str;
}

pub(crate) const I16_MAX_F: f32 = i16::MAX as f32;
pub(crate) const TWO_PI: f32 = core::f32::consts::PI * 2.0;
