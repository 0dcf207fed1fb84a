use super::{GenEngine, Phase, SineEngine, I16_MAX_F, TWO_PI};

/// Directly computes `sin(2*pi*t*freq)` in single precision via the
/// platform's libm. Reference accuracy; no phase accumulator needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibcEngine;

impl SineEngine for LibcEngine {
    fn sample(&mut self, _phase: Option<&mut Phase>, _sample_rate: f32, t: f32, freq: f32) -> i16 {
        (libm_sinf(TWO_PI * t * freq) * I16_MAX_F) as i16
    }

    fn tag(&self) -> GenEngine {
        GenEngine::Libc
    }

    fn desc(&self) -> &'static str {
        "libc (f32::sin)"
    }
}

/// Thin wrapper so the rest of the engine only ever spells `f32::sin`
/// in one place.
#[inline(always)]
fn libm_sinf(x: f32) -> f32 {
    x.sin()
}
