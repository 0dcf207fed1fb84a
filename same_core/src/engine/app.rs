use super::{GenEngine, Phase, SineEngine};

/// Application-supplied sine generator. Invokes a host closure receiving
/// time and frequency; returns its value verbatim.
///
/// Unlike the C source, which threads an opaque `void *userdata` pointer
/// alongside a raw function pointer, a Rust closure already owns whatever
/// state it captures, so `AppEngine` only needs to store the closure
/// itself. The host must not re-enter [`crate::GenCtx::samples_gen`] from
/// within the callback with the same context.
#[derive(Debug, Clone, Copy)]
pub struct AppEngine<F>
where
    F: FnMut(f32, f32) -> i16,
{
    callback: F,
}

impl<F> AppEngine<F>
where
    F: FnMut(f32, f32) -> i16,
{
    pub fn new(callback: F) -> Self {
        AppEngine { callback }
    }
}

impl<F> SineEngine for AppEngine<F>
where
    F: FnMut(f32, f32) -> i16,
{
    fn sample(&mut self, _phase: Option<&mut Phase>, _sample_rate: f32, t: f32, freq: f32) -> i16 {
        (self.callback)(t, freq)
    }

    fn tag(&self) -> GenEngine {
        GenEngine::App
    }

    fn desc(&self) -> &'static str {
        "application-supplied callback"
    }
}
