use super::{GenEngine, Phase, SineEngine, I16_MAX_F, TWO_PI};

/// Low-order Taylor series approximation of `sin(x)`, reducing `x` into
/// `[0, pi]` and tracking sign, then evaluating
/// `x - x^3/6 + x^5/120 - x^7/5040`. No phase accumulator needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaylorEngine;

fn sin_taylor(x: f32) -> f32 {
    const PI: f32 = core::f32::consts::PI;
    const HALF_PI: f32 = PI / 2.0;

    // Reduce to [0, 2*pi).
    let mut x = x % TWO_PI;
    if x < 0.0 {
        x += TWO_PI;
    }

    // Reduce to [0, pi], tracking sign: sin(x + pi) = -sin(x).
    let (x, negate) = if x > PI { (x - PI, true) } else { (x, false) };

    // Fold [pi/2, pi] down to [0, pi/2] via sin(pi - x) = sin(x). The
    // series below is only accurate near 0; without this fold the
    // truncation error grows large as x approaches pi.
    let x = if x > HALF_PI { PI - x } else { x };

    let x2 = x * x;
    let series = x * (1.0 - x2 / 6.0 + (x2 * x2) / 120.0 - (x2 * x2 * x2) / 5040.0);

    if negate {
        -series
    } else {
        series
    }
}

impl SineEngine for TaylorEngine {
    fn sample(&mut self, _phase: Option<&mut Phase>, _sample_rate: f32, t: f32, freq: f32) -> i16 {
        (sin_taylor(TWO_PI * t * freq) * I16_MAX_F) as i16
    }

    fn tag(&self) -> GenEngine {
        GenEngine::Taylor
    }

    fn desc(&self) -> &'static str {
        "4-term Taylor series"
    }
}
