use std::sync::OnceLock;

use super::{GenEngine, Phase, SineEngine, I16_MAX_F, TWO_PI};

/// Lookup-table size: one full sine cycle, matching the source's
/// documented `LIBSAME_CONFIG_SINE_LUT_SIZE` default of 1024.
pub const LUT_SIZE: usize = 1024;

static TABLE: OnceLock<[i16; LUT_SIZE]> = OnceLock::new();

fn build_table() -> [i16; LUT_SIZE] {
    let mut table = [0i16; LUT_SIZE];
    for (i, slot) in table.iter_mut().enumerate() {
        let t = i as f32 / LUT_SIZE as f32;
        *slot = (f32::sin(TWO_PI * t) * I16_MAX_F) as i16;
    }
    table
}

/// Lookup-table sine backend with a linear phase accumulator.
///
/// The table itself is a process-wide, write-once singleton shared by
/// every `LutEngine` instance regardless of sample rate — only the phase
/// accumulators are per-waveform. This matches spec.md §5: "one
/// process-wide read-only sine table populated by a one-shot `init` call;
/// after initialization it is immutable and may be read concurrently by
/// any number of contexts from any thread."
#[derive(Debug, Default, Clone, Copy)]
pub struct LutEngine;

impl LutEngine {
    /// Populates the global table if it hasn't been already. Idempotent.
    fn ensure_table(&self) -> &'static [i16; LUT_SIZE] {
        TABLE.get_or_init(build_table)
    }
}

impl SineEngine for LutEngine {
    fn sample(&mut self, phase: Option<&mut Phase>, sample_rate: f32, _t: f32, freq: f32) -> i16 {
        let table = self.ensure_table();
        let phase = phase.expect("LutEngine requires a phase accumulator");

        let index = phase.0 as usize % LUT_SIZE;
        let sample = table[index];

        let delta = (freq * LUT_SIZE as f32) / sample_rate;
        phase.0 += delta;
        while phase.0 >= LUT_SIZE as f32 {
            phase.0 -= LUT_SIZE as f32;
        }

        sample
    }

    fn global_init() {
        TABLE.get_or_init(build_table);
    }

    fn tag(&self) -> GenEngine {
        GenEngine::Lut
    }

    fn desc(&self) -> &'static str {
        "lookup table + phase accumulator"
    }
}
