//! The 14-state ordered progression through header bursts, silences, the
//! attention signal, and EOM bursts, per 47 CFR §11.31.

use crate::afsk::{self, AfskCursor};
use crate::attention::AttentionCursor;
use crate::engine::{GenEngine, SineEngine};
use crate::error::SameError;
use crate::header::{Header, ATTN_SIG_DURATION_MAX, ATTN_SIG_DURATION_MIN, EOM_BUFFER, HEADER_SIZE_MAX};

/// Number of audio samples produced by a single [`GenCtx::samples_gen`]
/// call, unless the terminal state is reached mid-chunk.
pub const CHUNK: usize = 4096;

/// Number of states in the sequence, including the implicit terminal
/// state reached after [`SeqState::SilenceSeventh`].
const NUM_STATES: usize = 14;

/// The 14 generation states, laid out in the exact order prescribed by
/// the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SeqState {
    AfskHeaderFirst = 0,
    SilenceFirst,
    AfskHeaderSecond,
    SilenceSecond,
    AfskHeaderThird,
    SilenceThird,
    AttentionSignal,
    SilenceFourth,
    AfskEomFirst,
    SilenceFifth,
    AfskEomSecond,
    SilenceSixth,
    AfskEomThird,
    SilenceSeventh,
}

impl SeqState {
    const ORDER: [SeqState; NUM_STATES] = [
        SeqState::AfskHeaderFirst,
        SeqState::SilenceFirst,
        SeqState::AfskHeaderSecond,
        SeqState::SilenceSecond,
        SeqState::AfskHeaderThird,
        SeqState::SilenceThird,
        SeqState::AttentionSignal,
        SeqState::SilenceFourth,
        SeqState::AfskEomFirst,
        SeqState::SilenceFifth,
        SeqState::AfskEomSecond,
        SeqState::SilenceSixth,
        SeqState::AfskEomThird,
        SeqState::SilenceSeventh,
    ];

    /// Returns the state that follows `self`, or `None` if `self` is the
    /// terminal state (`SilenceSeventh`).
    fn next(self) -> Option<SeqState> {
        let idx = self as usize;
        Self::ORDER.get(idx + 1).copied()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Returns the `(min, max)` inclusive range of valid attention-signal
/// durations in seconds, for host validation/UI purposes.
pub fn attn_sig_durations() -> (u32, u32) {
    (ATTN_SIG_DURATION_MIN, ATTN_SIG_DURATION_MAX)
}

/// The generation context: owns the modulated header bytes, the per-state
/// sample budgets, the current state, all cursors, and the active sine
/// engine. A host obtains one via [`GenCtx::new`] and drives it by
/// repeatedly calling [`GenCtx::samples_gen`] until [`GenCtx::is_done`].
pub struct GenCtx<E: SineEngine> {
    engine: E,
    sample_rate: u32,
    samples_per_bit: u32,

    header_data: [u8; HEADER_SIZE_MAX],
    header_len: usize,

    seq_state: Option<SeqState>,
    seq_samples_remaining: [u32; NUM_STATES],

    afsk_cursor: AfskCursor,
    attn_cursor: AttentionCursor,

    sample_buf: [i16; CHUNK],
}

impl<E: SineEngine> GenCtx<E> {
    /// Validates `attn_sig_duration` and `sample_rate`, assembles the
    /// modulated header, precomputes per-state sample budgets, and zeroes
    /// all cursors. Corresponds to `ctx_init` in spec.md §6.
    pub fn new(header: &Header, sample_rate: u32, engine: E) -> Result<Self, SameError> {
        let spb = afsk::samples_per_bit(sample_rate);
        if spb < 1 {
            warn!(
                "rejecting sample_rate {}: samples_per_bit would be {}",
                sample_rate, spb
            );
            return Err(SameError::SampleRateTooLow { sample_rate });
        }

        let mut header_data = [0u8; HEADER_SIZE_MAX];
        let header_len = header.assemble(&mut header_data)?;

        let header_burst_samples = afsk::BITS_PER_CHAR * spb * header_len as u32;
        let eom_burst_samples = afsk::BITS_PER_CHAR * spb * EOM_BUFFER.len() as u32;
        let silence_samples = sample_rate;
        let attn_samples = header.attn_sig_duration() * sample_rate;

        let mut seq_samples_remaining = [0u32; NUM_STATES];
        seq_samples_remaining[SeqState::AfskHeaderFirst.index()] = header_burst_samples;
        seq_samples_remaining[SeqState::AfskHeaderSecond.index()] = header_burst_samples;
        seq_samples_remaining[SeqState::AfskHeaderThird.index()] = header_burst_samples;
        seq_samples_remaining[SeqState::AfskEomFirst.index()] = eom_burst_samples;
        seq_samples_remaining[SeqState::AfskEomSecond.index()] = eom_burst_samples;
        seq_samples_remaining[SeqState::AfskEomThird.index()] = eom_burst_samples;
        seq_samples_remaining[SeqState::SilenceFirst.index()] = silence_samples;
        seq_samples_remaining[SeqState::SilenceSecond.index()] = silence_samples;
        seq_samples_remaining[SeqState::SilenceThird.index()] = silence_samples;
        seq_samples_remaining[SeqState::SilenceFourth.index()] = silence_samples;
        seq_samples_remaining[SeqState::SilenceFifth.index()] = silence_samples;
        seq_samples_remaining[SeqState::SilenceSixth.index()] = silence_samples;
        seq_samples_remaining[SeqState::SilenceSeventh.index()] = silence_samples;
        seq_samples_remaining[SeqState::AttentionSignal.index()] = attn_samples;

        E::global_init();

        Ok(GenCtx {
            engine,
            sample_rate,
            samples_per_bit: spb,
            header_data,
            header_len,
            seq_state: Some(SeqState::AfskHeaderFirst),
            seq_samples_remaining,
            afsk_cursor: AfskCursor::new(),
            attn_cursor: AttentionCursor::new(),
            sample_buf: [0i16; CHUNK],
        })
    }

    /// Writes exactly [`CHUNK`] samples into the context's internal
    /// buffer and returns it, unless the terminal state is reached
    /// mid-chunk, in which case the remaining slots keep their previous
    /// values and the call returns early. The host tracks short final
    /// chunks by observing [`GenCtx::is_done`] after the call.
    ///
    /// # Panics
    /// Debug builds assert the context has not already reached the
    /// terminal state; calling this after [`GenCtx::is_done`] is a
    /// contract violation (spec.md §7) and has unspecified effect in
    /// release builds.
    pub fn samples_gen(&mut self) -> &[i16] {
        debug_assert!(self.seq_state.is_some(), "samples_gen called after terminal state");

        for i in 0..CHUNK {
            let state = match self.seq_state {
                Some(s) => s,
                None => return &self.sample_buf,
            };

            self.sample_buf[i] = self.generate_one(state);

            let remaining = &mut self.seq_samples_remaining[state.index()];
            *remaining -= 1;

            if *remaining == 0 {
                self.seq_state = state.next();
                if self.seq_state.is_none() {
                    // Terminal reached mid-chunk: slots after `i` keep
                    // whatever the previous call left there. The caller
                    // is expected to have been tracking `is_done()`, not
                    // to infer a short chunk from this buffer's contents.
                    break;
                }
            }
        }

        &self.sample_buf
    }

    fn generate_one(&mut self, state: SeqState) -> i16 {
        match state {
            SeqState::AfskHeaderFirst | SeqState::AfskHeaderSecond | SeqState::AfskHeaderThird => {
                self.afsk_cursor.step(
                    &mut self.engine,
                    &self.header_data[..self.header_len],
                    self.sample_rate,
                    self.samples_per_bit,
                )
            }
            SeqState::AfskEomFirst | SeqState::AfskEomSecond | SeqState::AfskEomThird => {
                self.afsk_cursor.step(
                    &mut self.engine,
                    &EOM_BUFFER,
                    self.sample_rate,
                    self.samples_per_bit,
                )
            }
            SeqState::SilenceFirst
            | SeqState::SilenceSecond
            | SeqState::SilenceThird
            | SeqState::SilenceFourth
            | SeqState::SilenceFifth
            | SeqState::SilenceSixth
            | SeqState::SilenceSeventh => 0,
            SeqState::AttentionSignal => self.attn_cursor.step(&mut self.engine, self.sample_rate),
        }
    }

    /// `true` once the sequence has reached its terminal state and no
    /// further samples will be produced.
    pub fn is_done(&self) -> bool {
        self.seq_state.is_none()
    }

    /// The current sequence state, or `None` if generation has completed.
    pub fn state(&self) -> Option<SeqState> {
        self.seq_state
    }

    pub fn engine_tag(&self) -> GenEngine {
        self.engine.tag()
    }

    pub fn engine_desc(&self) -> &'static str {
        self.engine.desc()
    }

    /// Total number of samples across all 14 states, as computed at
    /// construction time. Exposed for tests and hosts that want to report
    /// overall transmission length up front.
    pub fn total_samples(&self) -> u64 {
        self.seq_samples_remaining.iter().map(|&n| n as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LibcEngine;
    use crate::header::{Header, LocationCodes};

    fn sample_header(attn: u32) -> Header {
        Header::new(
            *b"WXR",
            *b"TOR",
            LocationCodes::new(&[*b"048484", *b"048024"]),
            *b"1000",
            *b"1172221",
            *b"WAEB/AM ",
            attn,
        )
    }

    #[test]
    fn rejects_sample_rate_too_low() {
        let header = sample_header(8);
        let err = GenCtx::new(&header, 100, LibcEngine).unwrap_err();
        assert_eq!(err, SameError::SampleRateTooLow { sample_rate: 100 });
    }

    #[test]
    fn rejects_invalid_attn_duration() {
        let header = sample_header(30);
        let err = GenCtx::new(&header, 44100, LibcEngine).unwrap_err();
        assert_eq!(err, SameError::InvalidAttnSigDuration { value: 30 });
    }

    #[test]
    fn minimum_attention_budget() {
        let header = sample_header(8);
        let ctx = GenCtx::new(&header, 44100, LibcEngine).unwrap();
        assert_eq!(
            ctx.seq_samples_remaining[SeqState::AttentionSignal.index()],
            352_800
        );
    }

    #[test]
    fn maximum_attention_budget() {
        let header = sample_header(25);
        let ctx = GenCtx::new(&header, 44100, LibcEngine).unwrap();
        assert_eq!(
            ctx.seq_samples_remaining[SeqState::AttentionSignal.index()],
            1_102_500
        );
    }

    #[test]
    fn header_burst_budget_for_scenario_one() {
        let header = sample_header(8);
        let ctx = GenCtx::new(&header, 44100, LibcEngine).unwrap();
        // header_len = 65, samples_per_bit(44100) = 85
        assert_eq!(
            ctx.seq_samples_remaining[SeqState::AfskHeaderFirst.index()],
            8 * 85 * 65
        );
    }

    #[test]
    fn header_bytes_identical_across_sample_rates() {
        for rate in [22050, 44100, 48000] {
            let header = sample_header(8);
            let ctx = GenCtx::new(&header, rate, LibcEngine).unwrap();
            assert_eq!(&ctx.header_data[..ctx.header_len], &ctx.header_data[..65]);
        }
    }

    #[test]
    fn terminal_detection_after_expected_chunk_count() {
        let header = sample_header(8);
        let mut ctx = GenCtx::new(&header, 44100, LibcEngine).unwrap();
        let total: u64 = ctx.total_samples();
        let expected_chunks = total.div_ceil(CHUNK as u64);

        let mut chunks = 0u64;
        while !ctx.is_done() {
            ctx.samples_gen();
            chunks += 1;
        }

        assert_eq!(chunks, expected_chunks);
    }

    #[test]
    fn silence_states_are_all_zero() {
        let header = sample_header(8);
        let mut ctx = GenCtx::new(&header, 44100, LibcEngine).unwrap();

        // Drain the first AFSK header burst.
        while ctx.state() == Some(SeqState::AfskHeaderFirst) {
            ctx.samples_gen();
        }
        assert_eq!(ctx.state(), Some(SeqState::SilenceFirst));

        // One second of silence at 44.1 kHz (44100 samples) is larger than
        // one CHUNK, so this call stays entirely within SilenceFirst.
        let samples = ctx.samples_gen();
        assert!(samples.iter().all(|&s| s == 0));
        assert_eq!(ctx.state(), Some(SeqState::SilenceFirst));
    }

    #[test]
    fn sample_rate_independent_duration() {
        for rate in [22050, 44100, 48000] {
            let header = sample_header(8);
            let ctx = GenCtx::new(&header, rate, LibcEngine).unwrap();
            let total_secs = ctx.total_samples() as f64 / rate as f64;
            // 6 * (8 * 65) / 520.83 + 7 + 8, per spec.md §8.
            let expected = 6.0 * (8.0 * 65.0) / 520.83 + 7.0 + 8.0;
            assert!((total_secs - expected).abs() < 0.05, "rate={rate} total_secs={total_secs}");
        }
    }

    #[test]
    fn idempotent_init() {
        let header = sample_header(8);
        let ctx1 = GenCtx::new(&header, 44100, LibcEngine).unwrap();
        let ctx2 = GenCtx::new(&header, 44100, LibcEngine).unwrap();
        assert_eq!(ctx1.header_data, ctx2.header_data);
        assert_eq!(ctx1.header_len, ctx2.header_len);
        assert_eq!(ctx1.seq_samples_remaining, ctx2.seq_samples_remaining);
    }
}
