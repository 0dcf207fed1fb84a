#![allow(dead_code)]

use same_core::{Header, LocationCodes};

/// Builds the scenario-one header from spec.md §8: a tornado warning for
/// two Pennsylvania counties.
pub fn scenario_one() -> Header {
    Header::new(
        *b"WXR",
        *b"TOR",
        LocationCodes::new(&[*b"048484", *b"048024"]),
        *b"1000",
        *b"1172221",
        *b"WAEB/AM ",
        8,
    )
}

/// Builds a minimal single-location header with the given attention
/// signal duration, otherwise identical to `scenario_one`.
pub fn header_with_attn(attn_sig_duration: u32) -> Header {
    Header::new(
        *b"EAS",
        *b"RWT",
        LocationCodes::new(&[*b"000000"]),
        *b"0015",
        *b"0010000",
        *b"KABC    ",
        attn_sig_duration,
    )
}

/// Drains a `GenCtx` fully, returning the number of `samples_gen` calls
/// made. Each call always yields a full `CHUNK`-length buffer (the last
/// one's trailing slots may be stale); callers that need the exact valid
/// sample count should compare against `ctx.total_samples()` instead of
/// summing buffer lengths.
pub fn drain<E: same_core::SineEngine>(ctx: &mut same_core::GenCtx<E>) -> u64 {
    let mut chunks = 0u64;
    while !ctx.is_done() {
        let _ = ctx.samples_gen();
        chunks += 1;
    }
    chunks
}
