//! Structured SAME header input and the assembler that turns it into the
//! exact byte sequence prescribed by 47 CFR §11.31.

use crate::error::SameError;

/// Number of `0xAB` preamble bytes sent before each AFSK burst.
pub const PREAMBLE_NUM: usize = 16;
const PREAMBLE_BYTE: u8 = 0xAB;

const ORIGINATOR_CODE_LEN: usize = 3;
const EVENT_CODE_LEN: usize = 3;
const LOCATION_CODE_LEN: usize = 6;
const VALID_TIME_PERIOD_LEN: usize = 4;
const ORIGINATOR_TIME_LEN: usize = 7;
const CALLSIGN_LEN: usize = 8;

/// Maximum number of location codes a single header can carry.
pub const LOCATION_CODES_NUM_MAX: usize = 31;

/// Sentinel that may occupy the slot following the last real location code
/// when a header is built from a fixed-size `[[u8; 6]; 31]` array rather
/// than a slice with an explicit length. Kept for source/FFI-style callers;
/// see `Header::from_fixed_locations`.
pub const LOCATION_CODE_END_MARKER: [u8; LOCATION_CODE_LEN] = *b"SPOOKY";

/// Maximum length of the assembled header buffer:
/// `16 + 4 + 1 + 3 + 1 + 3 + 1 + 31*7 + 4 + 1 + 7 + 1 + 8 + 1 = 268`.
pub const HEADER_SIZE_MAX: usize = 268;

/// End-of-message burst: 16 preamble bytes followed by `"NNNN"`.
pub const EOM_BUFFER: [u8; 20] = {
    let mut buf = [PREAMBLE_BYTE; 20];
    buf[16] = b'N';
    buf[17] = b'N';
    buf[18] = b'N';
    buf[19] = b'N';
    buf
};

/// The minimum allowed attention-signal duration, in seconds.
pub const ATTN_SIG_DURATION_MIN: u32 = 8;
/// The maximum allowed attention-signal duration, in seconds.
pub const ATTN_SIG_DURATION_MAX: u32 = 25;

/// A bounded list of location codes, stored inline with no heap allocation.
///
/// Mirrors the source's 31-slot array with a `"SPOOKY"` sentinel, but
/// exposes itself to callers as an ordered, length-bounded sequence rather
/// than requiring the sentinel to be written by hand.
#[derive(Debug, Clone, Copy)]
pub struct LocationCodes {
    codes: [[u8; LOCATION_CODE_LEN]; LOCATION_CODES_NUM_MAX],
    len: usize,
}

impl LocationCodes {
    /// Builds a location code list from a slice of 1-31 six-byte codes.
    ///
    /// # Panics
    /// Panics if `codes` is empty or longer than
    /// [`LOCATION_CODES_NUM_MAX`] — both are contract violations per
    /// spec.md §3 ("Location-code list length is 1-31").
    pub fn new(codes: &[[u8; LOCATION_CODE_LEN]]) -> Self {
        assert!(
            !codes.is_empty() && codes.len() <= LOCATION_CODES_NUM_MAX,
            "location_codes length must be in 1..=31, got {}",
            codes.len()
        );
        let mut inner = [[0u8; LOCATION_CODE_LEN]; LOCATION_CODES_NUM_MAX];
        inner[..codes.len()].copy_from_slice(codes);
        LocationCodes {
            codes: inner,
            len: codes.len(),
        }
    }

    /// Builds a location code list from a fixed 31-slot array, terminated
    /// either by exhausting all 31 slots or by the first slot equal to
    /// [`LOCATION_CODE_END_MARKER`]. Kept for callers porting a source
    /// layout that filled the whole array and relied on the sentinel.
    pub fn from_fixed(codes: &[[u8; LOCATION_CODE_LEN]; LOCATION_CODES_NUM_MAX]) -> Self {
        let len = codes
            .iter()
            .position(|c| *c == LOCATION_CODE_END_MARKER)
            .unwrap_or(LOCATION_CODES_NUM_MAX);
        if len == 0 {
            debug!("location code list hit sentinel at slot 0, treating as empty");
        }
        Self::new(&codes[..len])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8; LOCATION_CODE_LEN]> {
        self.codes[..self.len].iter()
    }
}

/// A fully-formed, immutable SAME header as described by spec.md §3.
///
/// All character fields must already be at their exact protocol length;
/// the constructor panics on a length mismatch rather than silently
/// truncating or padding, per the "contract violation" policy of §7.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub(crate) originator_code: [u8; ORIGINATOR_CODE_LEN],
    pub(crate) event_code: [u8; EVENT_CODE_LEN],
    pub(crate) location_codes: LocationCodes,
    pub(crate) valid_time_period: [u8; VALID_TIME_PERIOD_LEN],
    pub(crate) originator_time: [u8; ORIGINATOR_TIME_LEN],
    pub(crate) callsign: [u8; CALLSIGN_LEN],
    pub(crate) attn_sig_duration: u32,
}

impl Header {
    /// Builds a header from pre-formatted, fixed-length ASCII fields.
    ///
    /// `attn_sig_duration` is validated lazily by [`GenCtx::new`], not
    /// here — construction of a `Header` itself never fails.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        originator_code: [u8; ORIGINATOR_CODE_LEN],
        event_code: [u8; EVENT_CODE_LEN],
        location_codes: LocationCodes,
        valid_time_period: [u8; VALID_TIME_PERIOD_LEN],
        originator_time: [u8; ORIGINATOR_TIME_LEN],
        callsign: [u8; CALLSIGN_LEN],
        attn_sig_duration: u32,
    ) -> Self {
        Header {
            originator_code,
            event_code,
            location_codes,
            valid_time_period,
            originator_time,
            callsign,
            attn_sig_duration,
        }
    }

    pub fn attn_sig_duration(&self) -> u32 {
        self.attn_sig_duration
    }

    /// Appends one fixed-length field followed by a literal `'-'`.
    fn field_add(out: &mut [u8; HEADER_SIZE_MAX], pos: &mut usize, field: &[u8]) {
        debug_assert!(*pos + field.len() + 1 <= HEADER_SIZE_MAX);
        out[*pos..*pos + field.len()].copy_from_slice(field);
        *pos += field.len();
        out[*pos] = b'-';
        *pos += 1;
    }

    /// Populates `out` with the exact protocol byte sequence and returns
    /// its length (always in `58..=268`).
    ///
    /// Fails only if `attn_sig_duration` is outside `[8, 25]`; every other
    /// precondition (field lengths, location-code count) is a caller
    /// contract enforced at construction time via [`LocationCodes::new`]
    /// and fixed-size array types.
    pub fn assemble(&self, out: &mut [u8; HEADER_SIZE_MAX]) -> Result<usize, SameError> {
        if !(ATTN_SIG_DURATION_MIN..=ATTN_SIG_DURATION_MAX).contains(&self.attn_sig_duration) {
            warn!(
                "rejecting attn_sig_duration {} outside [{}, {}]",
                self.attn_sig_duration, ATTN_SIG_DURATION_MIN, ATTN_SIG_DURATION_MAX
            );
            return Err(SameError::InvalidAttnSigDuration {
                value: self.attn_sig_duration,
            });
        }

        let mut pos = 0usize;
        out[..PREAMBLE_NUM].fill(PREAMBLE_BYTE);
        pos += PREAMBLE_NUM;
        out[pos..pos + 5].copy_from_slice(b"ZCZC-");
        pos += 5;

        Self::field_add(out, &mut pos, &self.originator_code);
        Self::field_add(out, &mut pos, &self.event_code);

        for code in self.location_codes.iter() {
            Self::field_add(out, &mut pos, code);
        }
        // The dash after the final location code becomes the field/period
        // separator '+'; this is the only non-uniform separator.
        out[pos - 1] = b'+';

        Self::field_add(out, &mut pos, &self.valid_time_period);
        Self::field_add(out, &mut pos, &self.originator_time);
        Self::field_add(out, &mut pos, &self.callsign);

        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &[u8; 6]) -> [u8; 6] {
        *s
    }

    #[test]
    fn scenario_one_wxr_tor() {
        let header = Header::new(
            *b"WXR",
            *b"TOR",
            LocationCodes::new(&[loc(b"048484"), loc(b"048024")]),
            *b"1000",
            *b"1172221",
            *b"WAEB/AM ",
            8,
        );
        let mut buf = [0u8; HEADER_SIZE_MAX];
        let len = header.assemble(&mut buf).unwrap();
        assert_eq!(len, 65);
        assert_eq!(&buf[..16], &[0xAB; 16]);
        assert_eq!(&buf[16..65], b"ZCZC-WXR-TOR-048484-048024+1000-1172221-WAEB/AM -");
    }

    #[test]
    fn scenario_two_single_location_plus_position() {
        let header = Header::new(
            *b"EAS",
            *b"RWT",
            LocationCodes::new(&[loc(b"000000")]),
            *b"0015",
            // originator_time is 7 bytes; spec text uses "0010000" verbatim
            *b"0010000",
            *b"KABC    ",
            8,
        );
        let mut buf = [0u8; HEADER_SIZE_MAX];
        header.assemble(&mut buf).unwrap();
        let plus_pos = 16 + 4 + 1 + 3 + 1 + 3 + 1 + 6;
        assert_eq!(buf[plus_pos], b'+');
        assert_eq!(buf.iter().filter(|&&b| b == b'+').count(), 1);
    }

    #[test]
    fn scenario_three_maximum_locations() {
        let mut codes = [[0u8; 6]; 31];
        for (i, c) in codes.iter_mut().enumerate() {
            // Distinct 6-digit codes, zero padded.
            let s = format!("{:06}", i);
            c.copy_from_slice(s.as_bytes());
        }
        let header = Header::new(
            *b"CIV",
            *b"SVR",
            LocationCodes::new(&codes),
            *b"1200",
            *b"1234567",
            *b"KABC    ",
            8,
        );
        let mut buf = [0u8; HEADER_SIZE_MAX];
        let len = header.assemble(&mut buf).unwrap();
        assert_eq!(len, HEADER_SIZE_MAX);
    }

    #[test]
    fn invalid_attn_duration_rejected() {
        let header = Header::new(
            *b"EAS",
            *b"RWT",
            LocationCodes::new(&[loc(b"000000")]),
            *b"0015",
            *b"0010000",
            *b"KABC    ",
            26,
        );
        let mut buf = [0u8; HEADER_SIZE_MAX];
        let err = header.assemble(&mut buf).unwrap_err();
        assert_eq!(err, SameError::InvalidAttnSigDuration { value: 26 });
    }

    #[test]
    fn starts_with_preamble_and_zczc() {
        let header = Header::new(
            *b"EAS",
            *b"RWT",
            LocationCodes::new(&[loc(b"000000")]),
            *b"0015",
            *b"0010000",
            *b"KABC    ",
            8,
        );
        let mut buf = [0u8; HEADER_SIZE_MAX];
        header.assemble(&mut buf).unwrap();
        assert!(buf[..16].iter().all(|&b| b == 0xAB));
        assert_eq!(&buf[16..20], b"ZCZC");
    }

    #[test]
    fn from_fixed_array_sentinel() {
        let mut codes = [LOCATION_CODE_END_MARKER; LOCATION_CODES_NUM_MAX];
        codes[0] = *b"101010";
        codes[1] = *b"828282";
        let lc = LocationCodes::from_fixed(&codes);
        assert_eq!(lc.len(), 2);
    }
}
