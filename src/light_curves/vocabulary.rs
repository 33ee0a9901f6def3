//! Lookups into the fixed normalization tables of [`crate::constants`].
use crate::constants::{ClassCode, PassbandCode, CLASS_COLLAPSE, PASSBAND_CODES};

/// Map a raw `SNTYPE` code onto its canonical class.
///
/// Codes listed in [`CLASS_COLLAPSE`] are replaced; any other code is returned unchanged.
pub fn collapse_class(code: ClassCode) -> ClassCode {
    CLASS_COLLAPSE
        .iter()
        .find(|(raw, _)| *raw == code)
        .map_or(code, |&(_, canonical)| canonical)
}

/// Integer code of a fixed-width SNANA filter field.
///
/// The field is padded on the right (`"u "`, `"Y "`); padding is ignored but the
/// letter itself must match exactly, so `"y"` or `"X "` are rejected.
pub fn passband_code(raw: &str) -> Option<PassbandCode> {
    let letter = raw.trim_end_matches([' ', '\0']);
    PASSBAND_CODES
        .iter()
        .find(|(band, _)| *band == letter)
        .map(|&(_, code)| code)
}
