//! International Standard Recording Codes.
//!
//! An ISRC is twelve characters: country code (2), registrant code (3),
//! year digits (2) and serial number (5), e.g. `USPOI2400001`. The display
//! form separates the segments with hyphens: `US-POI-24-00001`.

use super::settings::IsrcSettings;
use super::{next_serial, CodeError, CodeKind};

/// Length of an ISRC without separators.
pub const ISRC_LEN: usize = 12;

/// Advances the ISRC counter and returns the new code with its serial.
///
/// Returns `Ok(None)` without touching the counter when auto-generation is
/// off. The caller is responsible for persisting `settings` afterwards.
///
/// # Errors
///
/// Returns `InvalidSettings` if a segment is malformed and
/// `SerialExhausted` once serial 99999 has been used; the counter is left
/// unchanged in both cases.
pub fn next_isrc(settings: &mut IsrcSettings) -> Result<Option<(String, u32)>, CodeError> {
    if !settings.auto_generate {
        return Ok(None);
    }
    settings.validate()?;
    let serial = next_serial(settings.last_serial_number, CodeKind::Isrc)?;
    settings.last_serial_number = serial;
    let code = format!(
        "{}{}{}{serial:05}",
        settings.country_code, settings.registrant_code, settings.year_digits
    );
    Ok(Some((code, serial)))
}

/// Checks `code` against `^[A-Z]{2}[A-Z0-9]{3}\d{2}\d{5}$`.
#[must_use]
pub fn validate_isrc(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == ISRC_LEN
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..5].iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

/// Strips hyphens and whitespace and uppercases letters, turning a display
/// form such as `us-poi-24-00001` into `USPOI2400001`.
///
/// The result still needs [`validate_isrc`].
#[must_use]
pub fn normalize_isrc(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Renders a valid ISRC in its hyphenated display form.
///
/// Returns `None` if `code` is not a valid ISRC.
#[must_use]
pub fn format_isrc_display(code: &str) -> Option<String> {
    if !validate_isrc(code) {
        return None;
    }
    Some(format!("{}-{}-{}-{}", &code[..2], &code[2..5], &code[5..7], &code[7..]))
}
