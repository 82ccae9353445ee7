//! UPC-A product codes.
//!
//! Layout: prefix (5) + serial (5) + filler digit (1) + check digit (1).

use super::settings::UpcSettings;
use super::{next_serial, CodeError, CodeKind};
use crate::ports::DigitSource;

/// Length of a UPC-A code.
pub const UPC_LEN: usize = 12;

/// Computes the UPC-A check digit for an 11-digit body.
///
/// Digits at even (0-based) positions weigh 3, odd positions weigh 1; the
/// check digit brings the weighted sum to a multiple of 10. Returns `None`
/// unless `body` is exactly 11 ASCII digits.
#[must_use]
pub fn upc_check_digit(body: &str) -> Option<u8> {
    if body.len() != UPC_LEN - 1 || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sum: u32 = body
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit * 3
            } else {
                digit
            }
        })
        .sum();
    u8::try_from((10 - sum % 10) % 10).ok()
}

/// Advances the UPC counter and returns the new code with its serial.
///
/// Draws one filler digit from `digits`. Returns `Ok(None)` without
/// touching the counter when auto-generation is off.
///
/// # Errors
///
/// Returns `InvalidSettings` for a malformed prefix and `SerialExhausted`
/// once serial 99999 has been used; the counter is left unchanged.
pub fn next_upc(
    settings: &mut UpcSettings,
    digits: &dyn DigitSource,
) -> Result<Option<(String, u32)>, CodeError> {
    if !settings.auto_generate {
        return Ok(None);
    }
    settings.validate()?;
    let serial = next_serial(settings.last_serial_number, CodeKind::Upc)?;
    let filler = digits.next_digit() % 10;
    let body = format!("{}{serial:05}{filler}", settings.prefix);
    let check = upc_check_digit(&body).ok_or_else(|| CodeError::InvalidSettings {
        field: "UPC prefix",
        reason: format!("produced a malformed body {body:?}"),
    })?;
    settings.last_serial_number = serial;
    Ok(Some((format!("{body}{check}"), serial)))
}

/// Checks that `code` is 12 digits whose last digit is the check digit of
/// the first 11.
#[must_use]
pub fn validate_upc(code: &str) -> bool {
    if code.len() != UPC_LEN || !code.is_ascii() {
        return false;
    }
    let (body, check) = code.split_at(UPC_LEN - 1);
    match (upc_check_digit(body), check.bytes().next()) {
        (Some(expected), Some(actual)) if actual.is_ascii_digit() => expected == actual - b'0',
        _ => false,
    }
}
