//! `poise validate` command.

use crate::codes::{normalize_isrc, upc_check_digit, CodeKind};

/// Execute the `validate` command.
///
/// # Errors
///
/// Returns an error string describing why the code is invalid, so the
/// process exits non-zero.
pub fn run(kind: CodeKind, code: &str) -> Result<(), String> {
    let (normalized, verdict) = check(kind, code);
    match verdict {
        Ok(()) => {
            println!("{normalized}: valid {kind}");
            Ok(())
        }
        Err(reason) => Err(format!("{normalized}: invalid {kind}: {reason}")),
    }
}

/// Normalizes `code` for `kind` and explains any problem with it.
#[must_use]
pub fn check(kind: CodeKind, code: &str) -> (String, Result<(), String>) {
    let normalized = match kind {
        CodeKind::Isrc => normalize_isrc(code),
        CodeKind::Upc => code.trim().to_string(),
    };
    if kind.validate(&normalized) {
        return (normalized, Ok(()));
    }
    let reason = match kind {
        CodeKind::Isrc => {
            "expected 2 letters, 3 letters or digits, then 7 digits".to_string()
        }
        CodeKind::Upc => upc_reason(&normalized),
    };
    (normalized, Err(reason))
}

fn upc_reason(code: &str) -> String {
    if code.len() != 12 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return "expected exactly 12 digits".to_string();
    }
    match upc_check_digit(&code[..11]) {
        Some(expected) => format!("check digit should be {expected}"),
        None => "expected exactly 12 digits".to_string(),
    }
}
