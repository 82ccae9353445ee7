//! ISRC and UPC identifiers: formats, check digits, validation and the
//! pure increment step of generation.
//!
//! Nothing in here touches storage. Durable issuance lives in
//! [`crate::issuer`].

pub mod isrc;
pub mod settings;
pub mod upc;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use isrc::{format_isrc_display, next_isrc, normalize_isrc, validate_isrc};
pub use settings::{CodeGenerationSettings, IsrcSettings, UpcSettings};
pub use upc::{next_upc, upc_check_digit, validate_upc};

/// Largest serial number representable in the 5-digit serial field.
pub const MAX_SERIAL: u32 = 99_999;

/// The identifier families this crate issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    /// International Standard Recording Code.
    Isrc,
    /// Universal Product Code (UPC-A).
    Upc,
}

impl CodeKind {
    /// Lowercase name used in file names and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isrc => "isrc",
            Self::Upc => "upc",
        }
    }

    /// Checks `code` against this kind's format.
    #[must_use]
    pub fn validate(self, code: &str) -> bool {
        match self {
            Self::Isrc => validate_isrc(code),
            Self::Upc => validate_upc(code),
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isrc => f.write_str("ISRC"),
            Self::Upc => f.write_str("UPC"),
        }
    }
}

/// A code that has been issued and recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    /// Identifier family.
    pub kind: CodeKind,
    /// The full code, without separators.
    pub code: String,
    /// Serial number consumed by this code.
    pub serial: u32,
    /// When the code was issued.
    pub issued_at: DateTime<Utc>,
}

/// Errors raised while generating or issuing codes.
#[derive(Debug, Error)]
pub enum CodeError {
    /// A settings field does not match its required format.
    #[error("invalid {field}: {reason}")]
    InvalidSettings {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The 5-digit serial space is used up.
    #[error(
        "{kind} serial numbers exhausted at {max}; roll the {field} and reset the serial",
        max = MAX_SERIAL,
        field = rollover_field(.kind)
    )]
    SerialExhausted {
        /// Identifier family whose counter overflowed.
        kind: CodeKind,
    },

    /// Loading or persisting settings or history failed.
    #[error("store error: {0}")]
    Store(String),

    /// A bulk request failed part-way; the codes in `issued` stay issued.
    #[error("batch stopped after {count} code(s): {source}", count = .issued.len())]
    BatchInterrupted {
        /// Codes issued before the failure.
        issued: Vec<IssuedCode>,
        /// The failure that stopped the batch.
        #[source]
        source: Box<CodeError>,
    },
}

fn rollover_field(kind: &CodeKind) -> &'static str {
    match kind {
        CodeKind::Isrc => "year digits",
        CodeKind::Upc => "prefix",
    }
}

/// Consumes the next serial after `last`, or fails once the field is full.
pub(crate) fn next_serial(last: u32, kind: CodeKind) -> Result<u32, CodeError> {
    if last >= MAX_SERIAL {
        return Err(CodeError::SerialExhausted { kind });
    }
    Ok(last + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_serial_stops_at_field_width() {
        assert_eq!(next_serial(0, CodeKind::Isrc).unwrap(), 1);
        assert_eq!(next_serial(MAX_SERIAL - 1, CodeKind::Isrc).unwrap(), MAX_SERIAL);
        assert!(matches!(
            next_serial(MAX_SERIAL, CodeKind::Upc),
            Err(CodeError::SerialExhausted { kind: CodeKind::Upc })
        ));
    }

    #[test]
    fn exhausted_message_names_rollover_field() {
        let err = CodeError::SerialExhausted { kind: CodeKind::Isrc };
        assert_eq!(
            err.to_string(),
            "ISRC serial numbers exhausted at 99999; roll the year digits and reset the serial"
        );
    }

    #[test]
    fn batch_error_counts_issued_codes() {
        let err = CodeError::BatchInterrupted {
            issued: vec![IssuedCode {
                kind: CodeKind::Upc,
                code: "123450000175".into(),
                serial: 1,
                issued_at: Utc::now(),
            }],
            source: Box::new(CodeError::Store("disk full".into())),
        };
        assert_eq!(err.to_string(), "batch stopped after 1 code(s): store error: disk full");
    }

    #[test]
    fn kind_dispatches_validation() {
        assert!(CodeKind::Isrc.validate("USPOI2400001"));
        assert!(!CodeKind::Upc.validate("USPOI2400001"));
        assert!(CodeKind::Upc.validate("123450000175"));
    }
}
