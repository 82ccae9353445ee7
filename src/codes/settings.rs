//! Code generation settings and their validation.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{CodeError, CodeKind, MAX_SERIAL};

/// Settings for ISRC issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrcSettings {
    /// When `false`, generation yields no code and the counter is untouched.
    #[serde(default = "enabled")]
    pub auto_generate: bool,
    /// Two uppercase letters.
    pub country_code: String,
    /// Three uppercase letters or digits.
    pub registrant_code: String,
    /// Two digits, usually the last two of the reference year.
    pub year_digits: String,
    /// Serial consumed by the most recently issued code (0 if none).
    pub last_serial_number: u32,
}

/// Settings for UPC issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcSettings {
    /// When `false`, generation yields no code and the counter is untouched.
    #[serde(default = "enabled")]
    pub auto_generate: bool,
    /// Five digits identifying the company.
    pub prefix: String,
    /// Serial consumed by the most recently issued code (0 if none).
    pub last_serial_number: u32,
}

/// All code generation settings, persisted as one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGenerationSettings {
    /// ISRC settings.
    pub isrc: IsrcSettings,
    /// UPC settings.
    pub upc: UpcSettings,
}

fn enabled() -> bool {
    true
}

impl CodeGenerationSettings {
    /// Factory defaults, with ISRC year digits taken from `now`.
    #[must_use]
    pub fn defaults_at(now: DateTime<Utc>) -> Self {
        Self {
            isrc: IsrcSettings {
                auto_generate: true,
                country_code: "US".to_string(),
                registrant_code: "POI".to_string(),
                year_digits: format!("{:02}", now.year().rem_euclid(100)),
                last_serial_number: 0,
            },
            upc: UpcSettings {
                auto_generate: true,
                prefix: "12345".to_string(),
                last_serial_number: 0,
            },
        }
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as `CodeError::InvalidSettings`.
    pub fn validate(&self) -> Result<(), CodeError> {
        self.isrc.validate()?;
        self.upc.validate()
    }

    /// Serial consumed by the latest code of `kind`.
    #[must_use]
    pub fn last_serial(&self, kind: CodeKind) -> u32 {
        match kind {
            CodeKind::Isrc => self.isrc.last_serial_number,
            CodeKind::Upc => self.upc.last_serial_number,
        }
    }

    /// Whether auto-generation is on for `kind`.
    #[must_use]
    pub fn auto_generate(&self, kind: CodeKind) -> bool {
        match kind {
            CodeKind::Isrc => self.isrc.auto_generate,
            CodeKind::Upc => self.upc.auto_generate,
        }
    }
}

impl IsrcSettings {
    /// Checks every field against the ISRC segment formats.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as `CodeError::InvalidSettings`.
    pub fn validate(&self) -> Result<(), CodeError> {
        check(
            "country code",
            &self.country_code,
            2,
            |c| c.is_ascii_uppercase(),
            "uppercase letters",
        )?;
        check(
            "registrant code",
            &self.registrant_code,
            3,
            |c| c.is_ascii_uppercase() || c.is_ascii_digit(),
            "uppercase letters or digits",
        )?;
        check("year digits", &self.year_digits, 2, |c| c.is_ascii_digit(), "digits")?;
        check_serial("ISRC serial", self.last_serial_number)
    }
}

impl UpcSettings {
    /// Checks the prefix and serial.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as `CodeError::InvalidSettings`.
    pub fn validate(&self) -> Result<(), CodeError> {
        check("UPC prefix", &self.prefix, 5, |c| c.is_ascii_digit(), "digits")?;
        check_serial("UPC serial", self.last_serial_number)
    }
}

fn check(
    field: &'static str,
    value: &str,
    len: usize,
    allowed: impl Fn(char) -> bool,
    allowed_desc: &str,
) -> Result<(), CodeError> {
    if value.chars().count() == len && value.chars().all(allowed) {
        return Ok(());
    }
    Err(CodeError::InvalidSettings {
        field,
        reason: format!("expected exactly {len} {allowed_desc}, got {value:?}"),
    })
}

fn check_serial(field: &'static str, serial: u32) -> Result<(), CodeError> {
    if serial > MAX_SERIAL {
        return Err(CodeError::InvalidSettings {
            field,
            reason: format!("{serial} exceeds {MAX_SERIAL}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn defaults() -> CodeGenerationSettings {
        CodeGenerationSettings::defaults_at(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn defaults_take_year_from_clock_and_validate() {
        let settings = defaults();
        assert_eq!(settings.isrc.year_digits, "24");
        assert_eq!(settings.isrc.country_code, "US");
        assert_eq!(settings.upc.prefix, "12345");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn year_digits_are_zero_padded() {
        let settings =
            CodeGenerationSettings::defaults_at(Utc.with_ymd_and_hms(2105, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(settings.isrc.year_digits, "05");
    }

    #[test]
    fn rejects_lowercase_country_code() {
        let mut settings = defaults();
        settings.isrc.country_code = "us".into();
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, CodeError::InvalidSettings { field: "country code", .. }));
    }

    #[test]
    fn rejects_short_registrant_and_long_prefix() {
        let mut settings = defaults();
        settings.isrc.registrant_code = "P1".into();
        assert!(settings.isrc.validate().is_err());

        let mut settings = defaults();
        settings.upc.prefix = "123456".into();
        assert!(matches!(
            settings.validate(),
            Err(CodeError::InvalidSettings { field: "UPC prefix", .. })
        ));
    }

    #[test]
    fn registrant_code_accepts_digits() {
        let mut settings = defaults();
        settings.isrc.registrant_code = "A1Z".into();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_serial_beyond_field() {
        let mut settings = defaults();
        settings.upc.last_serial_number = MAX_SERIAL + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn auto_generate_defaults_on_when_missing_from_yaml() {
        let yaml = concat!(
            "isrc:\n",
            "  country_code: GB\n",
            "  registrant_code: ABC\n",
            "  year_digits: '23'\n",
            "  last_serial_number: 4\n",
            "upc:\n",
            "  prefix: '00042'\n",
            "  last_serial_number: 0\n",
        );
        let settings: CodeGenerationSettings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.auto_generate(CodeKind::Isrc));
        assert!(settings.auto_generate(CodeKind::Upc));
        assert_eq!(settings.last_serial(CodeKind::Isrc), 4);
        assert_eq!(settings.upc.prefix, "00042");
    }
}
