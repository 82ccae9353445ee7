//! `poise isrc` and `poise upc` commands.

use std::fmt::Write as _;

use crate::codes::{format_isrc_display, CodeError, CodeKind, IssuedCode};
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::issuer::CodeIssuer;

/// Execute an issuance command, printing one code per line.
///
/// # Errors
///
/// Returns an error string if issuance fails. Codes issued before a
/// mid-batch failure are still printed.
pub fn run(
    ctx: &ServiceContext,
    config: &AppConfig,
    kind: CodeKind,
    count: u32,
) -> Result<(), String> {
    let issuer = CodeIssuer::new(ctx, &config.store_root);
    let count = usize::try_from(count).map_err(|e| format!("count too large: {e}"))?;

    match issuer.bulk_issue(kind, count) {
        Ok(codes) => {
            print!("{}", render(kind, &codes));
            Ok(())
        }
        Err(CodeError::BatchInterrupted { issued, source }) => {
            if !issued.is_empty() {
                print!("{}", render(kind, &issued));
            }
            Err(format!("{kind} issuance stopped after {} code(s): {source}", issued.len()))
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Formats issued codes, one per line. ISRCs also show their display form.
#[must_use]
pub fn render(kind: CodeKind, codes: &[IssuedCode]) -> String {
    if codes.is_empty() {
        return format!("{kind} auto-generation is disabled; no code issued.\n");
    }
    let mut out = String::new();
    for issued in codes {
        match format_isrc_display(&issued.code).filter(|_| kind == CodeKind::Isrc) {
            Some(display) => {
                let _ = writeln!(out, "{}  ({display})", issued.code);
            }
            None => {
                let _ = writeln!(out, "{}", issued.code);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn issued(kind: CodeKind, code: &str) -> IssuedCode {
        IssuedCode {
            kind,
            code: code.into(),
            serial: 1,
            issued_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn renders_isrc_with_display_form() {
        let out = render(CodeKind::Isrc, &[issued(CodeKind::Isrc, "USPOI2400001")]);
        assert_eq!(out, "USPOI2400001  (US-POI-24-00001)\n");
    }

    #[test]
    fn renders_upc_plain() {
        let out = render(CodeKind::Upc, &[issued(CodeKind::Upc, "123450000175")]);
        assert_eq!(out, "123450000175\n");
    }

    #[test]
    fn renders_disabled_notice() {
        assert!(render(CodeKind::Upc, &[]).contains("auto-generation is disabled"));
    }

    #[test]
    fn run_persists_into_configured_store() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ctx = ServiceContext::fixed(now, vec![7]);
        let config = AppConfig {
            store_root: "/store".into(),
            ..AppConfig::default()
        };

        run(&ctx, &config, CodeKind::Upc, 2).unwrap();

        let issuer = CodeIssuer::new(&ctx, &config.store_root);
        assert_eq!(issuer.store().load_settings().unwrap().upc.last_serial_number, 2);
    }
}
