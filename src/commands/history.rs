//! `poise history` command.

use std::fmt::Write as _;

use crate::codes::{CodeKind, IssuedCode};
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::store::SettingsStore;

/// Execute the `history` command.
///
/// Displays a table of issued codes of `kind`: serial, code and issue time.
///
/// # Errors
///
/// Returns an error string if the history cannot be loaded.
pub fn run(ctx: &ServiceContext, config: &AppConfig, kind: CodeKind) -> Result<(), String> {
    let store = SettingsStore::new(ctx, &config.store_root);
    let history = store.load_history(kind)?;
    print!("{}", render(kind, &history));
    Ok(())
}

/// Formats issued codes as an aligned table.
#[must_use]
pub fn render(kind: CodeKind, history: &[IssuedCode]) -> String {
    if history.is_empty() {
        return format!("No {kind} codes issued yet.\n");
    }

    let rows: Vec<(String, &str, String)> = history
        .iter()
        .map(|c| (format!("{:05}", c.serial), c.code.as_str(), c.issued_at.to_rfc3339()))
        .collect();

    let serial_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(6).max(6);
    let code_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(4).max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:<serial_width$}  {:<code_width$}  ISSUED AT", "SERIAL", "CODE");
    let _ = writeln!(out, "{:-<serial_width$}  {:-<code_width$}  {:-<9}", "", "", "");
    for (serial, code, at) in &rows {
        let _ = writeln!(out, "{serial:<serial_width$}  {code:<code_width$}  {at}");
    }
    let _ = writeln!(out, "\n{} {kind} code(s) issued.", rows.len());
    out
}
