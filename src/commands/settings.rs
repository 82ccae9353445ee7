//! `poise settings` commands.

use std::fmt::Write as _;

use tracing::info;

use crate::cli::SettingsUpdate;
use crate::codes::CodeGenerationSettings;
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::session::{can_access, AccessError, Area};
use crate::store::SettingsStore;

/// Execute `settings show`.
///
/// # Errors
///
/// Returns an error string if the settings cannot be loaded.
pub fn show(ctx: &ServiceContext, config: &AppConfig) -> Result<(), String> {
    let store = SettingsStore::new(ctx, &config.store_root);
    print!("{}", render(&store.load_settings()?));
    Ok(())
}

/// Execute `settings set`. Only administrators may change settings.
///
/// # Errors
///
/// Returns an error string if the role is not allowed, nothing was given
/// to change, or the resulting settings are invalid or cannot be saved.
pub fn set(
    ctx: &ServiceContext,
    config: &AppConfig,
    update: &SettingsUpdate,
) -> Result<(), String> {
    if !can_access(Some(config.role), Area::Admin) {
        let err = AccessError::Forbidden {
            role: config.role,
            area: Area::Admin,
        };
        return Err(err.to_string());
    }
    if update.is_empty() {
        return Err("nothing to change; pass at least one settings flag".to_string());
    }

    let store = SettingsStore::new(ctx, &config.store_root);
    let lock = store.lock()?;
    let mut settings = store.load_settings()?;
    apply(&mut settings, update);
    store.save_settings(&settings)?;
    drop(lock);
    info!(role = %config.role, "settings updated");

    print!("{}", render(&settings));
    Ok(())
}

/// Copies every provided field of `update` into `settings`.
pub fn apply(settings: &mut CodeGenerationSettings, update: &SettingsUpdate) {
    let isrc = &mut settings.isrc;
    if let Some(v) = &update.country_code {
        isrc.country_code.clone_from(v);
    }
    if let Some(v) = &update.registrant_code {
        isrc.registrant_code.clone_from(v);
    }
    if let Some(v) = &update.year_digits {
        isrc.year_digits.clone_from(v);
    }
    if let Some(v) = update.isrc_auto {
        isrc.auto_generate = v;
    }
    if let Some(v) = update.isrc_serial {
        isrc.last_serial_number = v;
    }

    let upc = &mut settings.upc;
    if let Some(v) = &update.upc_prefix {
        upc.prefix.clone_from(v);
    }
    if let Some(v) = update.upc_auto {
        upc.auto_generate = v;
    }
    if let Some(v) = update.upc_serial {
        upc.last_serial_number = v;
    }
}

/// Formats settings for display.
#[must_use]
pub fn render(settings: &CodeGenerationSettings) -> String {
    let on_off = |b: bool| if b { "on" } else { "off" };
    let isrc = &settings.isrc;
    let upc = &settings.upc;

    let mut out = String::new();
    let _ = writeln!(out, "ISRC");
    let _ = writeln!(out, "  auto-generate    {}", on_off(isrc.auto_generate));
    let _ = writeln!(out, "  country code     {}", isrc.country_code);
    let _ = writeln!(out, "  registrant code  {}", isrc.registrant_code);
    let _ = writeln!(out, "  year digits      {}", isrc.year_digits);
    let _ = writeln!(out, "  last serial      {:05}", isrc.last_serial_number);
    let _ = writeln!(out, "UPC");
    let _ = writeln!(out, "  auto-generate    {}", on_off(upc.auto_generate));
    let _ = writeln!(out, "  prefix           {}", upc.prefix);
    let _ = writeln!(out, "  last serial      {:05}", upc.last_serial_number);
    out
}
