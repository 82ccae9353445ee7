//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::codes::{CodeKind, MAX_SERIAL};

/// Top-level CLI parser for `poise`.
#[derive(Debug, Parser)]
#[command(name = "poise", version, about = "Issue and validate ISRC and UPC codes")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Issue the next ISRC code(s).
    Isrc {
        /// Number of codes to issue (at most one serial space, 99999).
        #[arg(long, default_value_t = 1, value_parser = count_parser())]
        count: u32,
    },
    /// Issue the next UPC code(s).
    Upc {
        /// Number of codes to issue (at most one serial space, 99999).
        #[arg(long, default_value_t = 1, value_parser = count_parser())]
        count: u32,
    },
    /// Check whether a code is well formed.
    Validate {
        /// Identifier family of the code.
        #[arg(value_enum)]
        kind: CodeKind,
        /// The code to check. ISRCs may use the hyphenated display form.
        code: String,
    },
    /// Show or change code generation settings.
    Settings {
        /// Settings action.
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// List issued codes.
    History {
        /// Identifier family to list.
        #[arg(value_enum)]
        kind: CodeKind,
    },
    /// Hold a session open while stdin lines keep arriving.
    Session {
        /// Account email to sign in as.
        #[arg(long, default_value = "artist@poise.local")]
        email: String,
        /// Inactivity timeout in seconds (overrides `POISE_SESSION_TIMEOUT_SECS`).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },
}

fn count_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_SERIAL))
}

/// `poise settings` actions.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings.
    Show,
    /// Change settings (admin only).
    Set(SettingsUpdate),
}

/// Fields accepted by `poise settings set`. Omitted fields are unchanged.
#[derive(Debug, Default, Args)]
pub struct SettingsUpdate {
    /// ISRC country code (2 uppercase letters).
    #[arg(long)]
    pub country_code: Option<String>,
    /// ISRC registrant code (3 uppercase letters or digits).
    #[arg(long)]
    pub registrant_code: Option<String>,
    /// ISRC year digits (2 digits).
    #[arg(long)]
    pub year_digits: Option<String>,
    /// UPC company prefix (5 digits).
    #[arg(long)]
    pub upc_prefix: Option<String>,
    /// Enable or disable ISRC auto-generation.
    #[arg(long)]
    pub isrc_auto: Option<bool>,
    /// Enable or disable UPC auto-generation.
    #[arg(long)]
    pub upc_auto: Option<bool>,
    /// Reset the last issued ISRC serial.
    #[arg(long)]
    pub isrc_serial: Option<u32>,
    /// Reset the last issued UPC serial.
    #[arg(long)]
    pub upc_serial: Option<u32>,
}

impl SettingsUpdate {
    /// Returns `true` if no field was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country_code.is_none()
            && self.registrant_code.is_none()
            && self.year_digits.is_none()
            && self.upc_prefix.is_none()
            && self.isrc_auto.is_none()
            && self.upc_auto.is_none()
            && self.isrc_serial.is_none()
            && self.upc_serial.is_none()
    }
}
