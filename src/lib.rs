//! Core library for the `poise` CLI.
//!
//! Issues and validates ISRC and UPC codes against a durable settings
//! store, and manages signed-in sessions with role gating and an
//! inactivity timeout. Side effects go through the [`ports`] traits so
//! commands can run live, recorded to cassettes, or replayed from them.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod codes;
pub mod commands;
pub mod config;
pub mod context;
pub mod issuer;
pub mod ports;
pub mod session;
pub mod store;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
