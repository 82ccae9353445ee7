//! Command dispatch and handlers.

pub mod history;
pub mod issue;
pub mod session;
pub mod settings;
pub mod validate;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, SettingsAction};
use crate::codes::CodeKind;
use crate::config::AppConfig;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `POISE_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files beneath it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = AppConfig::from_env()?;
    let session = config.record_dir.as_deref().map(RecordingSession::new).transpose()?;
    let ctx = session.as_ref().map_or_else(ServiceContext::live, ServiceContext::recording);

    let result = dispatch_with_context(command, &ctx, &config);

    // Finish recording after the command completes, even on error.
    if let Some(session) = session {
        // The context holds clones of the recorder handles.
        drop(ctx);
        let dir = session.finish()?;
        info!(dir = %dir.display(), "recording saved");
        eprintln!("Recording saved to: {}", dir.display());
    }

    result
}

/// Dispatch a command with the given service context and configuration.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &AppConfig,
) -> Result<(), String> {
    match command {
        Command::Isrc { count } => issue::run(ctx, config, CodeKind::Isrc, *count),
        Command::Upc { count } => issue::run(ctx, config, CodeKind::Upc, *count),
        Command::Validate { kind, code } => validate::run(*kind, code),
        Command::Settings { action: SettingsAction::Show } => settings::show(ctx, config),
        Command::Settings { action: SettingsAction::Set(update) } => {
            settings::set(ctx, config, update)
        }
        Command::History { kind } => history::run(ctx, config, *kind),
        Command::Session { email, timeout_secs } => {
            session::run(ctx, config, email, *timeout_secs)
        }
    }
}
