//! `poise session` command.
//!
//! Signs in with the configured role and keeps the session alive while
//! lines arrive on stdin. Each line counts as a key press; a line reading
//! `logout` or end of input signs out. A quiet period longer than the
//! timeout expires the session.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::session::{ActivityEvent, Area, AuthState, InactivityMonitor, SessionEnd, SharedAuth};

/// Execute the `session` command.
///
/// # Errors
///
/// Returns an error string if the timeout is zero, the runtime cannot be
/// started, or reading stdin fails.
pub fn run(
    ctx: &ServiceContext,
    config: &AppConfig,
    email: &str,
    timeout_secs: Option<u64>,
) -> Result<(), String> {
    let timeout = match timeout_secs {
        Some(0) => return Err("--timeout-secs must be positive".to_string()),
        Some(secs) => Duration::from_secs(secs),
        None => config.session_timeout,
    };

    let auth: SharedAuth = Arc::new(Mutex::new(AuthState::signed_out()));
    {
        let mut state = auth.lock().unwrap_or_else(PoisonError::into_inner);
        let user = state.sign_in(email, config.role, ctx.clock.now());
        println!("Signed in as {} ({}), session {}", user.email, user.role, user.session_id);
        let areas: Vec<String> = [Area::Public, Area::Artist, Area::Admin]
            .into_iter()
            .filter(|area| state.require(*area).is_ok())
            .map(|area| format!("{area:?}").to_lowercase())
            .collect();
        println!("Accessible areas: {}", areas.join(", "));
    }
    println!(
        "Session ends after {}s without input. Type `logout` or close stdin to sign out.",
        timeout.as_secs()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;
    let end = runtime.block_on(watch_input(
        BufReader::new(tokio::io::stdin()),
        timeout,
        Arc::clone(&auth),
    ));
    // A blocked stdin read must not hold up exit.
    runtime.shutdown_background();

    match end? {
        SessionEnd::Expired => println!("Session expired after inactivity; signed out."),
        SessionEnd::LoggedOut => println!("Session logged out."),
    }
    Ok(())
}

/// Runs an inactivity monitor fed by lines of `input` until the session ends.
///
/// # Errors
///
/// Returns an error string if reading `input` fails or the monitor task
/// panics.
pub async fn watch_input<R>(
    input: R,
    timeout: Duration,
    auth: SharedAuth,
) -> Result<SessionEnd, String>
where
    R: AsyncBufRead + Unpin,
{
    let (handle, mut task) = InactivityMonitor::spawn(timeout, auth);
    let mut lines = input.lines();

    let read_error = loop {
        tokio::select! {
            end = &mut task => return end.map_err(|e| format!("inactivity monitor failed: {e}")),
            line = lines.next_line() => match line {
                Ok(Some(line)) if line.trim().eq_ignore_ascii_case("logout") => {
                    handle.logout();
                    break None;
                }
                Ok(Some(_)) => {
                    handle.record(ActivityEvent::KeyDown);
                }
                Ok(None) => {
                    handle.logout();
                    break None;
                }
                Err(e) => {
                    handle.logout();
                    break Some(format!("failed to read input: {e}"));
                }
            },
        }
    };

    let end = task.await.map_err(|e| format!("inactivity monitor failed: {e}"))?;
    match read_error {
        Some(err) => Err(err),
        None => Ok(end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use chrono::Utc;
    use tokio::io::AsyncWriteExt;

    fn signed_in() -> SharedAuth {
        let mut auth = AuthState::signed_out();
        auth.sign_in("artist@example.com", Role::Artist, Utc::now());
        Arc::new(Mutex::new(auth))
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_logs_out() {
        let auth = signed_in();
        let end = watch_input(&b"hello\nworld\n"[..], Duration::from_secs(60), Arc::clone(&auth))
            .await
            .unwrap();
        assert_eq!(end, SessionEnd::LoggedOut);
        assert!(auth.lock().unwrap().user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn logout_line_ends_session() {
        let auth = signed_in();
        let end = watch_input(&b"a\n  LOGOUT \nignored\n"[..], Duration::from_secs(60), auth)
            .await
            .unwrap();
        assert_eq!(end, SessionEnd::LoggedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn silent_input_expires() {
        let auth = signed_in();
        let (reader, _writer) = tokio::io::duplex(64);
        let start = tokio::time::Instant::now();

        let end = watch_input(BufReader::new(reader), Duration::from_secs(30), Arc::clone(&auth))
            .await
            .unwrap();

        assert_eq!(end, SessionEnd::Expired);
        assert_eq!(start.elapsed(), Duration::from_secs(30));
        assert!(auth.lock().unwrap().user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_keeps_session_alive() {
        let auth = signed_in();
        let (reader, mut writer) = tokio::io::duplex(64);
        let start = tokio::time::Instant::now();

        let typist = tokio::spawn(async move {
            for _ in 0..3 {
                tokio::time::sleep(Duration::from_secs(20)).await;
                writer.write_all(b"still here\n").await.unwrap();
            }
            // Hold the stream open so only the timeout can end the session.
            tokio::time::sleep(Duration::from_secs(3600)).await;
            drop(writer);
        });

        let end = watch_input(BufReader::new(reader), Duration::from_secs(30), auth)
            .await
            .unwrap();
        assert_eq!(end, SessionEnd::Expired);
        assert_eq!(start.elapsed(), Duration::from_secs(60 + 30));
        typist.abort();
    }

    #[test]
    fn zero_timeout_rejected() {
        let ctx = ServiceContext::fixed(Utc::now(), vec![0]);
        let err = run(&ctx, &AppConfig::default(), "a@b.c", Some(0)).unwrap_err();
        assert!(err.contains("positive"));
    }
}
