//! Inactivity monitor that signs a session out after a quiet period.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, trace};

use super::access::AuthState;

/// Quiet period after which a session is signed out.
pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Authentication state shared between the app and its monitor.
pub type SharedAuth = Arc<Mutex<AuthState>>;

/// User input that counts as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    /// Pointer moved.
    MouseMove,
    /// Key pressed.
    KeyDown,
    /// Content scrolled.
    Scroll,
    /// Touch began.
    Touch,
    /// Pointer clicked.
    Click,
}

/// How a monitored session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No activity arrived within the timeout.
    Expired,
    /// The session was closed explicitly, or every handle was dropped.
    LoggedOut,
}

enum Signal {
    Activity(ActivityEvent),
    Logout,
}

/// Feeds activity into a running monitor. Cheap to clone.
#[derive(Clone)]
pub struct ActivityHandle {
    tx: mpsc::UnboundedSender<Signal>,
}

impl ActivityHandle {
    /// Resets the inactivity deadline. Returns `false` once the monitor
    /// has already ended.
    pub fn record(&self, event: ActivityEvent) -> bool {
        self.tx.send(Signal::Activity(event)).is_ok()
    }

    /// Signs the session out immediately.
    pub fn logout(&self) {
        let _ = self.tx.send(Signal::Logout);
    }
}

/// Spawns inactivity monitors.
pub struct InactivityMonitor;

impl InactivityMonitor {
    /// Starts a monitor on the current tokio runtime.
    ///
    /// The returned task resolves once the session ends; by then `auth`
    /// has been cleared.
    #[must_use]
    pub fn spawn(timeout: Duration, auth: SharedAuth) -> (ActivityHandle, JoinHandle<SessionEnd>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(watch(timeout, auth, rx));
        (ActivityHandle { tx }, task)
    }
}

async fn watch(
    timeout: Duration,
    auth: SharedAuth,
    mut rx: mpsc::UnboundedReceiver<Signal>,
) -> SessionEnd {
    let mut deadline = Instant::now() + timeout;
    let end = loop {
        tokio::select! {
            signal = rx.recv() => match signal {
                Some(Signal::Activity(event)) => {
                    trace!(?event, "activity");
                    deadline = Instant::now() + timeout;
                }
                Some(Signal::Logout) | None => break SessionEnd::LoggedOut,
            },
            () = sleep_until(deadline) => break SessionEnd::Expired,
        }
    };

    let user = auth.lock().unwrap_or_else(PoisonError::into_inner).sign_out();
    match (end, user) {
        (SessionEnd::Expired, Some(user)) => {
            info!(
                session = %user.session_id,
                email = %user.email,
                "session expired after inactivity"
            );
        }
        (_, Some(user)) => debug!(session = %user.session_id, "session logged out"),
        (_, None) => debug!(?end, "monitor ended with no signed-in user"),
    }
    end
}
