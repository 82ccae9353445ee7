//! Session handling: who is signed in, what they may access, and when an
//! idle session is signed out.

pub mod access;
pub mod monitor;

pub use access::{can_access, AccessError, Area, AuthState, AuthUser, Role};
pub use monitor::{
    ActivityEvent, ActivityHandle, InactivityMonitor, SessionEnd, SharedAuth,
    DEFAULT_INACTIVITY_TIMEOUT,
};
