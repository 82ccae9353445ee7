//! Signed-in state and role gating.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Role of a signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Uploads tracks and manages their own releases.
    Artist,
    /// Reviews submissions and configures the platform.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Artist => "artist",
            Self::Admin => "admin",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" => Ok(Self::Artist),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role {other:?} (expected artist or admin)")),
        }
    }
}

/// A gated part of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Open to everyone, signed in or not.
    Public,
    /// Requires any signed-in account.
    Artist,
    /// Requires an administrator.
    Admin,
}

/// Whether `role` (or an anonymous visitor, for `None`) may enter `area`.
#[must_use]
pub fn can_access(role: Option<Role>, area: Area) -> bool {
    match area {
        Area::Public => true,
        Area::Artist => role.is_some(),
        Area::Admin => role == Some(Role::Admin),
    }
}

/// Reasons access to an area is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// Nobody is signed in.
    #[error("sign in required")]
    NotSignedIn,
    /// The signed-in role is not allowed in the area.
    #[error("{role} accounts cannot access {area:?} area")]
    Forbidden {
        /// Role that was refused.
        role: Role,
        /// Area that was requested.
        area: Area,
    },
}

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Session identifier, fresh for every sign-in.
    pub session_id: Uuid,
    /// Account email.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// When the session began.
    pub signed_in_at: DateTime<Utc>,
}

/// In-memory authentication state shared with the inactivity monitor.
#[derive(Debug, Default)]
pub struct AuthState {
    user: Option<AuthUser>,
}

impl AuthState {
    /// State with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Signs in `email` with `role`, replacing any existing session.
    pub fn sign_in(
        &mut self,
        email: impl Into<String>,
        role: Role,
        at: DateTime<Utc>,
    ) -> &AuthUser {
        self.user.insert(AuthUser {
            session_id: Uuid::new_v4(),
            email: email.into(),
            role,
            signed_in_at: at,
        })
    }

    /// Clears the session, returning the user that was signed in.
    pub fn sign_out(&mut self) -> Option<AuthUser> {
        self.user.take()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Returns the signed-in user if they may enter `area`.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` when a non-public area is requested anonymously
    /// and `Forbidden` when the role is insufficient.
    pub fn require(&self, area: Area) -> Result<Option<&AuthUser>, AccessError> {
        let role = self.user.as_ref().map(|u| u.role);
        if can_access(role, area) {
            return Ok(self.user.as_ref());
        }
        match role {
            None => Err(AccessError::NotSignedIn),
            Some(role) => Err(AccessError::Forbidden { role, area }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gating_table() {
        assert!(can_access(None, Area::Public));
        assert!(!can_access(None, Area::Artist));
        assert!(!can_access(None, Area::Admin));
        assert!(can_access(Some(Role::Artist), Area::Artist));
        assert!(!can_access(Some(Role::Artist), Area::Admin));
        assert!(can_access(Some(Role::Admin), Area::Artist));
        assert!(can_access(Some(Role::Admin), Area::Admin));
    }

    #[test]
    fn require_reports_why() {
        let mut auth = AuthState::signed_out();
        assert_eq!(auth.require(Area::Artist).unwrap_err(), AccessError::NotSignedIn);
        assert!(auth.require(Area::Public).unwrap().is_none());

        auth.sign_in("artist@example.com", Role::Artist, Utc::now());
        assert_eq!(
            auth.require(Area::Admin).unwrap_err(),
            AccessError::Forbidden { role: Role::Artist, area: Area::Admin }
        );
        assert_eq!(auth.require(Area::Artist).unwrap().unwrap().email, "artist@example.com");
    }

    #[test]
    fn each_sign_in_gets_a_new_session() {
        let mut auth = AuthState::signed_out();
        let first = auth.sign_in("a@example.com", Role::Admin, Utc::now()).session_id;
        let second = auth.sign_in("a@example.com", Role::Admin, Utc::now()).session_id;
        assert_ne!(first, second);

        assert_eq!(auth.sign_out().unwrap().session_id, second);
        assert!(auth.user().is_none());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" artist ".parse::<Role>().unwrap(), Role::Artist);
        assert!("owner".parse::<Role>().is_err());
    }
}
