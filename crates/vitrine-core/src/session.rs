//! # Admin Session Guard
//!
//! Shared-password gate in front of the management surface.
//!
//! ```text
//!            login(ok)                 logout / expiry
//! LoggedOut ──────────► LoggedIn{since} ───────────────► LoggedOut
//!     ▲  │ login(wrong)
//!     └──┘
//! ```
//!
//! The credential check is a plain equality. There is no lockout, hashing
//! or per-user identity.

use chrono::{DateTime, Duration, Utc};

use crate::error::{CoreError, CoreResult};

/// Where a single admin session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { since: DateTime<Utc> },
}

/// Checks submitted credentials and issues sessions.
#[derive(Debug, Clone)]
pub struct AdminGuard {
    password: String,
    ttl: Option<Duration>,
}

impl AdminGuard {
    /// `ttl = None` keeps sessions alive until logout.
    pub fn new(password: impl Into<String>, ttl: Option<Duration>) -> Self {
        AdminGuard {
            password: password.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Opens a session when `credential` equals the configured password.
    pub fn login(&self, credential: &str, now: DateTime<Utc>) -> CoreResult<AdminSession> {
        if credential != self.password {
            return Err(CoreError::InvalidCredential);
        }
        Ok(AdminSession {
            state: SessionState::LoggedIn { since: now },
            ttl: self.ttl,
        })
    }
}

/// One admin session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    state: SessionState,
    ttl: Option<Duration>,
}

impl AdminSession {
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// LoggedIn and not past its TTL.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.state {
            SessionState::LoggedOut => false,
            SessionState::LoggedIn { since } => match self.ttl {
                None => true,
                Some(ttl) => now < since + ttl,
            },
        }
    }

    pub fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
    }

    /// Gate for management operations. Moves an expired session to
    /// LoggedOut before rejecting it.
    pub fn require(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        if self.is_active(now) {
            return Ok(());
        }
        self.logout();
        Err(CoreError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_with_correct_password() {
        let guard = AdminGuard::new("vitrine123", None);
        let now = Utc::now();
        let session = guard.login("vitrine123", now).unwrap();
        assert_eq!(session.state(), SessionState::LoggedIn { since: now });
        assert!(session.is_active(now + Duration::days(365)));
    }

    #[test]
    fn test_login_with_wrong_password() {
        let guard = AdminGuard::new("vitrine123", None);
        assert!(matches!(
            guard.login("VITRINE123", Utc::now()),
            Err(CoreError::InvalidCredential)
        ));
        // No lockout: the right password still works afterwards
        assert!(guard.login("vitrine123", Utc::now()).is_ok());
    }

    #[test]
    fn test_logout() {
        let guard = AdminGuard::new("pw", None);
        let now = Utc::now();
        let mut session = guard.login("pw", now).unwrap();
        session.logout();
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert!(session.require(now).is_err());
    }

    #[test]
    fn test_session_expires_after_ttl() {
        let guard = AdminGuard::new("pw", Some(Duration::minutes(30)));
        let now = Utc::now();
        let mut session = guard.login("pw", now).unwrap();

        assert!(session.require(now + Duration::minutes(29)).is_ok());
        assert!(matches!(
            session.require(now + Duration::minutes(30)),
            Err(CoreError::NotAuthenticated)
        ));
        assert_eq!(session.state(), SessionState::LoggedOut);
    }
}
