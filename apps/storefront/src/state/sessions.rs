//! # Admin Sessions
//!
//! Every successful login opens one session under an opaque UUID token.
//! Management routes look the token up here.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use vitrine_core::session::{AdminGuard, AdminSession};
use vitrine_core::{CoreError, CoreResult};

pub struct AdminSessions {
    guard: AdminGuard,
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl AdminSessions {
    pub fn new(guard: AdminGuard) -> Self {
        AdminSessions {
            guard,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the new session token.
    pub async fn login(&self, password: &str) -> CoreResult<String> {
        let session = self.guard.login(password, Utc::now())?;
        let token = Uuid::new_v4().to_string();

        let mut sessions = self.sessions.write().await;
        // Expired sessions are otherwise only dropped when their token is used
        let now = Utc::now();
        sessions.retain(|_, s| s.is_active(now));
        sessions.insert(token.clone(), session);

        info!(active = sessions.len(), "Admin logged in");
        Ok(token)
    }

    /// Ends the session. Returns whether the token was known.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        match removed {
            Some(mut session) => {
                session.logout();
                debug!("Admin logged out");
                true
            }
            None => false,
        }
    }

    /// Succeeds for the token of a LoggedIn, unexpired session.
    pub async fn authorize(&self, token: &str) -> CoreResult<()> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if session.is_active(now) => return Ok(()),
                Some(_) => {}
                None => return Err(CoreError::NotAuthenticated),
            }
        }

        let mut sessions = self.sessions.write().await;
        let Some(mut session) = sessions.remove(token) else {
            return Err(CoreError::NotAuthenticated);
        };
        if let Err(e) = session.require(now) {
            debug!("Admin session expired");
            return Err(e);
        }
        sessions.insert(token.to_string(), session);
        Ok(())
    }

    pub async fn active_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.is_active(now))
            .count()
    }
}
