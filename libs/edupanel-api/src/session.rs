use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use edupanel_shared::models::{Id, LoginResponse};

use crate::error::Result;

/// How long a login stays valid on this machine.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub admin_id: Id,
    #[serde(default)]
    pub role: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn from_login(resp: LoginResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            admin_id: resp.id,
            role: resp.role,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Auth state handed to the API client at construction.
///
/// Holds the current session in memory and mirrors it to a JSON file when a
/// path is configured.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn in_memory(session: Option<Session>) -> Self {
        Self {
            path: None,
            current: Arc::new(RwLock::new(session)),
        }
    }

    /// Loads the session file; a missing, unreadable or expired file means
    /// "logged out".
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) if !session.is_expired(Utc::now()) => Some(session),
                Ok(_) => {
                    debug!("Stored session at {} has expired", path.display());
                    None
                }
                Err(e) => {
                    warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path: Some(path),
            current: Arc::new(RwLock::new(session)),
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        let guard = self.current.read().await;
        guard
            .as_ref()
            .filter(|s| !s.is_expired(Utc::now()))
            .map(|s| s.access_token.clone())
    }

    pub async fn replace(&self, session: Session) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, serde_json::to_vec_pretty(&session)?).await?;
        }
        *self.current.write().await = Some(session);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        *self.current.write().await = None;
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
