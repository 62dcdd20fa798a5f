//! The signed-in user.
//!
//! The session is loaded once at startup and handed explicitly to the
//! screens that need it; nothing reads it from ambient state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::config_dir;
use crate::model::{Role, User};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub const fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Record a server-confirmed role change.
    pub fn set_role(&mut self, role: Role) {
        if let Some(user) = &mut self.user {
            user.role = Some(role);
        }
    }
}

pub fn session_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(SESSION_FILE))
}

pub fn load() -> color_eyre::Result<Session> {
    let Some(path) = session_path() else {
        tracing::debug!("No config directory found, starting signed out");
        return Ok(Session::default());
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> color_eyre::Result<Session> {
    if !path.exists() {
        return Ok(Session::default());
    }
    let content = fs::read_to_string(path)?;
    let session: Session = serde_json::from_str(&content)?;
    tracing::debug!(?path, "Loaded session");
    Ok(session)
}

pub fn save(session: &Session) -> color_eyre::Result<()> {
    let Some(path) = session_path() else {
        tracing::warn!("Could not determine config directory, session not saved");
        return Ok(());
    };
    save_to(&path, session)
}

pub fn save_to(path: &Path, session: &Session) -> color_eyre::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_string_pretty(session)?)?;
    tracing::debug!(?path, "Saved session");
    Ok(())
}
