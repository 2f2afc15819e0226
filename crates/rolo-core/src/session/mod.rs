//! Session lifecycle and durable token persistence.
//!
//! The store cycles between two states for the process lifetime:
//!
//! - **Anonymous**: no token, no user
//! - **Authenticated**: a bearer token (and optionally the logged-in user)
//!
//! The token file is the only state surviving restarts. `restore` trusts a
//! persisted token without server validation; the first 401 from the backend
//! corrects a stale token via `clear`.

use crate::error::Result;
use crate::types::User;
use parking_lot::RwLock;
use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Owner of the device's authenticated identity and bearer credential.
///
/// `authenticated == token is present` holds by construction:
/// [`is_authenticated`](Self::is_authenticated) is derived from token
/// presence rather than tracked separately.
pub struct SessionStore {
    token_path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create an anonymous session backed by the given token file.
    pub fn new(token_path: PathBuf) -> Self {
        Self {
            token_path,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Restore a persisted session at startup. Returns whether a token was
    /// found. Issues no network call; a stale token is corrected by the
    /// first 401 response.
    pub fn restore(&self) -> bool {
        if !self.token_path.exists() {
            return false;
        }
        match fs::read_to_string(&self.token_path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    return false;
                }
                debug!("restored session from {}", self.token_path.display());
                self.state.write().token = Some(token.to_string());
                true
            }
            Err(e) => {
                warn!("failed to read token file: {}", e);
                false
            }
        }
    }

    /// Transition to Authenticated: persist the token with restricted
    /// permissions and set the in-memory fields.
    pub fn login(&self, token: String, user: Option<User>) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.token_path, &token)?;
        fs::set_permissions(&self.token_path, Permissions::from_mode(0o600))?;

        let mut state = self.state.write();
        state.token = Some(token);
        state.user = user;
        Ok(())
    }

    /// Transition to Anonymous: drop the in-memory fields and remove the
    /// persisted token. Called explicitly on logout, or by the API client
    /// when any request comes back 401.
    pub fn clear(&self) {
        {
            let mut state = self.state.write();
            state.token = None;
            state.user = None;
        }
        match fs::remove_file(&self.token_path) {
            Ok(()) => debug!("removed token file {}", self.token_path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove token file: {}", e),
        }
    }

    /// Current bearer token, read at request-issue time. Callers must not
    /// hold the returned copy beyond a single request.
    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    /// The logged-in user, when known.
    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }
}
