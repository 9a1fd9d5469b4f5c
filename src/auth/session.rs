use crate::auth::error::AuthError;
use crate::models::UserProfile;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Fixed name the cached profile is stored under
pub const SESSION_KEY: &str = "realtyos_user";

/// Client-local cache of the signed-in profile
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<UserProfile>, AuthError>;
    fn set(&self, user: &UserProfile) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Stores the profile as JSON in `<dir>/realtyos_user.json`
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SESSION_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<UserProfile>, AuthError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                // A corrupt cache means no session, not a failure
                warn!("Ignoring unreadable session cache {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn set(&self, user: &UserProfile) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, json)?;
        debug!("Cached session for {} at {}", user.email, self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, handy for tests and headless runs
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<UserProfile>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<UserProfile>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.lock().clone())
    }

    fn set(&self, user: &UserProfile) -> Result<(), AuthError> {
        *self.lock() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.lock() = None;
        Ok(())
    }
}
