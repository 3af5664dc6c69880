use crate::error::ScrapeError;
use crate::types::Session;

use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Cookie file backing the saved session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session. `Ok(None)` when no file exists yet.
    pub fn load(&self) -> Result<Option<Session>, ScrapeError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no saved session found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let session: Session = serde_json::from_str(&contents)?;

        let expired = session.expired_count(Utc::now());
        if expired > 0 {
            warn!(
                path = %self.path.display(),
                expired,
                total = session.cookies.len(),
                "saved session contains expired cookies"
            );
        }
        Ok(Some(session))
    }

    /// Overwrite the saved session with `session`.
    pub fn save(&self, session: &Session) -> Result<(), ScrapeError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, payload)?;
        info!(path = %self.path.display(), cookies = session.cookies.len(), "session saved");
        Ok(())
    }
}
