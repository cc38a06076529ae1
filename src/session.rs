// Token persistence. One plaintext file holds the bearer token between
// runs; the store keeps an in-memory copy once it has been read or written.

use crate::error::{CourierError, CourierResult};
use log::{debug, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name used under the home directory.
pub const TOKEN_FILE_NAME: &str = ".safe_courier_token";

/// `~/.safe_courier_token`, or `./.safe_courier_token` when the home
/// directory cannot be determined.
pub fn default_token_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(TOKEN_FILE_NAME)
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    cached: Option<String>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore {
            path: path.into(),
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the token file and the cached copy.
    pub fn save(&mut self, token: &str) -> CourierResult<()> {
        std::fs::write(&self.path, token).map_err(|source| self.io_error(source))?;
        info!("session token saved to {}", self.path.display());
        self.cached = Some(token.to_string());
        Ok(())
    }

    /// Current token. A missing or empty file is `None`; any other read
    /// failure is an error.
    pub fn load(&mut self) -> CourierResult<Option<String>> {
        if let Some(token) = &self.cached {
            return Ok(Some(token.clone()));
        }
        match std::fs::read_to_string(&self.path) {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => {
                self.cached = Some(token.clone());
                Ok(Some(token))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no token file at {}", self.path.display());
                Ok(None)
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Delete the token file and forget the cached copy. Deleting a file
    /// that is already gone succeeds.
    pub fn clear(&mut self) -> CourierResult<()> {
        self.cached = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("session token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CourierError {
        CourierError::TokenStore {
            path: self.path.clone(),
            source,
        }
    }
}
