//! Bearer token supply
//!
//! The token is resolved once into an [`AuthContext`] and passed into every
//! backend call, rather than being read from storage at each request.

use backoffice_core::config::AuthConfig;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Credentials attached to backend requests
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthContext {
    /// Context carrying the given token; blank tokens count as absent
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// Context without credentials
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    /// Resolve the token from configuration, then from the session file
    ///
    /// A missing token is not an error: it is logged and requests are sent
    /// without an `Authorization` header.
    pub fn from_config(config: &AuthConfig) -> Self {
        if let Some(token) = config.token.as_deref() {
            let context = Self::with_token(token);
            if context.is_authenticated() {
                debug!("using bearer token from configuration");
                return context;
            }
        }

        let session = SessionFile::new(&config.session_file, &config.token_key);
        match session.load() {
            Ok(Some(token)) => {
                debug!(path = %config.session_file.display(), "using bearer token from session file");
                Self::with_token(token)
            }
            Ok(None) => {
                warn!(
                    path = %config.session_file.display(),
                    "no bearer token found; requests will be sent unauthenticated"
                );
                Self::anonymous()
            }
            Err(e) => {
                warn!(
                    path = %config.session_file.display(),
                    error = %e,
                    "could not read session file; requests will be sent unauthenticated"
                );
                Self::anonymous()
            }
        }
    }

    /// Whether a token is present
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header, if any
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Persisted client session: a JSON object holding the token under a fixed key
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
    key: String,
}

impl SessionFile {
    /// Session file at `path` storing the token under `key`
    pub fn new(path: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token
    ///
    /// Returns `Ok(None)` when the file does not exist or holds no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON object.
    pub fn load(&self) -> ClientResult<Option<String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ClientError::configuration(format!(
                    "cannot read session file {}: {e}",
                    self.path.display()
                )));
            }
        };

        let Value::Object(map) = serde_json::from_str::<Value>(&text)? else {
            return Err(ClientError::configuration(format!(
                "session file {} is not a JSON object",
                self.path.display()
            )));
        };

        Ok(map
            .get(&self.key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string))
    }

    /// Store a token, keeping any other keys already in the file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, token: &str) -> ClientResult<()> {
        let mut map = self.read_object().unwrap_or_default();
        map.insert(self.key.clone(), Value::String(token.trim().to_string()));
        self.write_object(&map)
    }

    /// Remove the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn clear(&self) -> ClientResult<()> {
        let Some(mut map) = self.read_object() else {
            return Ok(());
        };
        map.remove(&self.key);
        self.write_object(&map)
    }

    fn read_object(&self) -> Option<Map<String, Value>> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&text).ok()? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn write_object(&self, map: &Map<String, Value>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::configuration(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let text = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, text).map_err(|e| {
            ClientError::configuration(format!(
                "cannot write session file {}: {e}",
                self.path.display()
            ))
        })
    }
}
