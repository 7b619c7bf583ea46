//! Secrets loaded from a local `.env`-style file.
//!
//! Keys are looked up by file path rather than through the process
//! environment, so different pulls can point at different files and a
//! stray exported variable never shadows the file's contents.  All
//! required secrets are resolved up front: a missing key aborts the
//! pipeline before any client is constructed.

use std::collections::HashMap;
use std::path::Path;

use crate::error::PullError;

/// A parsed environment file.
///
/// Holds the key/value pairs of a single file; later occurrences of a
/// key win, matching dotenv semantics.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: String,
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Parse the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PullError> {
        let path = path.as_ref();
        let mut vars = HashMap::new();
        for entry in dotenvy::from_path_iter(path)? {
            let (key, value) = entry?;
            vars.insert(key, value);
        }
        Ok(Self {
            path: path.display().to_string(),
            vars,
        })
    }

    /// Look up an optional key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Look up a required key, failing with the key name and file path.
    pub fn require(&self, key: &str) -> Result<String, PullError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| PullError::MissingSecret {
                key: key.to_string(),
                path: self.path.clone(),
            })
    }

    /// The path this file was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Secrets for the client-credentials exchange against the queue IDP.
///
/// Read once per pipeline run and discarded at process exit.  None of
/// the fields are ever logged.
#[derive(Debug, Clone)]
pub struct QueueCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub session_cookie: String,
}

impl QueueCredentials {
    pub const CLIENT_ID: &'static str = "QUEUE_OAUTH_CLIENT_ID";
    pub const CLIENT_SECRET: &'static str = "QUEUE_OAUTH_CLIENT_SECRET";
    pub const COOKIE: &'static str = "QUEUE_OAUTH_COOKIE";

    /// Resolve all three secrets, failing fast on the first missing one.
    pub fn from_env_file(env: &EnvFile) -> Result<Self, PullError> {
        Ok(Self {
            client_id: env.require(Self::CLIENT_ID)?,
            client_secret: env.require(Self::CLIENT_SECRET)?,
            session_cookie: env.require(Self::COOKIE)?,
        })
    }
}

/// API keys for the account directory.
///
/// The publishable example key is required; the personal key is
/// optional so that the committed `.env.example` works out of the box.
#[derive(Debug, Clone)]
pub struct DirectoryKeys {
    personal: Option<String>,
    example: String,
}

/// The key chosen by [`DirectoryKeys::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKey<'a> {
    Personal(&'a str),
    Example(&'a str),
}

impl DirectoryKeys {
    pub const PERSONAL: &'static str = "DESK_REST_API_KEY";
    pub const EXAMPLE: &'static str = "DESK_REST_EXAMPLE_API_KEY";

    pub fn from_env_file(env: &EnvFile) -> Result<Self, PullError> {
        Ok(Self {
            personal: env.get(Self::PERSONAL).map(str::to_string),
            example: env.require(Self::EXAMPLE)?,
        })
    }

    /// Pick the key to authenticate with.
    ///
    /// Prefers the personal key whenever both are present; a pull that
    /// must use the publishable key has to run against a file with no
    /// personal key in it.
    pub fn select(&self) -> DirectoryKey<'_> {
        match &self.personal {
            Some(key) => DirectoryKey::Personal(key),
            None => DirectoryKey::Example(&self.example),
        }
    }
}

impl DirectoryKey<'_> {
    /// The raw key material.
    pub fn secret(&self) -> &str {
        match self {
            Self::Personal(key) | Self::Example(key) => key,
        }
    }

    /// Short label for logging which credential set is active.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal(_) => "personal",
            Self::Example(_) => "example",
        }
    }
}
