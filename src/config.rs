//! Client configuration loading.
//!
//! A [`ClientConfig`] is the on-disk JSON form of a server identity. The
//! stored fields may be ciphertext: the reference deployment keeps them
//! DES-encrypted under a site key. Decryption stays outside this crate;
//! [`ClientConfig::into_identity`] applies whatever closure the caller
//! supplies to all three fields. Decrypted passwords pass through a
//! [`zeroize::Zeroizing`] buffer and the resulting [`ServerIdentity`] wipes
//! its password on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use channel::ServerIdentity;

/// Client configuration as stored on disk.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// Server host or address, possibly encrypted.
    pub host: String,
    /// Account name, possibly encrypted.
    pub user: String,
    /// Account password, possibly encrypted.
    pub password: String,
}

/// Failure while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file was not valid JSON for a [`ClientConfig`].
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ClientConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigFileError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds a [`ServerIdentity`], applying `decrypt` to every field.
    ///
    /// The decrypted password is held in a zeroizing buffer until it moves
    /// into the identity.
    pub fn into_identity<E>(
        self,
        mut decrypt: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<ServerIdentity, E> {
        let host = decrypt(&self.host)?;
        let user = decrypt(&self.user)?;
        let password = Zeroizing::new(decrypt(&self.password)?);
        Ok(ServerIdentity::new(host, user, password.as_str()))
    }

    /// Builds a [`ServerIdentity`] from plaintext fields.
    #[must_use]
    pub fn into_identity_unencrypted(self) -> ServerIdentity {
        ServerIdentity::new(self.host, self.user, self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn from_path_round_trips_json() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("client.json");
        fs::write(
            &path,
            r#"{"host":"ftp.example.net","user":"archive","password":"pw"}"#,
        )
        .expect("write config");

        let config = ClientConfig::from_path(&path).expect("load config");
        assert_eq!(config.host, "ftp.example.net");
        assert_eq!(config.user, "archive");
        assert_eq!(config.password, "pw");
    }

    #[test]
    fn missing_file_reports_read_error() {
        let error = ClientConfig::from_path(Path::new("/no/such/config.json"))
            .expect_err("missing file");
        assert!(matches!(error, ConfigFileError::Read { .. }));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "{not json").expect("write config");

        let error = ClientConfig::from_path(&path).expect_err("broken file");
        assert!(matches!(error, ConfigFileError::Parse { .. }));
    }

    #[test]
    fn into_identity_decrypts_every_field() {
        let config = ClientConfig {
            host: "tsoh".to_string(),
            user: "resu".to_string(),
            password: "drowssap".to_string(),
        };
        let identity = config
            .into_identity(|field| Ok::<_, Infallible>(field.chars().rev().collect()))
            .expect("decrypt");
        assert_eq!(identity.host(), "host");
        assert_eq!(identity.user(), "user");
        assert_eq!(identity.password(), "password");
    }

    #[test]
    fn decryption_failure_propagates() {
        let config = ClientConfig {
            host: "h".to_string(),
            user: "u".to_string(),
            password: "p".to_string(),
        };
        let error = config
            .into_identity(|_| Err::<String, _>("bad key"))
            .expect_err("decrypt failure");
        assert_eq!(error, "bad key");
    }
}
