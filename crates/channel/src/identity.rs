use std::fmt;

use zeroize::Zeroize;

use crate::error::ChannelError;

/// Identity of the single remote server a session talks to.
///
/// Immutable once constructed. The current remote path is deliberately not
/// part of the identity: it lives on the channel as a separate mutable field
/// so repointing the path mid-walk can never change which server is being
/// addressed.
#[derive(Clone)]
pub struct ServerIdentity {
    host: String,
    user: String,
    password: String,
}

impl ServerIdentity {
    /// Creates an identity from its three parts.
    ///
    /// Validation is deferred to the first network operation so an identity
    /// with placeholder fields can be constructed and configured freely.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Server host or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Account name.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Checks that no field is empty or whitespace-only.
    ///
    /// Every channel operation calls this before touching the transport.
    pub fn validate(&self) -> Result<(), ChannelError> {
        for (field, value) in [
            ("host", &self.host),
            ("user", &self.user),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ChannelError::Config { field });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerIdentity")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for ServerIdentity {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
