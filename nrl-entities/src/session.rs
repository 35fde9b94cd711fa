use std::fmt;

use uuid::Uuid;

/// Identifies one pass through the submission wizard.
///
/// The presentation layer mints a new id when a user starts drawing
/// and keeps it for the lifetime of that session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Uuid::new_v4().into()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Session ids are used as storage keys and must not contain
    /// anything but ASCII letters, digits, `-` and `_`.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(from: Uuid) -> Self {
        Self(from.as_simple().to_string())
    }
}

impl From<String> for SessionId {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for SessionId {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
