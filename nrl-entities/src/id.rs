use std::{borrow::Borrow, fmt, num::ParseIntError, str::FromStr};

/// Row identifier of a registered obstacle.
///
/// Assigned by the store when the obstacle is created and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(i64);

impl ObstacleId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn to_inner(self) -> i64 {
        self.0
    }
}

impl From<i64> for ObstacleId {
    fn from(from: i64) -> Self {
        Self(from)
    }
}

impl From<ObstacleId> for i64 {
    fn from(from: ObstacleId) -> Self {
        from.0
    }
}

impl FromStr for ObstacleId {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a user as issued by the identity provider.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for UserId {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for UserId {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<UserId> for String {
    fn from(from: UserId) -> Self {
        from.0
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
