use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::id::UserId;

/// Roles granted by the identity provider that matter to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Admin,
    Approver,
}

impl Role {
    pub const fn is_reviewer(self) -> bool {
        matches!(self, Self::Admin | Self::Approver)
    }
}

/// Deployment-wide access rules for creating and reading obstacles.
///
/// Both modes are self-consistent and never mixed. Editing, deleting
/// and reviewing are governed by ownership and roles in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AccessPolicy {
    /// Anonymous users may register obstacles and everyone may see all of them.
    Open,
    /// Users must be logged in and only see their own obstacles,
    /// reviewers see everything.
    #[default]
    Authenticated,
}

/// Identity and role claims of the caller of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<UserId>,
    pub roles: Vec<Role>,
}

impl AuthContext {
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            roles: Vec::new(),
        }
    }

    pub fn user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// The id of the authenticated user, ignoring blank claims.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref().filter(|id| id.is_valid())
    }

    pub fn is_reviewer(&self) -> bool {
        self.roles.iter().any(|role| role.is_reviewer())
    }
}
