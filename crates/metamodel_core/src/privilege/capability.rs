//! Privilege capability names used by the permission surface.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Privilege capability an operation can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeCapability {
    Permission,
    UserGroup,
    Role,
}

impl PrivilegeCapability {
    /// Stable string id used in log fields and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Permission => PRIVILEGE_CAPABILITY_PERMISSION,
            Self::UserGroup => PRIVILEGE_CAPABILITY_USER_GROUP,
            Self::Role => PRIVILEGE_CAPABILITY_ROLE,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Permission => "Grant or revoke permission entries on metadata resources.",
            Self::UserGroup => "Manage user_group membership within a tenant.",
            Self::Role => "Manage role definitions bound to permission sets.",
        }
    }
}

impl Display for PrivilegeCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PRIVILEGE_CAPABILITY_PERMISSION: &str = "permission";
pub const PRIVILEGE_CAPABILITY_USER_GROUP: &str = "user_group";
pub const PRIVILEGE_CAPABILITY_ROLE: &str = "role";

const SUPPORTED_PRIVILEGE_CAPABILITY_STRINGS: &[&str] = &[
    PRIVILEGE_CAPABILITY_PERMISSION,
    PRIVILEGE_CAPABILITY_USER_GROUP,
    PRIVILEGE_CAPABILITY_ROLE,
];

pub fn supported_privilege_capability_strings() -> &'static [&'static str] {
    SUPPORTED_PRIVILEGE_CAPABILITY_STRINGS
}

/// Parses one capability from its string id. Matching is exact.
pub fn parse_privilege_capability(
    value: &str,
) -> Result<PrivilegeCapability, PrivilegeCapabilityError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(PrivilegeCapabilityError::EmptyCapability);
    }

    match normalized {
        PRIVILEGE_CAPABILITY_PERMISSION => Ok(PrivilegeCapability::Permission),
        PRIVILEGE_CAPABILITY_USER_GROUP => Ok(PrivilegeCapability::UserGroup),
        PRIVILEGE_CAPABILITY_ROLE => Ok(PrivilegeCapability::Role),
        other => Err(PrivilegeCapabilityError::UnsupportedCapability(
            other.to_string(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeCapabilityError {
    EmptyCapability,
    UnsupportedCapability(String),
}

impl Display for PrivilegeCapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCapability => write!(f, "privilege capability value must not be empty"),
            Self::UnsupportedCapability(value) => {
                write!(f, "privilege capability is unsupported: {value}")
            }
        }
    }
}

impl Error for PrivilegeCapabilityError {}
