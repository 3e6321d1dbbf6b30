//! Privilege surface: capability names and the permission operation.

pub mod capability;
pub mod operation;

pub use capability::{
    parse_privilege_capability, supported_privilege_capability_strings, PrivilegeCapability,
    PrivilegeCapabilityError,
};
pub use operation::{
    PermissionAccessor, PermissionOperation, PrivilegeOperation, RoleAccessor, UserGroupAccessor,
};
