//! Permission operation entry point.
//!
//! Each accessor binds the shared service handle to one request context and
//! names the capability it operates on.

use crate::logging::log_field;
use crate::privilege::capability::PrivilegeCapability;
use crate::remote::{MetadataService, RequestContext};
use log::debug;
use std::sync::Arc;

/// Hands out capability-scoped accessors for one tenant request.
pub trait PermissionOperation {
    fn permission(&self, ctx: &RequestContext) -> PermissionAccessor;

    fn user_group(&self, ctx: &RequestContext) -> UserGroupAccessor;

    fn role(&self, ctx: &RequestContext) -> RoleAccessor;
}

/// Service handle and context shared by the capability accessors.
#[derive(Clone)]
struct Binding {
    service: Arc<dyn MetadataService>,
    ctx: RequestContext,
}

impl Binding {
    fn new(
        capability: PrivilegeCapability,
        service: &Arc<dyn MetadataService>,
        ctx: &RequestContext,
    ) -> Self {
        debug!(
            "event=privilege_bind module=privilege capability={} owner={} request_id={} status=ok",
            capability,
            log_field(ctx.owner_id()),
            ctx.request_id()
        );
        Self {
            service: Arc::clone(service),
            ctx: ctx.clone(),
        }
    }
}

macro_rules! capability_accessor {
    ($(#[$meta:meta])* $name:ident, $capability:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            binding: Binding,
        }

        impl $name {
            pub fn capability(&self) -> PrivilegeCapability {
                $capability
            }

            pub fn context(&self) -> &RequestContext {
                &self.binding.ctx
            }

            pub fn service(&self) -> &Arc<dyn MetadataService> {
                &self.binding.service
            }
        }
    };
}

capability_accessor!(
    /// Permission entries of the bound tenant.
    PermissionAccessor,
    PrivilegeCapability::Permission
);
capability_accessor!(
    /// User groups of the bound tenant.
    UserGroupAccessor,
    PrivilegeCapability::UserGroup
);
capability_accessor!(
    /// Roles of the bound tenant.
    RoleAccessor,
    PrivilegeCapability::Role
);

/// `PermissionOperation` backed by a metadata service handle.
pub struct PrivilegeOperation {
    service: Arc<dyn MetadataService>,
}

impl PrivilegeOperation {
    pub fn new(service: Arc<dyn MetadataService>) -> Self {
        Self { service }
    }
}

impl PermissionOperation for PrivilegeOperation {
    fn permission(&self, ctx: &RequestContext) -> PermissionAccessor {
        PermissionAccessor {
            binding: Binding::new(PrivilegeCapability::Permission, &self.service, ctx),
        }
    }

    fn user_group(&self, ctx: &RequestContext) -> UserGroupAccessor {
        UserGroupAccessor {
            binding: Binding::new(PrivilegeCapability::UserGroup, &self.service, ctx),
        }
    }

    fn role(&self, ctx: &RequestContext) -> RoleAccessor {
        RoleAccessor {
            binding: Binding::new(PrivilegeCapability::Role, &self.service, ctx),
        }
    }
}
