//! Metadata-model layer of a configuration-management platform.
//!
//! Object types, their attributes, presentation groups and classifications
//! are managed here and persisted through a remote metadata service consumed
//! via [`remote::MetadataService`].

pub mod codec;
pub mod condition;
pub mod error;
pub mod logging;
pub mod model;
pub mod privilege;
pub mod remote;
pub mod service;

pub use codec::{CodecError, MapStr, Tagged};
pub use condition::{Condition, Operator};
pub use error::{EntityKind, MetadataError, MetadataResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::{Attribute, Classification, Group, Object};
pub use privilege::{PermissionOperation, PrivilegeCapability, PrivilegeOperation};
pub use remote::{
    CallOptions, CancelReason, CancellationToken, CreatedId, MetadataService, RequestContext,
    ResponseEnvelope, TransportError, TransportResult, CODE_SUCCESS,
};
pub use service::attribute::AttributeAccessor;
pub use service::classification::ClassificationAccessor;
pub use service::group::GroupAccessor;
pub use service::object::ObjectManager;
pub use service::EntityAccessor;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
