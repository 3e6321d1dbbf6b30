//! Contract of the remote metadata service consumed by core.
//!
//! # Responsibility
//! - Define the request/response surface core needs from the metadata
//!   service, independent of transport.
//! - Keep application-level outcomes (response codes) separate from
//!   transport failures.
//!
//! # Invariants
//! - Implementations must be safe for concurrent use (`Send + Sync`) and hold
//!   no per-caller mutable state.
//! - Every operation receives the caller's `CallOptions` so implementations
//!   can honor the deadline.

mod context;

pub use context::{CallOptions, CancelReason, CancellationToken, RequestContext, DEFAULT_LANGUAGE};

use crate::codec::MapStr;
use crate::model::{Attribute, Classification, Group, Object};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Response code the metadata service uses for success.
pub const CODE_SUCCESS: i64 = 0;

/// Response envelope `{code, errMsg, data}` returned by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub err_msg: String,
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            err_msg: String::new(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

impl<T: Default> ResponseEnvelope<T> {
    /// Application-level failure with empty payload.
    pub fn failure(code: i64, err_msg: impl Into<String>) -> Self {
        Self {
            code,
            err_msg: err_msg.into(),
            data: T::default(),
        }
    }
}

/// Payload of create responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

/// The metadata service could not be reached or did not answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "metadata service request failed: {}", self.message)
    }
}

impl Error for TransportError {}

pub type TransportResult<T> = Result<ResponseEnvelope<T>, TransportError>;

/// Remote metadata-service operations used by the entity accessors.
///
/// Conditions are documents produced by [`crate::condition::Condition`];
/// update payloads are produced by the tag-mapping codec.
pub trait MetadataService: Send + Sync {
    fn select_objects(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Object>>;

    fn create_object(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        object: &Object,
    ) -> TransportResult<CreatedId>;

    fn update_object(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()>;

    fn delete_object(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()>;

    fn select_object_attributes(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Attribute>>;

    fn create_object_attribute(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        attribute: &Attribute,
    ) -> TransportResult<CreatedId>;

    fn update_object_attribute(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()>;

    fn delete_object_attribute(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()>;

    fn select_groups(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Group>>;

    fn create_group(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        group: &Group,
    ) -> TransportResult<CreatedId>;

    fn update_group(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()>;

    fn delete_group(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()>;

    fn select_classifications(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Classification>>;

    fn create_classification(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        classification: &Classification,
    ) -> TransportResult<CreatedId>;

    fn update_classification(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()>;

    fn delete_classification(
        &self,
        ctx: &RequestContext,
        opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()>;
}
