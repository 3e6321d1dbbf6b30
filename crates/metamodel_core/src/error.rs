//! Error taxonomy for metadata entity operations.
//!
//! # Invariants
//! - Validation errors are raised before any remote call.
//! - Remote application errors carry the service code and message verbatim.
//! - Transport failures stay distinct from application errors.

use crate::codec::CodecError;
use crate::remote::{CancelReason, TransportError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MetadataResult<T> = Result<T, MetadataError>;

/// Entity kinds managed by core, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Object,
    Attribute,
    Group,
    Classification,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Attribute => "attribute",
            Self::Group => "group",
            Self::Classification => "classification",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum MetadataError {
    /// A required field is empty; carries the wire field name.
    MissingRequiredField(&'static str),
    Codec(CodecError),
    CommunicationFailure(TransportError),
    RemoteApplication {
        code: i64,
        message: String,
    },
    /// No row matched where exactly one was expected.
    NotFound {
        kind: EntityKind,
        key: String,
        referrer_kind: EntityKind,
        referrer_key: String,
    },
    Cancelled(CancelReason),
}

impl MetadataError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::Codec(_) => "invalid_field_value",
            Self::CommunicationFailure(_) => "communication_failure",
            Self::RemoteApplication { .. } => "remote_application_error",
            Self::NotFound { .. } => "not_found",
            Self::Cancelled(_) => "cancelled",
        }
    }
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField(field) => {
                write!(f, "required field `{field}` must be set")
            }
            Self::Codec(err) => write!(f, "{err}"),
            Self::CommunicationFailure(err) => write!(f, "{err}"),
            Self::RemoteApplication { code, message } => {
                write!(f, "metadata service returned code {code}: {message}")
            }
            Self::NotFound {
                kind,
                key,
                referrer_kind,
                referrer_key,
            } => write!(
                f,
                "invalid {kind} `{key}` for the {referrer_kind} `{referrer_key}`"
            ),
            Self::Cancelled(reason) => write!(f, "request not dispatched: {reason}"),
        }
    }
}

impl Error for MetadataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::CommunicationFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for MetadataError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<TransportError> for MetadataError {
    fn from(value: TransportError) -> Self {
        Self::CommunicationFailure(value)
    }
}

impl From<CancelReason> for MetadataError {
    fn from(value: CancelReason) -> Self {
        Self::Cancelled(value)
    }
}
