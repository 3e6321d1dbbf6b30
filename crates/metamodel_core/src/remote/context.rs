//! Per-request tenant context and per-call options.
//!
//! # Responsibility
//! - Carry tenant headers (owner, language, user) into every remote call.
//! - Expose timeout and cancellation to every remote-calling operation.
//!
//! # Invariants
//! - `request_id` is generated once per context and never changes.
//! - A cancelled token stays cancelled for all clones.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Language used when the caller does not supply one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Tenant headers sent with every request to the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    owner_id: String,
    language: String,
    user: String,
    request_id: Uuid,
}

impl RequestContext {
    /// Creates a context for one tenant with a fresh request id.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            user: String::new(),
            request_id: Uuid::new_v4(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Correlation id echoed in core log events.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

/// Shared cancellation flag.
///
/// Clones observe the same flag, so a caller can keep one handle and pass
/// another into `CallOptions`.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Why a call was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled,
    DeadlineExceeded,
}

impl CancelReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

impl Display for CancelReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeout and cancellation for remote-calling operations.
///
/// The deadline is fixed when the timeout is set, so one `CallOptions` value
/// can bound a sequence of calls.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    deadline: Option<Instant>,
    cancellation: Option<CancellationToken>,
}

impl CallOptions {
    /// Options without deadline or cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeout too large to represent as an `Instant` leaves no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when no deadline is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails when the call must not be dispatched anymore.
    pub fn check(&self) -> Result<(), CancelReason> {
        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Err(CancelReason::Cancelled);
        }
        if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            return Err(CancelReason::DeadlineExceeded);
        }
        Ok(())
    }
}
