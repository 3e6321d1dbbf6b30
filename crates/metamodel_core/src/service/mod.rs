//! Entity managers over the remote metadata service.
//!
//! # Responsibility
//! - Bind each metadata record to a service handle and a request context.
//! - Dispatch create/update/delete/select calls and translate responses.
//! - Resolve relationships between objects, attributes, groups and
//!   classifications on demand.
//!
//! # Invariants
//! - Required fields are validated before any persistence call.
//! - Cancelled or expired `CallOptions` never reach the service.
//! - Nothing is cached: every relationship query is a fresh round trip.
//! - Failures are logged as metadata-only events and returned, never
//!   swallowed.

pub mod attribute;
pub mod classification;
pub mod group;
pub mod object;

use crate::codec::{missing_required, set_from_map_str, to_map_str, MapStr, Tagged};
use crate::error::{EntityKind, MetadataError, MetadataResult};
use crate::logging::log_field;
use crate::remote::{CallOptions, RequestContext, TransportResult};
use log::{debug, error, warn};
use std::time::Instant;

/// Capability set shared by every entity accessor.
pub trait EntityAccessor {
    type Record: Tagged;

    /// Entity kind used in diagnostics.
    const KIND: EntityKind;

    fn record(&self) -> &Self::Record;

    /// `true` when `save` will create instead of update.
    fn is_new(&self) -> bool;

    /// Looks up records matching this entity's identity within the tenant.
    ///
    /// Returns the matches and whether any matched; zero rows is not an
    /// error.
    fn is_exists(&self, opts: &CallOptions) -> MetadataResult<(Vec<Self::Record>, bool)>;

    fn create(&mut self, opts: &CallOptions) -> MetadataResult<()>;

    fn update(&mut self, opts: &CallOptions) -> MetadataResult<()>;

    fn delete(&mut self, opts: &CallOptions) -> MetadataResult<()>;

    /// Maps `data` into the record and validates required fields.
    ///
    /// Never calls the metadata service.
    fn parse(&mut self, data: &MapStr) -> MetadataResult<&Self::Record>;

    /// Serializes every declared field in table order.
    fn to_map_str(&self) -> MetadataResult<MapStr> {
        Ok(to_map_str(self.record()))
    }

    /// Creates when `is_new`, updates otherwise.
    fn save(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        if self.is_new() {
            self.create(opts)
        } else {
            self.update(opts)
        }
    }
}

/// Identity of one remote call for log events.
pub(crate) struct CallSite<'a> {
    pub operation: &'static str,
    pub kind: EntityKind,
    pub key: &'a str,
    pub ctx: &'a RequestContext,
}

/// Runs one remote call and unwraps its response envelope.
pub(crate) fn dispatch<T>(
    site: CallSite<'_>,
    opts: &CallOptions,
    call: impl FnOnce() -> TransportResult<T>,
) -> MetadataResult<T> {
    if let Err(reason) = opts.check() {
        warn!(
            "event=remote_call module=service op={} entity={} key={} request_id={} status=skipped reason={}",
            site.operation,
            site.kind,
            log_field(site.key),
            site.ctx.request_id(),
            reason
        );
        return Err(reason.into());
    }

    let started_at = Instant::now();
    let envelope = match call() {
        Ok(envelope) => envelope,
        Err(err) => {
            error!(
                "event=remote_call module=service op={} entity={} key={} request_id={} status=error duration_ms={} error_code=communication_failure error={}",
                site.operation,
                site.kind,
                log_field(site.key),
                site.ctx.request_id(),
                started_at.elapsed().as_millis(),
                log_field(err.message())
            );
            return Err(err.into());
        }
    };

    if !envelope.is_success() {
        error!(
            "event=remote_call module=service op={} entity={} key={} request_id={} status=error duration_ms={} error_code=remote_application_error remote_code={} error={}",
            site.operation,
            site.kind,
            log_field(site.key),
            site.ctx.request_id(),
            started_at.elapsed().as_millis(),
            envelope.code,
            log_field(&envelope.err_msg)
        );
        return Err(MetadataError::RemoteApplication {
            code: envelope.code,
            message: envelope.err_msg,
        });
    }

    debug!(
        "event=remote_call module=service op={} entity={} key={} request_id={} status=ok duration_ms={}",
        site.operation,
        site.kind,
        log_field(site.key),
        site.ctx.request_id(),
        started_at.elapsed().as_millis()
    );
    Ok(envelope.data)
}

/// Fails with the first empty required field of `record`.
pub(crate) fn ensure_required<T: Tagged>(kind: EntityKind, record: &T) -> MetadataResult<()> {
    match missing_required(record) {
        Some(field) => {
            warn!(
                "event=validate module=service entity={} status=error error_code=missing_required_field field={}",
                kind, field
            );
            Err(MetadataError::MissingRequiredField(field))
        }
        None => Ok(()),
    }
}

/// Shared `parse` body: codec mapping followed by required-field checks.
pub(crate) fn parse_into<T: Tagged>(
    kind: EntityKind,
    record: &mut T,
    data: &MapStr,
) -> MetadataResult<()> {
    set_from_map_str(record, data)?;
    ensure_required(kind, record)
}
