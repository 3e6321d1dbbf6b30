//! Object manager: the central metadata entity.
//!
//! # Responsibility
//! - Own one object-type record and persist it through the metadata service.
//! - Resolve the object's attributes, groups and classification on demand.
//! - Produce unsaved, pre-scoped attributes and groups.
//!
//! # Invariants
//! - `bk_obj_id` and `bk_classification_id` are non-empty before any
//!   create/update/delete call.
//! - Delete is guarded by `bk_obj_id` and `bk_classification_id` equality in
//!   addition to the identifier.
//! - A successful create flips `is_new` to `false`, so a later `save` updates.

use crate::codec::{to_map_str, MapStr};
use crate::condition::Condition;
use crate::error::{EntityKind, MetadataError, MetadataResult};
use crate::model::{Object, FIELD_CLASSIFICATION_ID, FIELD_OBJ_ID, FIELD_SUPPLIER_ACCOUNT};
use crate::remote::{CallOptions, MetadataService, RequestContext};
use crate::service::attribute::AttributeAccessor;
use crate::service::classification::ClassificationAccessor;
use crate::service::group::GroupAccessor;
use crate::service::{dispatch, ensure_required, parse_into, CallSite, EntityAccessor};
use std::fmt;
use std::sync::Arc;

/// Object-type definition bound to a metadata service and request context.
pub struct ObjectManager {
    record: Object,
    is_new: bool,
    ctx: RequestContext,
    service: Arc<dyn MetadataService>,
}

impl ObjectManager {
    /// Creates an empty, unsaved object.
    pub fn new(service: Arc<dyn MetadataService>, ctx: RequestContext) -> Self {
        Self {
            record: Object::default(),
            is_new: true,
            ctx,
            service,
        }
    }

    /// Wraps a record loaded from the metadata service.
    pub fn from_record(
        service: Arc<dyn MetadataService>,
        ctx: RequestContext,
        record: Object,
    ) -> Self {
        Self {
            record,
            is_new: false,
            ctx,
            service,
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn into_record(self) -> Object {
        self.record
    }

    /// Unsaved attribute scoped to this object's tenant and code.
    pub fn create_attribute(&self) -> AttributeAccessor {
        AttributeAccessor::scoped(
            Arc::clone(&self.service),
            self.ctx.clone(),
            &self.record.owner_id,
            &self.record.obj_id,
        )
    }

    /// Unsaved group scoped to this object's tenant and code.
    pub fn create_group(&self) -> GroupAccessor {
        GroupAccessor::scoped(
            Arc::clone(&self.service),
            self.ctx.clone(),
            &self.record.owner_id,
            &self.record.obj_id,
        )
    }

    /// Fetches this object's attributes; empty when none match.
    pub fn get_attributes(&self, opts: &CallOptions) -> MetadataResult<Vec<AttributeAccessor>> {
        let cond = Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id());
        let rows = dispatch(self.call_site("select_object_attributes"), opts, || {
            self.service.select_object_attributes(&self.ctx, opts, &cond.to_map_str())
        })?;

        Ok(rows
            .into_iter()
            .map(|item| {
                AttributeAccessor::from_record(Arc::clone(&self.service), self.ctx.clone(), item)
            })
            .collect())
    }

    /// Fetches this object's groups; empty when none match.
    pub fn get_groups(&self, opts: &CallOptions) -> MetadataResult<Vec<GroupAccessor>> {
        let cond = Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id());
        let rows = dispatch(self.call_site("select_groups"), opts, || {
            self.service.select_groups(&self.ctx, opts, &cond.to_map_str())
        })?;

        Ok(rows
            .into_iter()
            .map(|item| {
                GroupAccessor::from_record(Arc::clone(&self.service), self.ctx.clone(), item)
            })
            .collect())
    }

    /// Points this object at `classification`; local only.
    pub fn set_classification(&mut self, classification: &ClassificationAccessor) {
        self.record.obj_cls = classification.classification_id().to_string();
    }

    /// Resolves the classification referenced by `bk_classification_id`.
    ///
    /// Classification codes are unique per tenant by contract; when the
    /// service still returns several rows, the first one wins.
    pub fn get_classification(&self, opts: &CallOptions) -> MetadataResult<ClassificationAccessor> {
        let cond = Condition::new()
            .field(FIELD_CLASSIFICATION_ID)
            .eq(self.record.obj_cls.as_str());
        let rows = dispatch(self.call_site("select_classifications"), opts, || {
            self.service.select_classifications(&self.ctx, opts, &cond.to_map_str())
        })?;

        match rows.into_iter().next() {
            Some(item) => Ok(ClassificationAccessor::from_record(
                Arc::clone(&self.service),
                self.ctx.clone(),
                item,
            )),
            None => Err(MetadataError::NotFound {
                kind: EntityKind::Classification,
                key: self.record.obj_cls.clone(),
                referrer_kind: EntityKind::Object,
                referrer_key: self.record.obj_id.clone(),
            }),
        }
    }

    /// Identifier assigned by the metadata service; `0` before create.
    pub fn record_id(&self) -> i64 {
        self.record.id
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.record.obj_icon = icon.into();
    }

    pub fn icon(&self) -> &str {
        &self.record.obj_icon
    }

    /// Sets the object-type code (`bk_obj_id`).
    pub fn set_id(&mut self, object_id: impl Into<String>) {
        self.record.obj_id = object_id.into();
    }

    /// Object-type code (`bk_obj_id`).
    pub fn id(&self) -> &str {
        &self.record.obj_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.obj_name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.record.obj_name
    }

    pub fn set_is_pre(&mut self, is_pre: bool) {
        self.record.is_pre = is_pre;
    }

    pub fn is_pre(&self) -> bool {
        self.record.is_pre
    }

    pub fn set_is_paused(&mut self, is_paused: bool) {
        self.record.is_paused = is_paused;
    }

    pub fn is_paused(&self) -> bool {
        self.record.is_paused
    }

    pub fn set_position(&mut self, position: impl Into<String>) {
        self.record.position = position.into();
    }

    pub fn position(&self) -> &str {
        &self.record.position
    }

    /// Sets the tenant identifier (`bk_supplier_account`).
    pub fn set_supplier_account(&mut self, supplier_account: impl Into<String>) {
        self.record.owner_id = supplier_account.into();
    }

    pub fn supplier_account(&self) -> &str {
        &self.record.owner_id
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.record.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.record.creator = creator.into();
    }

    pub fn creator(&self) -> &str {
        &self.record.creator
    }

    pub fn set_modifier(&mut self, modifier: impl Into<String>) {
        self.record.modifier = modifier.into();
    }

    pub fn modifier(&self) -> &str {
        &self.record.modifier
    }

    /// Classification code (`bk_classification_id`).
    pub fn classification_id(&self) -> &str {
        &self.record.obj_cls
    }

    fn call_site(&self, operation: &'static str) -> CallSite<'_> {
        CallSite {
            operation,
            kind: EntityKind::Object,
            key: &self.record.obj_id,
            ctx: &self.ctx,
        }
    }

    fn delete_condition(&self) -> MapStr {
        Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(FIELD_CLASSIFICATION_ID)
            .eq(self.record.obj_cls.as_str())
            .to_map_str()
    }
}

impl fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectManager")
            .field("record", &self.record)
            .field("is_new", &self.is_new)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl EntityAccessor for ObjectManager {
    type Record = Object;

    const KIND: EntityKind = EntityKind::Object;

    fn record(&self) -> &Object {
        &self.record
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn is_exists(&self, opts: &CallOptions) -> MetadataResult<(Vec<Object>, bool)> {
        let cond = Condition::new()
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id())
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str());
        let rows = dispatch(self.call_site("select_objects"), opts, || {
            self.service.select_objects(&self.ctx, opts, &cond.to_map_str())
        })?;

        let exists = !rows.is_empty();
        Ok((rows, exists))
    }

    fn create(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let created = dispatch(self.call_site("create_object"), opts, || {
            self.service.create_object(&self.ctx, opts, &self.record)
        })?;

        self.record.id = created.id;
        self.is_new = false;
        Ok(())
    }

    fn update(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let data = to_map_str(&self.record);
        dispatch(self.call_site("update_object"), opts, || {
            self.service.update_object(&self.ctx, opts, self.record.id, &data)
        })
    }

    fn delete(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let cond = self.delete_condition();
        dispatch(self.call_site("delete_object"), opts, || {
            self.service.delete_object(&self.ctx, opts, self.record.id, &cond)
        })
    }

    fn parse(&mut self, data: &MapStr) -> MetadataResult<&Object> {
        parse_into(Self::KIND, &mut self.record, data)?;
        Ok(&self.record)
    }
}
