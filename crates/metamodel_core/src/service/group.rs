//! Group accessor: presentation groupings of an object's attributes.

use crate::codec::{to_map_str, MapStr};
use crate::condition::Condition;
use crate::error::{EntityKind, MetadataResult};
use crate::model::attribute::ATTRIBUTE_FIELD_PROPERTY_GROUP;
use crate::model::group::{Group, GROUP_FIELD_GROUP_ID};
use crate::model::{FIELD_OBJ_ID, FIELD_SUPPLIER_ACCOUNT};
use crate::remote::{CallOptions, MetadataService, RequestContext};
use crate::service::attribute::AttributeAccessor;
use crate::service::{dispatch, ensure_required, parse_into, CallSite, EntityAccessor};
use std::fmt;
use std::sync::Arc;

/// Group record bound to a metadata service and request context.
pub struct GroupAccessor {
    record: Group,
    is_new: bool,
    ctx: RequestContext,
    service: Arc<dyn MetadataService>,
}

impl GroupAccessor {
    pub fn new(service: Arc<dyn MetadataService>, ctx: RequestContext) -> Self {
        Self {
            record: Group::default(),
            is_new: true,
            ctx,
            service,
        }
    }

    pub fn from_record(
        service: Arc<dyn MetadataService>,
        ctx: RequestContext,
        record: Group,
    ) -> Self {
        Self {
            record,
            is_new: false,
            ctx,
            service,
        }
    }

    pub(crate) fn scoped(
        service: Arc<dyn MetadataService>,
        ctx: RequestContext,
        owner_id: &str,
        obj_id: &str,
    ) -> Self {
        let mut accessor = Self::new(service, ctx);
        accessor.record.owner_id = owner_id.to_string();
        accessor.record.obj_id = obj_id.to_string();
        accessor
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn into_record(self) -> Group {
        self.record
    }

    /// Unsaved attribute placed in this group.
    pub fn create_attribute(&self) -> AttributeAccessor {
        let mut attribute = AttributeAccessor::scoped(
            Arc::clone(&self.service),
            self.ctx.clone(),
            &self.record.owner_id,
            &self.record.obj_id,
        );
        attribute.set_property_group(self.record.group_id.as_str());
        attribute
    }

    /// Fetches the attributes rendered in this group; empty when none match.
    pub fn get_attributes(&self, opts: &CallOptions) -> MetadataResult<Vec<AttributeAccessor>> {
        let cond = Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id())
            .field(ATTRIBUTE_FIELD_PROPERTY_GROUP)
            .eq(self.record.group_id.as_str());
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

    pub fn record_id(&self) -> i64 {
        self.record.id
    }

    pub fn object_id(&self) -> &str {
        &self.record.obj_id
    }

    pub fn supplier_account(&self) -> &str {
        &self.record.owner_id
    }

    pub fn set_group_id(&mut self, group_id: impl Into<String>) {
        self.record.group_id = group_id.into();
    }

    pub fn group_id(&self) -> &str {
        &self.record.group_id
    }

    pub fn set_group_name(&mut self, group_name: impl Into<String>) {
        self.record.group_name = group_name.into();
    }

    pub fn group_name(&self) -> &str {
        &self.record.group_name
    }

    pub fn set_group_index(&mut self, index: i64) {
        self.record.group_index = index;
    }

    pub fn group_index(&self) -> i64 {
        self.record.group_index
    }

    pub fn set_is_default(&mut self, is_default: bool) {
        self.record.is_default = is_default;
    }

    pub fn is_default(&self) -> bool {
        self.record.is_default
    }

    pub fn set_is_pre(&mut self, is_pre: bool) {
        self.record.is_pre = is_pre;
    }

    pub fn is_pre(&self) -> bool {
        self.record.is_pre
    }

    fn call_site(&self, operation: &'static str) -> CallSite<'_> {
        CallSite {
            operation,
            kind: EntityKind::Group,
            key: &self.record.group_id,
            ctx: &self.ctx,
        }
    }
}

impl fmt::Debug for GroupAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupAccessor")
            .field("record", &self.record)
            .field("is_new", &self.is_new)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl EntityAccessor for GroupAccessor {
    type Record = Group;

    const KIND: EntityKind = EntityKind::Group;

    fn record(&self) -> &Group {
        &self.record
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn is_exists(&self, opts: &CallOptions) -> MetadataResult<(Vec<Group>, bool)> {
        let cond = Condition::new()
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id())
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(GROUP_FIELD_GROUP_ID)
            .eq(self.record.group_id.as_str());
        let rows = dispatch(self.call_site("select_groups"), opts, || {
            self.service.select_groups(&self.ctx, opts, &cond.to_map_str())
        })?;

        let exists = !rows.is_empty();
        Ok((rows, exists))
    }

    fn create(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let created = dispatch(self.call_site("create_group"), opts, || {
            self.service.create_group(&self.ctx, opts, &self.record)
        })?;

        self.record.id = created.id;
        self.is_new = false;
        Ok(())
    }

    fn update(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let data = to_map_str(&self.record);
        dispatch(self.call_site("update_group"), opts, || {
            self.service.update_group(&self.ctx, opts, self.record.id, &data)
        })
    }

    fn delete(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let cond = Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(GROUP_FIELD_GROUP_ID)
            .eq(self.record.group_id.as_str())
            .to_map_str();
        dispatch(self.call_site("delete_group"), opts, || {
            self.service.delete_group(&self.ctx, opts, self.record.id, &cond)
        })
    }

    fn parse(&mut self, data: &MapStr) -> MetadataResult<&Group> {
        parse_into(Self::KIND, &mut self.record, data)?;
        Ok(&self.record)
    }
}
