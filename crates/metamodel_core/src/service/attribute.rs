//! Attribute accessor: field definitions of one object.

use crate::codec::{to_map_str, MapStr};
use crate::condition::Condition;
use crate::error::{EntityKind, MetadataError, MetadataResult};
use crate::model::attribute::{Attribute, ATTRIBUTE_FIELD_PROPERTY_ID};
use crate::model::group::GROUP_FIELD_GROUP_ID;
use crate::model::{FIELD_OBJ_ID, FIELD_SUPPLIER_ACCOUNT};
use crate::remote::{CallOptions, MetadataService, RequestContext};
use crate::service::group::GroupAccessor;
use crate::service::{dispatch, ensure_required, parse_into, CallSite, EntityAccessor};
use std::fmt;
use std::sync::Arc;

/// Attribute record bound to a metadata service and request context.
pub struct AttributeAccessor {
    record: Attribute,
    is_new: bool,
    ctx: RequestContext,
    service: Arc<dyn MetadataService>,
}

impl AttributeAccessor {
    pub fn new(service: Arc<dyn MetadataService>, ctx: RequestContext) -> Self {
        Self {
            record: Attribute::default(),
            is_new: true,
            ctx,
            service,
        }
    }

    pub fn from_record(
        service: Arc<dyn MetadataService>,
        ctx: RequestContext,
        record: Attribute,
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

    pub fn into_record(self) -> Attribute {
        self.record
    }

    /// Resolves the presentation group named by `bk_property_group`.
    pub fn get_group(&self, opts: &CallOptions) -> MetadataResult<GroupAccessor> {
        let cond = Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(GROUP_FIELD_GROUP_ID)
            .eq(self.record.property_group.as_str())
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id());
        let rows = dispatch(self.call_site("select_groups"), opts, || {
            self.service.select_groups(&self.ctx, opts, &cond.to_map_str())
        })?;

        match rows.into_iter().next() {
            Some(item) => Ok(GroupAccessor::from_record(
                Arc::clone(&self.service),
                self.ctx.clone(),
                item,
            )),
            None => Err(MetadataError::NotFound {
                kind: EntityKind::Group,
                key: self.record.property_group.clone(),
                referrer_kind: EntityKind::Attribute,
                referrer_key: self.record.property_id.clone(),
            }),
        }
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

    pub fn set_property_id(&mut self, property_id: impl Into<String>) {
        self.record.property_id = property_id.into();
    }

    pub fn property_id(&self) -> &str {
        &self.record.property_id
    }

    pub fn set_property_name(&mut self, property_name: impl Into<String>) {
        self.record.property_name = property_name.into();
    }

    pub fn property_name(&self) -> &str {
        &self.record.property_name
    }

    pub fn set_property_group(&mut self, group_id: impl Into<String>) {
        self.record.property_group = group_id.into();
    }

    pub fn property_group(&self) -> &str {
        &self.record.property_group
    }

    pub fn set_property_index(&mut self, index: i64) {
        self.record.property_index = index;
    }

    pub fn property_index(&self) -> i64 {
        self.record.property_index
    }

    pub fn set_property_type(&mut self, property_type: impl Into<String>) {
        self.record.property_type = property_type.into();
    }

    pub fn property_type(&self) -> &str {
        &self.record.property_type
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.record.unit = unit.into();
    }

    pub fn unit(&self) -> &str {
        &self.record.unit
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.record.placeholder = placeholder.into();
    }

    pub fn placeholder(&self) -> &str {
        &self.record.placeholder
    }

    pub fn set_option(&mut self, option: impl Into<String>) {
        self.record.option = option.into();
    }

    pub fn option(&self) -> &str {
        &self.record.option
    }

    pub fn set_is_editable(&mut self, is_editable: bool) {
        self.record.is_editable = is_editable;
    }

    pub fn is_editable(&self) -> bool {
        self.record.is_editable
    }

    pub fn set_is_required(&mut self, is_required: bool) {
        self.record.is_required = is_required;
    }

    pub fn is_required(&self) -> bool {
        self.record.is_required
    }

    pub fn set_is_readonly(&mut self, is_readonly: bool) {
        self.record.is_readonly = is_readonly;
    }

    pub fn is_readonly(&self) -> bool {
        self.record.is_readonly
    }

    pub fn set_is_only(&mut self, is_only: bool) {
        self.record.is_only = is_only;
    }

    pub fn is_only(&self) -> bool {
        self.record.is_only
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.record.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    fn call_site(&self, operation: &'static str) -> CallSite<'_> {
        CallSite {
            operation,
            kind: EntityKind::Attribute,
            key: &self.record.property_id,
            ctx: &self.ctx,
        }
    }
}

impl fmt::Debug for AttributeAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeAccessor")
            .field("record", &self.record)
            .field("is_new", &self.is_new)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl EntityAccessor for AttributeAccessor {
    type Record = Attribute;

    const KIND: EntityKind = EntityKind::Attribute;

    fn record(&self) -> &Attribute {
        &self.record
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn is_exists(&self, opts: &CallOptions) -> MetadataResult<(Vec<Attribute>, bool)> {
        let cond = Condition::new()
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id())
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(ATTRIBUTE_FIELD_PROPERTY_ID)
            .eq(self.record.property_id.as_str());
        let rows = dispatch(self.call_site("select_object_attributes"), opts, || {
            self.service.select_object_attributes(&self.ctx, opts, &cond.to_map_str())
        })?;

        let exists = !rows.is_empty();
        Ok((rows, exists))
    }

    fn create(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let created = dispatch(self.call_site("create_object_attribute"), opts, || {
            self.service.create_object_attribute(&self.ctx, opts, &self.record)
        })?;

        self.record.id = created.id;
        self.is_new = false;
        Ok(())
    }

    fn update(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let data = to_map_str(&self.record);
        dispatch(self.call_site("update_object_attribute"), opts, || {
            self.service.update_object_attribute(&self.ctx, opts, self.record.id, &data)
        })
    }

    fn delete(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let cond = Condition::new()
            .field(FIELD_OBJ_ID)
            .eq(self.record.obj_id.as_str())
            .field(ATTRIBUTE_FIELD_PROPERTY_ID)
            .eq(self.record.property_id.as_str())
            .to_map_str();
        dispatch(self.call_site("delete_object_attribute"), opts, || {
            self.service.delete_object_attribute(&self.ctx, opts, self.record.id, &cond)
        })
    }

    fn parse(&mut self, data: &MapStr) -> MetadataResult<&Attribute> {
        parse_into(Self::KIND, &mut self.record, data)?;
        Ok(&self.record)
    }
}
