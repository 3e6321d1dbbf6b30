//! Classification accessor: top-level categories of object types.

use crate::codec::{to_map_str, MapStr};
use crate::condition::Condition;
use crate::error::{EntityKind, MetadataResult};
use crate::model::{Classification, FIELD_CLASSIFICATION_ID, FIELD_SUPPLIER_ACCOUNT};
use crate::remote::{CallOptions, MetadataService, RequestContext};
use crate::service::object::ObjectManager;
use crate::service::{dispatch, ensure_required, parse_into, CallSite, EntityAccessor};
use std::fmt;
use std::sync::Arc;

/// Classification record bound to a metadata service and request context.
pub struct ClassificationAccessor {
    record: Classification,
    is_new: bool,
    ctx: RequestContext,
    service: Arc<dyn MetadataService>,
}

impl ClassificationAccessor {
    pub fn new(service: Arc<dyn MetadataService>, ctx: RequestContext) -> Self {
        Self {
            record: Classification::default(),
            is_new: true,
            ctx,
            service,
        }
    }

    pub fn from_record(
        service: Arc<dyn MetadataService>,
        ctx: RequestContext,
        record: Classification,
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

    pub fn into_record(self) -> Classification {
        self.record
    }

    /// Unsaved object filed under this classification.
    pub fn create_object(&self) -> ObjectManager {
        let mut object = ObjectManager::new(Arc::clone(&self.service), self.ctx.clone());
        object.set_supplier_account(self.record.owner_id.as_str());
        object.set_classification(self);
        object
    }

    /// Fetches the object types filed under this classification.
    pub fn get_objects(&self, opts: &CallOptions) -> MetadataResult<Vec<ObjectManager>> {
        let cond = Condition::new()
            .field(FIELD_CLASSIFICATION_ID)
            .eq(self.record.classification_id.as_str())
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id());
        let rows = dispatch(self.call_site("select_objects"), opts, || {
            self.service.select_objects(&self.ctx, opts, &cond.to_map_str())
        })?;

        Ok(rows
            .into_iter()
            .map(|item| {
                ObjectManager::from_record(Arc::clone(&self.service), self.ctx.clone(), item)
            })
            .collect())
    }

    pub fn record_id(&self) -> i64 {
        self.record.id
    }

    pub fn set_classification_id(&mut self, classification_id: impl Into<String>) {
        self.record.classification_id = classification_id.into();
    }

    pub fn classification_id(&self) -> &str {
        &self.record.classification_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.classification_name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.record.classification_name
    }

    pub fn set_classification_type(&mut self, classification_type: impl Into<String>) {
        self.record.classification_type = classification_type.into();
    }

    pub fn classification_type(&self) -> &str {
        &self.record.classification_type
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.record.classification_icon = icon.into();
    }

    pub fn icon(&self) -> &str {
        &self.record.classification_icon
    }

    pub fn set_supplier_account(&mut self, supplier_account: impl Into<String>) {
        self.record.owner_id = supplier_account.into();
    }

    pub fn supplier_account(&self) -> &str {
        &self.record.owner_id
    }

    fn call_site(&self, operation: &'static str) -> CallSite<'_> {
        CallSite {
            operation,
            kind: EntityKind::Classification,
            key: &self.record.classification_id,
            ctx: &self.ctx,
        }
    }
}

impl fmt::Debug for ClassificationAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationAccessor")
            .field("record", &self.record)
            .field("is_new", &self.is_new)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl EntityAccessor for ClassificationAccessor {
    type Record = Classification;

    const KIND: EntityKind = EntityKind::Classification;

    fn record(&self) -> &Classification {
        &self.record
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn is_exists(&self, opts: &CallOptions) -> MetadataResult<(Vec<Classification>, bool)> {
        let cond = Condition::new()
            .field(FIELD_SUPPLIER_ACCOUNT)
            .eq(self.ctx.owner_id())
            .field(FIELD_CLASSIFICATION_ID)
            .eq(self.record.classification_id.as_str());
        let rows = dispatch(self.call_site("select_classifications"), opts, || {
            self.service.select_classifications(&self.ctx, opts, &cond.to_map_str())
        })?;

        let exists = !rows.is_empty();
        Ok((rows, exists))
    }

    fn create(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let created = dispatch(self.call_site("create_classification"), opts, || {
            self.service.create_classification(&self.ctx, opts, &self.record)
        })?;

        self.record.id = created.id;
        self.is_new = false;
        Ok(())
    }

    fn update(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let data = to_map_str(&self.record);
        dispatch(self.call_site("update_classification"), opts, || {
            self.service.update_classification(&self.ctx, opts, self.record.id, &data)
        })
    }

    fn delete(&mut self, opts: &CallOptions) -> MetadataResult<()> {
        ensure_required(Self::KIND, &self.record)?;
        let cond = Condition::new()
            .field(FIELD_CLASSIFICATION_ID)
            .eq(self.record.classification_id.as_str())
            .to_map_str();
        dispatch(self.call_site("delete_classification"), opts, || {
            self.service.delete_classification(&self.ctx, opts, self.record.id, &cond)
        })
    }

    fn parse(&mut self, data: &MapStr) -> MetadataResult<&Classification> {
        parse_into(Self::KIND, &mut self.record, data)?;
        Ok(&self.record)
    }
}
