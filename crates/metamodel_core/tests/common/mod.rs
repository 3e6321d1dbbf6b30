#![allow(dead_code)]

use metamodel_core::{
    Attribute, CallOptions, Classification, CreatedId, Group, MapStr, MetadataService, Object,
    RequestContext, ResponseEnvelope, TransportError, TransportResult,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "0";

/// One recorded service invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub id: Option<i64>,
    pub condition: Option<MapStr>,
    pub payload: Option<Value>,
    pub owner_id: String,
}

#[derive(Debug, Clone)]
enum Mode {
    Healthy,
    TransportDown(String),
    ApplicationError { code: i64, message: String },
}

/// In-memory `MetadataService` that returns canned rows and records calls.
pub struct RecordingService {
    calls: Mutex<Vec<Call>>,
    objects: Mutex<Vec<Object>>,
    attributes: Mutex<Vec<Attribute>>,
    groups: Mutex<Vec<Group>>,
    classifications: Mutex<Vec<Classification>>,
    next_id: Mutex<i64>,
    mode: Mutex<Mode>,
}

impl RecordingService {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            objects: Mutex::new(Vec::new()),
            attributes: Mutex::new(Vec::new()),
            groups: Mutex::new(Vec::new()),
            classifications: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            mode: Mutex::new(Mode::Healthy),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn with_next_id(self, id: i64) -> Self {
        *self.next_id.lock().unwrap() = id;
        self
    }

    pub fn with_objects(self, rows: Vec<Object>) -> Self {
        *self.objects.lock().unwrap() = rows;
        self
    }

    pub fn with_attributes(self, rows: Vec<Attribute>) -> Self {
        *self.attributes.lock().unwrap() = rows;
        self
    }

    pub fn with_groups(self, rows: Vec<Group>) -> Self {
        *self.groups.lock().unwrap() = rows;
        self
    }

    pub fn with_classifications(self, rows: Vec<Classification>) -> Self {
        *self.classifications.lock().unwrap() = rows;
        self
    }

    pub fn fail_transport(&self, message: &str) {
        *self.mode.lock().unwrap() = Mode::TransportDown(message.to_string());
    }

    pub fn fail_with_code(&self, code: i64, message: &str) {
        *self.mode.lock().unwrap() = Mode::ApplicationError {
            code,
            message: message.to_string(),
        };
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.op == op)
            .count()
    }

    pub fn last(&self, op: &str) -> Call {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|call| call.op == op)
            .cloned()
            .unwrap_or_else(|| panic!("no `{op}` call recorded"))
    }

    fn record(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        id: Option<i64>,
        condition: Option<&MapStr>,
        payload: Option<Value>,
    ) {
        self.calls.lock().unwrap().push(Call {
            op,
            id,
            condition: condition.cloned(),
            payload,
            owner_id: ctx.owner_id().to_string(),
        });
    }

    fn respond<T: Default>(&self, data: T) -> TransportResult<T> {
        match &*self.mode.lock().unwrap() {
            Mode::Healthy => Ok(ResponseEnvelope::success(data)),
            Mode::TransportDown(message) => Err(TransportError::new(message.clone())),
            Mode::ApplicationError { code, message } => {
                Ok(ResponseEnvelope::failure(*code, message.clone()))
            }
        }
    }

    fn select<T: Clone>(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        condition: &MapStr,
        rows: &Mutex<Vec<T>>,
    ) -> TransportResult<Vec<T>> {
        self.record(op, ctx, None, Some(condition), None);
        let rows = rows.lock().unwrap().clone();
        self.respond(rows)
    }

    fn create<T: Serialize>(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        record: &T,
    ) -> TransportResult<CreatedId> {
        self.record(op, ctx, None, None, Some(serde_json::to_value(record).unwrap()));
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;
        self.respond(CreatedId { id })
    }

    fn update(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()> {
        self.record(op, ctx, Some(id), None, Some(Value::Object(data.clone())));
        self.respond(())
    }

    fn delete(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()> {
        self.record(op, ctx, Some(id), Some(condition), None);
        self.respond(())
    }
}

impl MetadataService for RecordingService {
    fn select_objects(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Object>> {
        self.select("select_objects", ctx, condition, &self.objects)
    }

    fn create_object(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        object: &Object,
    ) -> TransportResult<CreatedId> {
        self.create("create_object", ctx, object)
    }

    fn update_object(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()> {
        self.update("update_object", ctx, id, data)
    }

    fn delete_object(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()> {
        self.delete("delete_object", ctx, id, condition)
    }

    fn select_object_attributes(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Attribute>> {
        self.select("select_object_attributes", ctx, condition, &self.attributes)
    }

    fn create_object_attribute(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        attribute: &Attribute,
    ) -> TransportResult<CreatedId> {
        self.create("create_object_attribute", ctx, attribute)
    }

    fn update_object_attribute(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()> {
        self.update("update_object_attribute", ctx, id, data)
    }

    fn delete_object_attribute(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()> {
        self.delete("delete_object_attribute", ctx, id, condition)
    }

    fn select_groups(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Group>> {
        self.select("select_groups", ctx, condition, &self.groups)
    }

    fn create_group(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        group: &Group,
    ) -> TransportResult<CreatedId> {
        self.create("create_group", ctx, group)
    }

    fn update_group(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()> {
        self.update("update_group", ctx, id, data)
    }

    fn delete_group(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()> {
        self.delete("delete_group", ctx, id, condition)
    }

    fn select_classifications(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        condition: &MapStr,
    ) -> TransportResult<Vec<Classification>> {
        self.select("select_classifications", ctx, condition, &self.classifications)
    }

    fn create_classification(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        classification: &Classification,
    ) -> TransportResult<CreatedId> {
        self.create("create_classification", ctx, classification)
    }

    fn update_classification(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        data: &MapStr,
    ) -> TransportResult<()> {
        self.update("update_classification", ctx, id, data)
    }

    fn delete_classification(
        &self,
        ctx: &RequestContext,
        _opts: &CallOptions,
        id: i64,
        condition: &MapStr,
    ) -> TransportResult<()> {
        self.delete("delete_classification", ctx, id, condition)
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::new(OWNER).with_user("admin")
}

/// Erases the concrete type while keeping a typed handle for assertions.
pub fn service_handle(service: &Arc<RecordingService>) -> Arc<dyn MetadataService> {
    Arc::clone(service) as Arc<dyn MetadataService>
}

pub fn object_row(obj_id: &str, obj_cls: &str) -> Object {
    Object {
        id: 7,
        obj_id: obj_id.to_string(),
        obj_cls: obj_cls.to_string(),
        owner_id: OWNER.to_string(),
        ..Object::default()
    }
}

pub fn classification_row(id: i64, code: &str, name: &str) -> Classification {
    Classification {
        id,
        classification_id: code.to_string(),
        classification_name: name.to_string(),
        owner_id: OWNER.to_string(),
        ..Classification::default()
    }
}

pub fn group_row(obj_id: &str, group_id: &str) -> Group {
    Group {
        id: 21,
        group_id: group_id.to_string(),
        group_name: group_id.to_uppercase(),
        obj_id: obj_id.to_string(),
        owner_id: OWNER.to_string(),
        ..Group::default()
    }
}

pub fn attribute_row(obj_id: &str, property_id: &str, group_id: &str) -> Attribute {
    Attribute {
        id: 31,
        obj_id: obj_id.to_string(),
        property_id: property_id.to_string(),
        property_group: group_id.to_string(),
        owner_id: OWNER.to_string(),
        ..Attribute::default()
    }
}
