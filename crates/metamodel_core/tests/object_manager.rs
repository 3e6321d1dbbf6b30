mod common;

use common::{
    attribute_row, classification_row, ctx, group_row, object_row, service_handle,
    RecordingService, OWNER,
};
use metamodel_core::{
    CallOptions, CancelReason, CancellationToken, CodecError, EntityAccessor, EntityKind, MapStr,
    MetadataError, ObjectManager,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn payload(value: serde_json::Value) -> MapStr {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object payload, got {other}"),
    }
}

fn host_manager(service: &Arc<RecordingService>) -> ObjectManager {
    let mut manager = ObjectManager::new(service_handle(service), ctx());
    manager
        .parse(&payload(json!({
            "bk_obj_id": "host",
            "bk_classification_id": "network",
            "bk_supplier_account": OWNER,
        })))
        .unwrap();
    manager
}

#[test]
fn parse_rejects_missing_object_id_without_remote_calls() {
    let service = RecordingService::shared();
    let mut manager = ObjectManager::new(service_handle(&service), ctx());

    let err = manager
        .parse(&payload(json!({ "bk_classification_id": "network" })))
        .unwrap_err();

    assert!(matches!(err, MetadataError::MissingRequiredField("bk_obj_id")));
    assert!(service.calls().is_empty());
}

#[test]
fn parse_rejects_missing_classification_without_remote_calls() {
    let service = RecordingService::shared();
    let mut manager = ObjectManager::new(service_handle(&service), ctx());

    let err = manager
        .parse(&payload(json!({ "bk_obj_id": "host", "bk_classification_id": "" })))
        .unwrap_err();

    assert!(matches!(
        err,
        MetadataError::MissingRequiredField("bk_classification_id")
    ));
    assert_eq!(err.code(), "missing_required_field");
    assert!(service.calls().is_empty());
}

#[test]
fn parse_rejects_mistyped_value_and_keeps_record() {
    let service = RecordingService::shared();
    let mut manager = host_manager(&service);

    let err = manager
        .parse(&payload(json!({ "bk_obj_name": "Host", "ispre": "maybe" })))
        .unwrap_err();

    assert!(matches!(
        err,
        MetadataError::Codec(CodecError::TypeMismatch { field: "ispre", .. })
    ));
    assert_eq!(manager.name(), "");
    assert!(!manager.is_pre());
}

#[test]
fn parse_returns_populated_record() {
    let service = RecordingService::shared();
    let mut manager = ObjectManager::new(service_handle(&service), ctx());

    let record = manager
        .parse(&payload(json!({
            "bk_obj_id": "switch",
            "bk_obj_name": "Switch",
            "bk_classification_id": "network",
            "bk_ispaused": true,
            "unknown_key": "ignored",
        })))
        .unwrap();

    assert_eq!(record.obj_id, "switch");
    assert_eq!(record.obj_name, "Switch");
    assert!(record.is_paused);
    assert!(service.calls().is_empty());
}

#[test]
fn is_exists_with_zero_rows_is_not_an_error() {
    let service = RecordingService::shared();
    let manager = host_manager(&service);

    let (rows, exists) = manager.is_exists(&CallOptions::new()).unwrap();

    assert!(rows.is_empty());
    assert!(!exists);
    let call = service.last("select_objects");
    let condition = call.condition.unwrap();
    assert_eq!(condition.get("bk_supplier_account"), Some(&json!(OWNER)));
    assert_eq!(condition.get("bk_obj_id"), Some(&json!("host")));
}

#[test]
fn is_exists_reports_matching_rows() {
    let service = Arc::new(RecordingService::new().with_objects(vec![object_row("host", "network")]));
    let manager = host_manager(&service);

    let (rows, exists) = manager.is_exists(&CallOptions::new()).unwrap();

    assert!(exists);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].obj_id, "host");
}

#[test]
fn parse_then_save_creates_exactly_once() {
    let service = Arc::new(RecordingService::new().with_next_id(1001));
    let mut manager = host_manager(&service);
    assert!(manager.is_new());

    manager.save(&CallOptions::new()).unwrap();

    assert_eq!(service.count("create_object"), 1);
    assert_eq!(service.count("update_object"), 0);
    assert_eq!(manager.record_id(), 1001);
    assert!(!manager.is_new());

    let created = service.last("create_object").payload.unwrap();
    assert_eq!(created["bk_obj_id"], json!("host"));
    assert_eq!(created["bk_classification_id"], json!("network"));
}

#[test]
fn second_save_after_create_updates() {
    let service = Arc::new(RecordingService::new().with_next_id(1001));
    let mut manager = host_manager(&service);
    let opts = CallOptions::new();

    manager.save(&opts).unwrap();
    manager.set_name("Host machine");
    manager.save(&opts).unwrap();

    assert_eq!(service.count("create_object"), 1);
    assert_eq!(service.count("update_object"), 1);
    let update = service.last("update_object");
    assert_eq!(update.id, Some(1001));
    let data = update.payload.unwrap();
    assert_eq!(data["bk_obj_name"], json!("Host machine"));
    assert_eq!(data["id"], json!(1001));
}

#[test]
fn save_on_loaded_record_updates() {
    let service = RecordingService::shared();
    let mut manager =
        ObjectManager::from_record(service_handle(&service), ctx(), object_row("host", "network"));
    assert!(!manager.is_new());

    manager.save(&CallOptions::new()).unwrap();

    assert_eq!(service.count("create_object"), 0);
    assert_eq!(service.count("update_object"), 1);
    assert_eq!(service.last("update_object").id, Some(7));
}

#[test]
fn delete_condition_guards_code_and_classification() {
    let service = RecordingService::shared();
    let mut manager =
        ObjectManager::from_record(service_handle(&service), ctx(), object_row("host", "network"));

    manager.delete(&CallOptions::new()).unwrap();

    let call = service.last("delete_object");
    assert_eq!(call.id, Some(7));
    let condition = call.condition.unwrap();
    assert_eq!(condition.get("bk_obj_id"), Some(&json!("host")));
    assert_eq!(condition.get("bk_classification_id"), Some(&json!("network")));
}

#[test]
fn delete_without_classification_never_reaches_service() {
    let service = RecordingService::shared();
    let mut manager = ObjectManager::new(service_handle(&service), ctx());
    manager.set_id("host");

    let err = manager.delete(&CallOptions::new()).unwrap_err();

    assert!(matches!(
        err,
        MetadataError::MissingRequiredField("bk_classification_id")
    ));
    assert!(service.calls().is_empty());
}

#[test]
fn relationship_queries_return_empty_on_zero_rows() {
    let service = RecordingService::shared();
    let manager = host_manager(&service);
    let opts = CallOptions::new();

    assert!(manager.get_attributes(&opts).unwrap().is_empty());
    assert!(manager.get_groups(&opts).unwrap().is_empty());
    assert_eq!(service.count("select_object_attributes"), 1);
    assert_eq!(service.count("select_groups"), 1);
}

#[test]
fn relationship_queries_are_scoped_and_never_cached() {
    let service = Arc::new(
        RecordingService::new()
            .with_attributes(vec![
                attribute_row("host", "bk_host_name", "default"),
                attribute_row("host", "bk_host_innerip", "default"),
            ])
            .with_groups(vec![group_row("host", "default")]),
    );
    let manager = host_manager(&service);
    let opts = CallOptions::new();

    let attributes = manager.get_attributes(&opts).unwrap();
    let again = manager.get_attributes(&opts).unwrap();
    let groups = manager.get_groups(&opts).unwrap();

    assert_eq!(attributes.len(), 2);
    assert_eq!(again.len(), 2);
    assert_eq!(service.count("select_object_attributes"), 2);
    assert_eq!(attributes[0].property_id(), "bk_host_name");
    assert!(!attributes[0].is_new());
    assert_eq!(groups[0].group_id(), "default");

    let condition = service.last("select_groups").condition.unwrap();
    assert_eq!(condition.get("bk_obj_id"), Some(&json!("host")));
    assert_eq!(condition.get("bk_supplier_account"), Some(&json!(OWNER)));
}

#[test]
fn get_classification_takes_first_of_duplicate_rows() {
    let service = Arc::new(RecordingService::new().with_classifications(vec![
        classification_row(1, "network", "Network"),
        classification_row(2, "network", "Network (copy)"),
    ]));
    let manager = host_manager(&service);

    let classification = manager.get_classification(&CallOptions::new()).unwrap();

    assert_eq!(classification.record_id(), 1);
    assert_eq!(classification.name(), "Network");
    let condition = service.last("select_classifications").condition.unwrap();
    assert_eq!(condition.get("bk_classification_id"), Some(&json!("network")));
}

#[test]
fn get_classification_without_rows_is_not_found() {
    let service = RecordingService::shared();
    let manager = host_manager(&service);

    let err = manager.get_classification(&CallOptions::new()).unwrap_err();

    match &err {
        MetadataError::NotFound {
            kind,
            key,
            referrer_kind,
            referrer_key,
        } => {
            assert_eq!(*kind, EntityKind::Classification);
            assert_eq!(key, "network");
            assert_eq!(*referrer_kind, EntityKind::Object);
            assert_eq!(referrer_key, "host");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "invalid classification `network` for the object `host`"
    );
}

#[test]
fn to_map_str_then_parse_reproduces_every_field() {
    let service = RecordingService::shared();
    let mut source = host_manager(&service);
    source.set_name("Host");
    source.set_icon("icon-cc-host");
    source.set_position("{\"x\":1}");
    source.set_is_pre(true);
    source.set_is_paused(true);
    source.set_description("physical or virtual machine");
    source.set_creator("admin");
    source.set_modifier("ops");

    let data = source.to_map_str().unwrap();
    let mut copy = ObjectManager::new(service_handle(&service), ctx());
    copy.parse(&data).unwrap();

    assert_eq!(copy.record(), source.record());
    assert!(service.calls().is_empty());
}

#[test]
fn created_children_are_scoped_to_the_object() {
    let service = RecordingService::shared();
    let manager = host_manager(&service);

    let attribute = manager.create_attribute();
    let group = manager.create_group();

    assert!(attribute.is_new());
    assert_eq!(attribute.object_id(), "host");
    assert_eq!(attribute.supplier_account(), OWNER);
    assert!(group.is_new());
    assert_eq!(group.object_id(), "host");
    assert_eq!(group.supplier_account(), OWNER);
    assert!(service.calls().is_empty());
}

#[test]
fn set_classification_is_local_only() {
    let service = RecordingService::shared();
    let mut manager = host_manager(&service);
    let mut classification =
        metamodel_core::ClassificationAccessor::new(service_handle(&service), ctx());
    classification.set_classification_id("middleware");

    manager.set_classification(&classification);

    assert_eq!(manager.classification_id(), "middleware");
    assert!(service.calls().is_empty());
}

#[test]
fn cancelled_options_never_reach_service() {
    let service = RecordingService::shared();
    let mut manager = host_manager(&service);
    let token = CancellationToken::new();
    let opts = CallOptions::new().with_cancellation(token.clone());
    token.cancel();

    let err = manager.save(&opts).unwrap_err();

    assert!(matches!(err, MetadataError::Cancelled(CancelReason::Cancelled)));
    assert!(service.calls().is_empty());
    assert!(manager.is_new());
}

#[test]
fn expired_deadline_never_reaches_service() {
    let service = RecordingService::shared();
    let manager = host_manager(&service);
    let opts = CallOptions::new().with_timeout(Duration::ZERO);

    let err = manager.get_groups(&opts).unwrap_err();

    assert!(matches!(
        err,
        MetadataError::Cancelled(CancelReason::DeadlineExceeded)
    ));
    assert!(service.calls().is_empty());
}

#[test]
fn transport_failure_is_communication_failure() {
    let service = RecordingService::shared();
    service.fail_transport("connection refused");
    let mut manager = host_manager(&service);

    let err = manager.save(&CallOptions::new()).unwrap_err();

    assert!(matches!(err, MetadataError::CommunicationFailure(_)));
    assert_eq!(err.code(), "communication_failure");
    assert!(manager.is_new());
    assert_eq!(manager.record_id(), 0);
}

#[test]
fn remote_application_error_is_returned_verbatim() {
    let service = RecordingService::shared();
    service.fail_with_code(1101002, "object already exists");
    let mut manager = host_manager(&service);

    let err = manager.create(&CallOptions::new()).unwrap_err();

    match err {
        MetadataError::RemoteApplication { code, message } => {
            assert_eq!(code, 1101002);
            assert_eq!(message, "object already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(service.count("create_object"), 1);
    assert!(manager.is_new());
}

#[test]
fn oversized_timeout_still_dispatches() {
    let service = RecordingService::shared();
    let mut manager = host_manager(&service);
    let opts = CallOptions::new().with_timeout(Duration::MAX);

    manager.save(&opts).unwrap();

    assert_eq!(service.count("create_object"), 1);
}

#[test]
fn debug_output_shows_record_state_but_not_service() {
    let service = RecordingService::shared();
    let manager =
        ObjectManager::from_record(service_handle(&service), ctx(), object_row("host", "network"));

    let rendered = format!("{manager:?}");

    assert!(rendered.starts_with("ObjectManager"));
    assert!(rendered.contains("\"host\""));
    assert!(rendered.contains("is_new: false"));
    assert!(!rendered.contains("service"));
}

#[test]
fn into_record_returns_saved_state() {
    let service = Arc::new(RecordingService::new().with_next_id(77));
    let mut manager = host_manager(&service);
    manager.set_name("Host");
    manager.save(&CallOptions::new()).unwrap();

    let record = manager.into_record();

    assert_eq!(record.id, 77);
    assert_eq!(record.obj_id, "host");
    assert_eq!(record.obj_name, "Host");
}
