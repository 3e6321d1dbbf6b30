use metamodel_core::codec::{descriptor, missing_required, to_map_str, FieldKind};
use metamodel_core::{Attribute, Classification, Group, Object, Tagged};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn serde_keys<T: Serialize + Default>() -> BTreeSet<String> {
    match serde_json::to_value(T::default()).unwrap() {
        Value::Object(map) => map.keys().cloned().collect(),
        other => panic!("record must serialize as object, got {other}"),
    }
}

fn descriptor_keys<T: Tagged>() -> BTreeSet<String> {
    T::descriptors()
        .iter()
        .map(|descriptor| descriptor.name.to_string())
        .collect()
}

fn assert_wire_names_agree<T: Tagged + Serialize + Default>() {
    assert_eq!(serde_keys::<T>(), descriptor_keys::<T>());
}

fn assert_map_str_decodes_with_serde<T>(record: T)
where
    T: Tagged + Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let decoded: T = serde_json::from_value(Value::Object(to_map_str(&record))).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn serde_names_match_descriptor_tables() {
    assert_wire_names_agree::<Object>();
    assert_wire_names_agree::<Attribute>();
    assert_wire_names_agree::<Group>();
    assert_wire_names_agree::<Classification>();
}

#[test]
fn codec_payloads_are_valid_serde_payloads() {
    assert_map_str_decodes_with_serde(Object {
        id: 3,
        obj_id: "host".to_string(),
        obj_cls: "bk_host_manage".to_string(),
        is_paused: true,
        ..Object::default()
    });
    assert_map_str_decodes_with_serde(Attribute {
        id: 9,
        obj_id: "host".to_string(),
        property_id: "bk_cpu".to_string(),
        property_index: 4,
        is_editable: true,
        ..Attribute::default()
    });
    assert_map_str_decodes_with_serde(Group {
        group_id: "default".to_string(),
        obj_id: "host".to_string(),
        group_index: -1,
        ..Group::default()
    });
    assert_map_str_decodes_with_serde(Classification {
        classification_id: "bk_network".to_string(),
        classification_icon: "icon-cc-networks".to_string(),
        ..Classification::default()
    });
}

#[test]
fn service_rows_decode_with_missing_fields() {
    let object: Object = serde_json::from_value(json!({
        "id": 12,
        "bk_obj_id": "switch",
        "bk_classification_id": "bk_network",
    }))
    .unwrap();

    assert_eq!(object.id, 12);
    assert_eq!(object.obj_cls, "bk_network");
    assert!(object.obj_name.is_empty());
    assert!(!object.is_pre);
}

#[test]
fn required_fields_are_declared_per_record() {
    assert_eq!(missing_required(&Object::default()), Some("bk_obj_id"));
    assert_eq!(missing_required(&Attribute::default()), Some("bk_obj_id"));
    assert_eq!(missing_required(&Group::default()), Some("bk_group_id"));
    assert_eq!(
        missing_required(&Classification::default()),
        Some("bk_classification_id")
    );
}

#[test]
fn descriptors_carry_field_kinds() {
    let index = descriptor::<Attribute>("bk_property_index").unwrap();
    assert_eq!(index.kind, FieldKind::Integer);
    assert!(!index.required);

    let paused = descriptor::<Object>("bk_ispaused").unwrap();
    assert_eq!(paused.kind, FieldKind::Flag);

    assert!(descriptor::<Group>("bk_property_id").is_none());
}
