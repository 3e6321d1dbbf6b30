//! Object (business object-type schema) record.

use crate::codec::{flag_field, integer_field, text_field, FieldDescriptor, Tagged};
use crate::model::{
    FIELD_CLASSIFICATION_ID, FIELD_CREATOR, FIELD_DESCRIPTION, FIELD_ID, FIELD_IS_PRE,
    FIELD_MODIFIER, FIELD_OBJ_ID, FIELD_SUPPLIER_ACCOUNT,
};
use serde::{Deserialize, Serialize};

pub const OBJECT_FIELD_NAME: &str = "bk_obj_name";
pub const OBJECT_FIELD_ICON: &str = "bk_obj_icon";
pub const OBJECT_FIELD_POSITION: &str = "position";
pub const OBJECT_FIELD_IS_PAUSED: &str = "bk_ispaused";

/// Business object-type definition such as `host` or `application`.
///
/// `obj_id` is unique per tenant. `obj_cls` references the owning
/// classification by code; referential integrity is enforced remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Object {
    /// Assigned by the metadata service on create; `0` until then.
    pub id: i64,
    #[serde(rename = "bk_obj_id")]
    pub obj_id: String,
    #[serde(rename = "bk_obj_name")]
    pub obj_name: String,
    #[serde(rename = "bk_classification_id")]
    pub obj_cls: String,
    #[serde(rename = "bk_obj_icon")]
    pub obj_icon: String,
    pub position: String,
    #[serde(rename = "bk_supplier_account")]
    pub owner_id: String,
    #[serde(rename = "ispre")]
    pub is_pre: bool,
    #[serde(rename = "bk_ispaused")]
    pub is_paused: bool,
    pub description: String,
    pub creator: String,
    pub modifier: String,
}

static OBJECT_FIELDS: &[FieldDescriptor<Object>] = &[
    integer_field!(Object, FIELD_ID, id),
    text_field!(Object, FIELD_OBJ_ID, obj_id, required),
    text_field!(Object, OBJECT_FIELD_NAME, obj_name),
    text_field!(Object, FIELD_CLASSIFICATION_ID, obj_cls, required),
    text_field!(Object, OBJECT_FIELD_ICON, obj_icon),
    text_field!(Object, OBJECT_FIELD_POSITION, position),
    text_field!(Object, FIELD_SUPPLIER_ACCOUNT, owner_id),
    flag_field!(Object, FIELD_IS_PRE, is_pre),
    flag_field!(Object, OBJECT_FIELD_IS_PAUSED, is_paused),
    text_field!(Object, FIELD_DESCRIPTION, description),
    text_field!(Object, FIELD_CREATOR, creator),
    text_field!(Object, FIELD_MODIFIER, modifier),
];

impl Tagged for Object {
    fn descriptors() -> &'static [FieldDescriptor<Self>] {
        OBJECT_FIELDS
    }
}
