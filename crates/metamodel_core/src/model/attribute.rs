//! Attribute (object field definition) record.

use crate::codec::{flag_field, integer_field, text_field, FieldDescriptor, Tagged};
use crate::model::{
    FIELD_CREATOR, FIELD_DESCRIPTION, FIELD_ID, FIELD_IS_PRE, FIELD_OBJ_ID,
    FIELD_SUPPLIER_ACCOUNT,
};
use serde::{Deserialize, Serialize};

pub const ATTRIBUTE_FIELD_PROPERTY_ID: &str = "bk_property_id";
pub const ATTRIBUTE_FIELD_PROPERTY_NAME: &str = "bk_property_name";
pub const ATTRIBUTE_FIELD_PROPERTY_GROUP: &str = "bk_property_group";
pub const ATTRIBUTE_FIELD_PROPERTY_INDEX: &str = "bk_property_index";
pub const ATTRIBUTE_FIELD_UNIT: &str = "unit";
pub const ATTRIBUTE_FIELD_PLACEHOLDER: &str = "placeholder";
pub const ATTRIBUTE_FIELD_EDITABLE: &str = "editable";
pub const ATTRIBUTE_FIELD_IS_REQUIRED: &str = "isrequired";
pub const ATTRIBUTE_FIELD_IS_READONLY: &str = "isreadonly";
pub const ATTRIBUTE_FIELD_IS_ONLY: &str = "isonly";
pub const ATTRIBUTE_FIELD_IS_SYSTEM: &str = "bk_issystem";
pub const ATTRIBUTE_FIELD_IS_API: &str = "bk_isapi";
pub const ATTRIBUTE_FIELD_PROPERTY_TYPE: &str = "bk_property_type";
pub const ATTRIBUTE_FIELD_OPTION: &str = "option";

/// Field definition belonging to exactly one object, scoped by
/// (`bk_obj_id`, `bk_supplier_account`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub id: i64,
    #[serde(rename = "bk_supplier_account")]
    pub owner_id: String,
    #[serde(rename = "bk_obj_id")]
    pub obj_id: String,
    #[serde(rename = "bk_property_id")]
    pub property_id: String,
    #[serde(rename = "bk_property_name")]
    pub property_name: String,
    /// Code of the presentation group this attribute is rendered in.
    #[serde(rename = "bk_property_group")]
    pub property_group: String,
    #[serde(rename = "bk_property_index")]
    pub property_index: i64,
    pub unit: String,
    pub placeholder: String,
    #[serde(rename = "editable")]
    pub is_editable: bool,
    #[serde(rename = "ispre")]
    pub is_pre: bool,
    #[serde(rename = "isrequired")]
    pub is_required: bool,
    #[serde(rename = "isreadonly")]
    pub is_readonly: bool,
    #[serde(rename = "isonly")]
    pub is_only: bool,
    #[serde(rename = "bk_issystem")]
    pub is_system: bool,
    #[serde(rename = "bk_isapi")]
    pub is_api: bool,
    /// Value type such as `singlechar`, `int` or `enum`.
    #[serde(rename = "bk_property_type")]
    pub property_type: String,
    /// Type-specific option document, kept verbatim.
    pub option: String,
    pub description: String,
    pub creator: String,
}

static ATTRIBUTE_FIELDS: &[FieldDescriptor<Attribute>] = &[
    integer_field!(Attribute, FIELD_ID, id),
    text_field!(Attribute, FIELD_SUPPLIER_ACCOUNT, owner_id),
    text_field!(Attribute, FIELD_OBJ_ID, obj_id, required),
    text_field!(Attribute, ATTRIBUTE_FIELD_PROPERTY_ID, property_id, required),
    text_field!(Attribute, ATTRIBUTE_FIELD_PROPERTY_NAME, property_name),
    text_field!(Attribute, ATTRIBUTE_FIELD_PROPERTY_GROUP, property_group),
    integer_field!(Attribute, ATTRIBUTE_FIELD_PROPERTY_INDEX, property_index),
    text_field!(Attribute, ATTRIBUTE_FIELD_UNIT, unit),
    text_field!(Attribute, ATTRIBUTE_FIELD_PLACEHOLDER, placeholder),
    flag_field!(Attribute, ATTRIBUTE_FIELD_EDITABLE, is_editable),
    flag_field!(Attribute, FIELD_IS_PRE, is_pre),
    flag_field!(Attribute, ATTRIBUTE_FIELD_IS_REQUIRED, is_required),
    flag_field!(Attribute, ATTRIBUTE_FIELD_IS_READONLY, is_readonly),
    flag_field!(Attribute, ATTRIBUTE_FIELD_IS_ONLY, is_only),
    flag_field!(Attribute, ATTRIBUTE_FIELD_IS_SYSTEM, is_system),
    flag_field!(Attribute, ATTRIBUTE_FIELD_IS_API, is_api),
    text_field!(Attribute, ATTRIBUTE_FIELD_PROPERTY_TYPE, property_type),
    text_field!(Attribute, ATTRIBUTE_FIELD_OPTION, option),
    text_field!(Attribute, FIELD_DESCRIPTION, description),
    text_field!(Attribute, FIELD_CREATOR, creator),
];

impl Tagged for Attribute {
    fn descriptors() -> &'static [FieldDescriptor<Self>] {
        ATTRIBUTE_FIELDS
    }
}
