//! Group (attribute presentation grouping) record.

use crate::codec::{flag_field, integer_field, text_field, FieldDescriptor, Tagged};
use crate::model::{FIELD_ID, FIELD_IS_PRE, FIELD_OBJ_ID, FIELD_SUPPLIER_ACCOUNT};
use serde::{Deserialize, Serialize};

pub const GROUP_FIELD_GROUP_ID: &str = "bk_group_id";
pub const GROUP_FIELD_GROUP_NAME: &str = "bk_group_name";
pub const GROUP_FIELD_GROUP_INDEX: &str = "bk_group_index";
pub const GROUP_FIELD_IS_DEFAULT: &str = "bk_isdefault";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: i64,
    #[serde(rename = "bk_group_id")]
    pub group_id: String,
    #[serde(rename = "bk_group_name")]
    pub group_name: String,
    #[serde(rename = "bk_group_index")]
    pub group_index: i64,
    #[serde(rename = "bk_obj_id")]
    pub obj_id: String,
    #[serde(rename = "bk_supplier_account")]
    pub owner_id: String,
    #[serde(rename = "bk_isdefault")]
    pub is_default: bool,
    #[serde(rename = "ispre")]
    pub is_pre: bool,
}

static GROUP_FIELDS: &[FieldDescriptor<Group>] = &[
    integer_field!(Group, FIELD_ID, id),
    text_field!(Group, GROUP_FIELD_GROUP_ID, group_id, required),
    text_field!(Group, GROUP_FIELD_GROUP_NAME, group_name),
    integer_field!(Group, GROUP_FIELD_GROUP_INDEX, group_index),
    text_field!(Group, FIELD_OBJ_ID, obj_id, required),
    text_field!(Group, FIELD_SUPPLIER_ACCOUNT, owner_id),
    flag_field!(Group, GROUP_FIELD_IS_DEFAULT, is_default),
    flag_field!(Group, FIELD_IS_PRE, is_pre),
];

impl Tagged for Group {
    fn descriptors() -> &'static [FieldDescriptor<Self>] {
        GROUP_FIELDS
    }
}
