//! Classification (top-level object category) record.

use crate::codec::{integer_field, text_field, FieldDescriptor, Tagged};
use crate::model::{FIELD_CLASSIFICATION_ID, FIELD_ID, FIELD_SUPPLIER_ACCOUNT};
use serde::{Deserialize, Serialize};

pub const CLASSIFICATION_FIELD_NAME: &str = "bk_classification_name";
pub const CLASSIFICATION_FIELD_TYPE: &str = "bk_classification_type";
pub const CLASSIFICATION_FIELD_ICON: &str = "bk_classification_icon";

/// Top-level category grouping object types.
///
/// `classification_id` is unique per tenant by contract of the metadata
/// service; this layer does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    pub id: i64,
    #[serde(rename = "bk_classification_id")]
    pub classification_id: String,
    #[serde(rename = "bk_classification_name")]
    pub classification_name: String,
    #[serde(rename = "bk_classification_type")]
    pub classification_type: String,
    #[serde(rename = "bk_classification_icon")]
    pub classification_icon: String,
    #[serde(rename = "bk_supplier_account")]
    pub owner_id: String,
}

static CLASSIFICATION_FIELDS: &[FieldDescriptor<Classification>] = &[
    integer_field!(Classification, FIELD_ID, id),
    text_field!(
        Classification,
        FIELD_CLASSIFICATION_ID,
        classification_id,
        required
    ),
    text_field!(Classification, CLASSIFICATION_FIELD_NAME, classification_name),
    text_field!(Classification, CLASSIFICATION_FIELD_TYPE, classification_type),
    text_field!(Classification, CLASSIFICATION_FIELD_ICON, classification_icon),
    text_field!(Classification, FIELD_SUPPLIER_ACCOUNT, owner_id),
];

impl Tagged for Classification {
    fn descriptors() -> &'static [FieldDescriptor<Self>] {
        CLASSIFICATION_FIELDS
    }
}
