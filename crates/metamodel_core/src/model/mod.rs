//! Metadata records exchanged with the remote metadata service.
//!
//! # Responsibility
//! - Define the wire shape of objects, attributes, groups and classifications.
//! - Publish one static field-descriptor table per record for the codec.
//!
//! # Invariants
//! - Serde wire names and descriptor names are identical for every field.
//! - Every record is scoped to a tenant through `bk_supplier_account`.

pub mod attribute;
pub mod classification;
pub mod group;
pub mod object;

pub use attribute::Attribute;
pub use classification::Classification;
pub use group::Group;
pub use object::Object;

/// Internal identifier assigned by the metadata service.
pub const FIELD_ID: &str = "id";
/// Tenant identifier shared by every record.
pub const FIELD_SUPPLIER_ACCOUNT: &str = "bk_supplier_account";
/// Object-type code; also the scoping key of attributes and groups.
pub const FIELD_OBJ_ID: &str = "bk_obj_id";
/// Classification code.
pub const FIELD_CLASSIFICATION_ID: &str = "bk_classification_id";
pub const FIELD_IS_PRE: &str = "ispre";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_CREATOR: &str = "creator";
pub const FIELD_MODIFIER: &str = "modifier";
