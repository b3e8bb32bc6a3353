//! Rackspec core: pure extraction rules and the record model.
mod extract;
mod field;
mod record;

pub use extract::extract;
pub use field::{FieldMap, SpecField};
pub use record::{model_name_from_url, SpecRecord};
