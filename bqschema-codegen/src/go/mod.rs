//! Go code generation modules.

pub mod imports;
pub mod naming;
pub mod structs;
pub mod types;

pub use imports::aggregate_imports;
pub use naming::normalize_identifier;
pub use structs::{GeneratedUnit, StructGenerator};
pub use types::{TypeMapping, map_field_type};
