//! The schema entity model
//!
//! Database → Table → Column graph plus constraints, vendor parameters, and
//! the type/default metadata platforms consume. The model is built by an
//! external schema loader, mutated by behaviors during the augmentation
//! pass, and read-only once DDL emission starts.

mod column;
mod constraint;
mod database;
mod domain;
mod table;
mod vendor;

pub use column::Column;
pub use constraint::{ForeignKey, ForeignKeyAction, Index, Unique};
pub use database::Database;
pub use domain::{DefaultValue, DefaultValueKind, Domain};
pub use table::{IdMethod, Table};
pub use vendor::VendorInfo;
