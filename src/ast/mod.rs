//! Typed model of criteria, values and attribute definitions.

pub mod attribute;
pub mod criteria;
pub mod predicate;
pub mod values;

pub use attribute::{AttrType, AttributeDef, Attributes, ColumnMetadata};
pub use criteria::{Criteria, Sort, SortDirection};
pub use predicate::{ComparatorOp, Predicate, Where};
pub use values::Value;
