//! Data model for delimited text tables

mod column;
mod key;
mod table;

pub use column::ColumnRef;
pub use key::KeyBuilder;
pub use table::{Row, Table};
