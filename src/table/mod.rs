//! Typed in-memory table model.
//!
//! A [`Table`] is a set of equally sized named [`Column`]s of [`Value`]
//! cells. Types are not declared up front: each column's [`ColumnType`] is
//! inferred from its current values, so edits can retype a column. All
//! edit operations validate before mutating and leave the table unchanged
//! on failure.

mod column;
mod table;
mod value;

pub use column::{Column, ColumnType};
pub use table::Table;
pub use value::Value;
