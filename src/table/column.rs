//! Named columns and inferred column types.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Distinct-value ceiling for the categorical heuristic.
const CATEGORICAL_MAX_DISTINCT: usize = 64;

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// All non-missing values are integers.
    Integer,
    /// Numeric column with at least one non-integer value.
    Float,
    /// Text column with too many distinct values to chart as categories.
    Text,
    /// Text column with few distinct values relative to its size.
    Categorical,
}

impl ColumnType {
    /// Whether values of this type carry a numeric view.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Categorical => "categorical",
        };
        write!(f, "{}", name)
    }
}

/// A named column of cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Infer the column type from the current values.
    ///
    /// Numeric wins over text: a column is `Integer` if every non-missing
    /// value is an integer, `Float` if every non-missing value is numeric
    /// and at least one is a float. Missing cells do not demote an integer
    /// column. A text column becomes `Categorical` when its distinct
    /// non-missing values number at most [`CATEGORICAL_MAX_DISTINCT`] and
    /// at most half of its non-missing cells. An all-missing or empty
    /// column reads as `Text`.
    pub fn column_type(&self) -> ColumnType {
        let mut saw_int = false;
        let mut saw_float = false;
        let mut saw_text = false;
        let mut non_null = 0usize;

        for value in &self.values {
            match value {
                Value::Null => continue,
                Value::Int(_) => saw_int = true,
                Value::Float(_) => saw_float = true,
                Value::Text(_) => saw_text = true,
            }
            non_null += 1;
        }

        if non_null == 0 {
            return ColumnType::Text;
        }
        if !saw_text {
            return if saw_float {
                ColumnType::Float
            } else {
                debug_assert!(saw_int);
                ColumnType::Integer
            };
        }

        let distinct: HashSet<_> = self
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .map(|v| v.key())
            .collect();
        if distinct.len() <= CATEGORICAL_MAX_DISTINCT && distinct.len() * 2 <= non_null {
            ColumnType::Categorical
        } else {
            ColumnType::Text
        }
    }
}
