//! Cell values and their text form.

use std::fmt;

/// Field tokens that read as a missing value.
///
/// This is the common subset of the placeholder tokens the pandas CSV
/// reader treats as NA, which is what most of the files this tool sees
/// were produced against.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None",
];

/// A single typed cell value.
///
/// Missing cells are first-class (`Null`) rather than a sentinel inside
/// another variant, so integer columns with holes stay integer columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing cell.
    Null,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Free text.
    Text(String),
}

impl Value {
    /// Parse a raw field into a typed value.
    ///
    /// The trimmed field is checked against the missing-token set, then
    /// tried as an integer, then as a float. NaN in any spelling reads
    /// as missing. Anything else keeps the original (untrimmed) text.
    pub fn parse(raw: &str) -> Value {
        let trimmed = raw.trim();
        if MISSING_TOKENS.contains(&trimmed) {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            // f64's parser also accepts spellings like "NAN" or "-nan"
            // that the token set does not. Every NaN reads as missing,
            // so no live cell is ever a float NaN.
            if f.is_nan() {
                return Value::Null;
            }
            return Value::Float(f);
        }
        Value::Text(raw.to_string())
    }

    /// Whether this cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Display form, or `None` for a missing cell.
    ///
    /// Previews serialize this as JSON `null` so the UI can highlight
    /// missing cells.
    pub fn display(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Hashable key used for full-row equality (duplicate detection) and
    /// distinct counting. `Null` keys equal each other; floats compare
    /// bitwise with negative zero normalized.
    pub(crate) fn key(&self) -> ValueKey {
        match self {
            Value::Null => ValueKey::Null,
            Value::Int(i) => ValueKey::Int(*i),
            Value::Float(f) => {
                let f = if *f == 0.0 { 0.0 } else { *f };
                ValueKey::Float(f.to_bits())
            }
            Value::Text(s) => ValueKey::Text(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            // Whole floats keep a trailing .0 so a float cell stays a
            // float cell across an export/import cycle.
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Owned, hashable stand-in for a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Null,
    Int(i64),
    Float(u64),
    Text(String),
}
