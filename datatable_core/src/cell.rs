use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Cell value as exposed by data backends.
/// Dates are carried as epoch day numbers, remote sources decide the precision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::I64(x) => Some(*x as f64),
            CellValue::F64(x) => Some(*x),
            _ => None,
        }
    }

    /// Total ordering used when sorting rows. Empty cells sort first,
    /// values of different kinds group by kind.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Str(a), CellValue::Str(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => a.kind_rank().cmp(&b.kind_rank()),
            },
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::I64(_) | CellValue::F64(_) => 2,
            CellValue::Str(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::I64(v) => write!(f, "{v}"),
            CellValue::F64(v) => write!(f, "{v}"),
            CellValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Str(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Str(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::I64(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::F64(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sorts_first() {
        assert_eq!(
            CellValue::Empty.compare(&CellValue::I64(0)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Str("a".into()).compare(&CellValue::Empty),
            Ordering::Greater
        );
    }

    #[test]
    fn numbers_compare_across_kinds() {
        assert_eq!(
            CellValue::I64(2).compare(&CellValue::F64(2.5)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::F64(3.0).compare(&CellValue::I64(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn display_renders_plain_values() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(CellValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn blank_strings_count_as_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(!CellValue::I64(0).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
    }
}
