use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a container
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common DataFrame dtypes.
///
/// Filters and sort orders keep values in `BTreeSet`s, so `CellValue` is
/// totally ordered. Values of different kinds order by kind first
/// (`Null < Bool < number < String < Date`). Integers and floats are one kind
/// and compare by numeric value, so `Integer(1) == Float(1.0)`; `-0.0` equals
/// `0.0` and NaNs sort at the ends by sign.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text.
    Date(String),
    Null,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
                Date(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => cmp_f64(*a, *b),
            (Integer(a), Float(b)) => cmp_i64_f64(*a, *b),
            (Float(a), Integer(b)) => cmp_i64_f64(*b, *a).reverse(),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`; NaNs fall back to `total_cmp`.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn cmp_i64_f64(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    match cmp_f64(i as f64, f) {
        // `i as f64` rounded onto `f`: `f` is integral, compare exactly.
        Ordering::Equal if f < i64::MAX as f64 => i.cmp(&(f as i64)),
        // `f` is 2^63, above every i64.
        Ordering::Equal => Ordering::Less,
        ord => ord,
    }
}

/// The integer a float is equal to, if any.
fn integral_f64(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal numbers hash alike whatever their variant.
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Integer(i) => {
                2u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => match integral_f64(*f) {
                Some(i) => {
                    2u8.hash(state);
                    i.hash(state);
                }
                None => {
                    3u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
            CellValue::String(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            CellValue::Date(d) => {
                5u8.hash(state);
                d.hash(state);
            }
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Best-effort typing of a raw text cell.
    ///
    /// Empty text is `Null`; integers win over floats; `true`/`false` are
    /// booleans; everything else stays a string.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn orders_by_kind_then_value() {
        let set: BTreeSet<CellValue> = [
            CellValue::from("b"),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::from("a"),
            CellValue::Bool(true),
            CellValue::Integer(-1),
        ]
        .into_iter()
        .collect();

        let ordered: Vec<CellValue> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Integer(-1),
                CellValue::Float(1.5),
                CellValue::Integer(3),
                CellValue::from("a"),
                CellValue::from("b"),
            ]
        );
    }

    #[test]
    fn integers_and_floats_compare_by_value() {
        assert_eq!(CellValue::Integer(1), CellValue::Float(1.0));
        assert_eq!(CellValue::Float(-0.0), CellValue::Float(0.0));
        assert!(CellValue::Integer(2) > CellValue::Float(1.5));
        assert!(CellValue::Float(2.5) > CellValue::Integer(2));
        assert!(CellValue::Integer(i64::MAX) < CellValue::Float(i64::MAX as f64));
        assert!(CellValue::Integer((1 << 53) + 1) > CellValue::Float((1u64 << 53) as f64));
        assert!(CellValue::Integer(i64::MAX) < CellValue::Float(f64::NAN));
        assert!(CellValue::Integer(3) < CellValue::from("3"));

        let set: BTreeSet<CellValue> = [CellValue::Float(1.0), CellValue::Float(2.0)].into();
        assert!(set.contains(&CellValue::guess("1")));
    }

    #[test]
    fn equal_numbers_hash_alike() {
        use std::collections::HashSet;

        let set: HashSet<CellValue> = [CellValue::Integer(5), CellValue::Float(0.0)].into();
        assert!(set.contains(&CellValue::Float(5.0)));
        assert!(set.contains(&CellValue::Float(-0.0)));
        assert!(!set.contains(&CellValue::Float(5.5)));
    }

    #[test]
    fn guesses_text_cells() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("4.5"), CellValue::Float(4.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("panda"), CellValue::from("panda"));
    }

    #[test]
    fn serializes_untagged() {
        let row = vec![CellValue::Integer(1), CellValue::from("x"), CellValue::Null];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[1,"x",null]"#);
    }
}
