//! Scalar attribute values with a total order usable for canonical encodings.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::{CanonError, ErrorInfo};

/// A scalar attribute value attached to vertices, edges, or graphs.
///
/// The variants cover the value kinds accepted by the canonicalization
/// pipeline. Unlike raw `f64`, the type is totally ordered and hashable:
/// floats compare with [`f64::total_cmp`] and hash through their bit
/// pattern, so `Eq`, `Ord`, and `Hash` agree with each other. NaN payloads
/// are representable but rejected by [`AttrValue::validate`] before they can
/// reach a canonical encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number (total order, bit-pattern hash).
    Float(f64),
    /// UTF-8 string.
    Str(String),
}

impl AttrValue {
    /// Checks that the value is usable as a hash/equality key.
    pub fn validate(&self) -> Result<(), CanonError> {
        match self {
            AttrValue::Float(f) if f.is_nan() => Err(CanonError::Attribute(
                ErrorInfo::new("nan-attribute", "NaN is not a comparable attribute value")
                    .with_hint("replace the NaN with a finite float or a string marker"),
            )),
            _ => Ok(()),
        }
    }

    /// Discriminant used for cross-kind ordering and byte encodings.
    pub(crate) fn kind_tag(&self) -> u8 {
        match self {
            AttrValue::Bool(_) => 0,
            AttrValue::Int(_) => 1,
            AttrValue::Float(_) => 2,
            AttrValue::Str(_) => 3,
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AttrValue {}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AttrValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use AttrValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Str(a), Str(b)) => a.cmp(b),
            _ => self.kind_tag().cmp(&other.kind_tag()),
        }
    }
}

impl Hash for AttrValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.kind_tag());
        match self {
            AttrValue::Bool(b) => b.hash(state),
            AttrValue::Int(i) => i.hash(state),
            AttrValue::Float(f) => f.to_bits().hash(state),
            AttrValue::Str(s) => s.hash(state),
        }
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}
