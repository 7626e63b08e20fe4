//! Dynamic result value stored in observable logs.
//!
//! Observables may return heterogeneous results across update calls, so logs
//! store a small tagged variant rather than a fixed numeric type. Table and
//! JSON export assume a given column is *practically* homogeneous for
//! downstream analysis, but nothing enforces it.

use std::fmt::Display;

use super::error::ObserveError;

/// A dynamically-typed result value.
///
/// Conversions from the common primitive types are provided via `From`, so
/// observables usually end with `Ok(Value::from(x))` or `Ok(x.into())`.
///
/// # Examples
///
/// ```rust
/// use osservabili::observables::Value;
///
/// let v = Value::from(4.5);
/// assert_eq!(v.as_f64(), Some(4.5));
/// assert_eq!(v.kind(), "float");
///
/// let v = Value::from("converged");
/// assert_eq!(v.as_str(), Some("converged"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean flag (e.g. a convergence predicate).
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A text value.
    Text(String),
    /// An ordered collection of values (e.g. a parameter vector).
    List(Vec<Value>),
}

impl Value {
    /// The kind of this value, as a short lowercase tag.
    ///
    /// Used in [`ObserveError::TypeMismatch`] messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
        }
    }

    /// Returns the boolean value, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float. `Int` values are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns the text value, if this is a `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the integer value or a [`ObserveError::TypeMismatch`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osservabili::observables::Value;
    ///
    /// assert_eq!(Value::Int(7).expect_i64().unwrap(), 7);
    /// assert!(Value::Text("x".into()).expect_i64().is_err());
    /// ```
    pub fn expect_i64(&self) -> Result<i64, ObserveError> {
        self.as_i64().ok_or(ObserveError::TypeMismatch {
            expected: "int",
            found: self.kind(),
        })
    }

    /// Returns the value as a float (widening `Int`) or a
    /// [`ObserveError::TypeMismatch`].
    pub fn expect_f64(&self) -> Result<f64, ObserveError> {
        self.as_f64().ok_or(ObserveError::TypeMismatch {
            expected: "float",
            found: self.kind(),
        })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}
