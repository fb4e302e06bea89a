//! # Values
//!
//! Column-major matrices, the numeric sum type, and the single value a
//! dimension contributes to a record.
//!
//! A sequence of `cols` columns is selectable along its columns: slicing
//! column `i` of a `rows x cols` matrix yields an owned `rows x 1` matrix.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use num_complex::{Complex32, Complex64};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::error::ConfigError;
use super::record::Record;
use super::seq::ValueSeq;

// ============================================================================
// MATRIX
// ============================================================================

/// Dense column-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Create a `rows x cols` matrix from column-major data
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ConfigError> {
        match rows.checked_mul(cols) {
            Some(len) if len == data.len() => Ok(Self { rows, cols, data }),
            _ => Err(ConfigError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            }),
        }
    }

    /// A `1 x n` row, one column per element
    pub fn row(data: Vec<T>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// A `1 x 1` matrix
    pub fn scalar(value: T) -> Self {
        Self::row(vec![value])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column-major element storage
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(col * self.rows + row)
    }

    /// The only element of a `1 x 1` matrix
    pub fn as_scalar(&self) -> Option<&T> {
        match self.data.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }

    /// Copy column `index` out as an owned `rows x 1` matrix
    pub fn column(&self, index: usize) -> Option<Self> {
        if index >= self.cols {
            return None;
        }
        let start = index * self.rows;
        Some(Self {
            rows: self.rows,
            cols: 1,
            data: self.data[start..start + self.rows].to_vec(),
        })
    }
}

/// Scalars serialize bare, anything else as a flat column-major sequence
impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.data.as_slice() {
            [value] => value.serialize(serializer),
            data => data.serialize(serializer),
        }
    }
}

// ============================================================================
// NUMERIC
// ============================================================================

/// Representation class of a numeric element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberClass {
    Signed,
    Unsigned,
    Float,
}

/// Width, class and complexity of a numeric matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericKind {
    /// Bits per (real) component
    pub bits: u8,
    pub class: NumberClass,
    pub complex: bool,
}

macro_rules! numeric_types {
    ($($variant:ident($ty:ty) => $bits:expr, $class:ident, $complex:expr;)*) => {
        /// A numeric matrix of one fixed element type
        #[derive(Debug, Clone, PartialEq)]
        pub enum Numeric {
            $($variant(Matrix<$ty>),)*
        }

        impl Numeric {
            pub fn kind(&self) -> NumericKind {
                match self {
                    $(Numeric::$variant(_) => NumericKind {
                        bits: $bits,
                        class: NumberClass::$class,
                        complex: $complex,
                    },)*
                }
            }

            pub fn rows(&self) -> usize {
                match self {
                    $(Numeric::$variant(m) => m.rows(),)*
                }
            }

            pub fn cols(&self) -> usize {
                match self {
                    $(Numeric::$variant(m) => m.cols(),)*
                }
            }

            /// Copy column `index` out, keeping the element type
            pub fn column(&self, index: usize) -> Option<Numeric> {
                match self {
                    $(Numeric::$variant(m) => m.column(index).map(Numeric::$variant),)*
                }
            }
        }

        impl Serialize for Numeric {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Numeric::$variant(m) => m.serialize(serializer),)*
                }
            }
        }

        $(
            impl From<Matrix<$ty>> for Numeric {
                fn from(matrix: Matrix<$ty>) -> Self {
                    Numeric::$variant(matrix)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Numeric(Numeric::$variant(Matrix::scalar(value)))
                }
            }

            impl From<Vec<$ty>> for ValueSeq {
                fn from(values: Vec<$ty>) -> Self {
                    ValueSeq::Numeric(Numeric::$variant(Matrix::row(values)))
                }
            }

            impl From<Matrix<$ty>> for ValueSeq {
                fn from(matrix: Matrix<$ty>) -> Self {
                    ValueSeq::Numeric(Numeric::$variant(matrix))
                }
            }
        )*
    };
}

numeric_types! {
    I8(i8) => 8, Signed, false;
    I16(i16) => 16, Signed, false;
    I32(i32) => 32, Signed, false;
    I64(i64) => 64, Signed, false;
    U8(u8) => 8, Unsigned, false;
    U16(u16) => 16, Unsigned, false;
    U32(u32) => 32, Unsigned, false;
    U64(u64) => 64, Unsigned, false;
    F32(f32) => 32, Float, false;
    F64(f64) => 64, Float, false;
    C32(Complex32) => 32, Float, true;
    C64(Complex64) => 64, Float, true;
}

// ============================================================================
// OPAQUE
// ============================================================================

/// A host value the core cannot look inside
///
/// Equality is identity: two opaque values are equal when they share the
/// same handle.
#[derive(Clone)]
pub struct OpaqueValue {
    type_name: String,
    handle: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, handle: T) -> Self {
        Self {
            type_name: type_name.into(),
            handle: Arc::new(handle),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && Arc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueValue({})", self.type_name)
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// The single value one dimension contributes to a record
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// One column of a numeric matrix
    Numeric(Numeric),
    /// One column of a boolean matrix
    Boolean(Matrix<bool>),
    /// One character of a text row
    Char(char),
    /// A whole string, as carried by record fields
    Text(String),
    /// One element of a record sequence
    Record(Record),
    /// Whatever the host subscript produced
    Opaque(OpaqueValue),
}

impl Value {
    /// Numeric scalar widened to `f64` (real part only)
    pub fn as_f64(&self) -> Option<f64> {
        let Value::Numeric(numeric) = self else {
            return None;
        };
        let value = match numeric {
            Numeric::I8(m) => *m.as_scalar()? as f64,
            Numeric::I16(m) => *m.as_scalar()? as f64,
            Numeric::I32(m) => *m.as_scalar()? as f64,
            Numeric::I64(m) => *m.as_scalar()? as f64,
            Numeric::U8(m) => *m.as_scalar()? as f64,
            Numeric::U16(m) => *m.as_scalar()? as f64,
            Numeric::U32(m) => *m.as_scalar()? as f64,
            Numeric::U64(m) => *m.as_scalar()? as f64,
            Numeric::F32(m) => *m.as_scalar()? as f64,
            Numeric::F64(m) => *m.as_scalar()?,
            Numeric::C32(m) => m.as_scalar()?.re as f64,
            Numeric::C64(m) => m.as_scalar()?.re,
        };
        Some(value)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(m) => m.as_scalar().copied(),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            Value::Opaque(opaque) => Some(opaque),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(Matrix::scalar(value))
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Numeric> for Value {
    fn from(numeric: Numeric) -> Self {
        Value::Numeric(numeric)
    }
}

impl From<OpaqueValue> for Value {
    fn from(opaque: OpaqueValue) -> Self {
        Value::Opaque(opaque)
    }
}

/// Opaque values have no data the crate can see, so they serialize as a
/// one-entry map `{"opaque": <type name>}`. That keeps them apart from
/// `Char` and `Text`, which serialize as plain strings.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Numeric(numeric) => numeric.serialize(serializer),
            Value::Boolean(matrix) => matrix.serialize(serializer),
            Value::Char(c) => c.serialize(serializer),
            Value::Text(text) => serializer.serialize_str(text),
            Value::Record(record) => record.serialize(serializer),
            Value::Opaque(opaque) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("opaque", opaque.type_name())?;
                map.end()
            }
        }
    }
}
