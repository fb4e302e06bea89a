//! # Value sequences
//!
//! The typed sequence behind a dimension. Each category knows its own
//! column count; opaque host sequences report theirs when constructed.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::error::ConfigError;
use super::record::Record;
use super::value::{Matrix, Numeric, NumericKind};

/// Which slicing rule a sequence follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Numeric(NumericKind),
    Boolean,
    Text,
    NestedRecord,
    Opaque,
}

/// A `1 x n` sequence of records sharing one field layout
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSeq {
    fields: Vec<String>,
    items: Vec<Record>,
}

impl RecordSeq {
    /// Every record must carry the same field names in the same order
    pub fn new(items: Vec<Record>) -> Result<Self, ConfigError> {
        let fields: Vec<String> = match items.first() {
            Some(first) => first.names().map(str::to_owned).collect(),
            None => Vec::new(),
        };

        for (position, item) in items.iter().enumerate().skip(1) {
            if !item.names().eq(fields.iter().map(String::as_str)) {
                return Err(ConfigError::FieldMismatch {
                    position,
                    expected: fields,
                    got: item.names().map(str::to_owned).collect(),
                });
            }
        }

        Ok(Self { fields, items })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.items.iter()
    }
}

/// A host-owned sequence sliced through the `Subscript` port
#[derive(Clone)]
pub struct OpaqueSeq {
    type_name: String,
    columns: usize,
    handle: Arc<dyn Any + Send + Sync>,
}

impl OpaqueSeq {
    /// Wrap a host handle; `columns` is the host's column count
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, columns: usize, handle: T) -> Self {
        Self {
            type_name: type_name.into(),
            columns,
            handle: Arc::new(handle),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref()
    }
}

impl fmt::Debug for OpaqueSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueSeq")
            .field("type_name", &self.type_name)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// The values one dimension ranges over
#[derive(Debug, Clone)]
pub enum ValueSeq {
    Numeric(Numeric),
    Boolean(Matrix<bool>),
    /// A row of characters
    Text(Vec<char>),
    Records(RecordSeq),
    Opaque(OpaqueSeq),
}

impl ValueSeq {
    /// A text row from a string, one column per character
    pub fn text(s: &str) -> Self {
        ValueSeq::Text(s.chars().collect())
    }

    /// A nested-record sequence; see `RecordSeq::new`
    pub fn records(items: Vec<Record>) -> Result<Self, ConfigError> {
        RecordSeq::new(items).map(ValueSeq::Records)
    }

    pub fn category(&self) -> Category {
        match self {
            ValueSeq::Numeric(n) => Category::Numeric(n.kind()),
            ValueSeq::Boolean(_) => Category::Boolean,
            ValueSeq::Text(_) => Category::Text,
            ValueSeq::Records(_) => Category::NestedRecord,
            ValueSeq::Opaque(_) => Category::Opaque,
        }
    }

    /// Number of selectable columns
    pub fn columns(&self) -> usize {
        match self {
            ValueSeq::Numeric(n) => n.cols(),
            ValueSeq::Boolean(m) => m.cols(),
            ValueSeq::Text(chars) => chars.len(),
            ValueSeq::Records(records) => records.len(),
            ValueSeq::Opaque(opaque) => opaque.columns(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns() == 0
    }
}

impl From<Numeric> for ValueSeq {
    fn from(numeric: Numeric) -> Self {
        ValueSeq::Numeric(numeric)
    }
}

impl From<Vec<bool>> for ValueSeq {
    fn from(values: Vec<bool>) -> Self {
        ValueSeq::Boolean(Matrix::row(values))
    }
}

impl From<Matrix<bool>> for ValueSeq {
    fn from(matrix: Matrix<bool>) -> Self {
        ValueSeq::Boolean(matrix)
    }
}

impl From<&str> for ValueSeq {
    fn from(s: &str) -> Self {
        ValueSeq::text(s)
    }
}

impl From<String> for ValueSeq {
    fn from(s: String) -> Self {
        ValueSeq::text(&s)
    }
}

impl From<RecordSeq> for ValueSeq {
    fn from(records: RecordSeq) -> Self {
        ValueSeq::Records(records)
    }
}

impl From<OpaqueSeq> for ValueSeq {
    fn from(opaque: OpaqueSeq) -> Self {
        ValueSeq::Opaque(opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::{NumberClass, Value};

    fn record(pairs: &[(&str, i64)]) -> Record {
        pairs
            .iter()
            .map(|(name, v)| (name.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_columns_per_category() {
        assert_eq!(ValueSeq::from(vec![1.0, 2.0, 3.0]).columns(), 3);
        assert_eq!(ValueSeq::from(vec![true, false]).columns(), 2);
        assert_eq!(ValueSeq::from("héllo").columns(), 5);
        assert_eq!(ValueSeq::Opaque(OpaqueSeq::new("cell", 4, ())).columns(), 4);

        let multi_row = Matrix::new(3, 2, vec![0u32; 6]).unwrap();
        assert_eq!(ValueSeq::from(multi_row).columns(), 2);
    }

    #[test]
    fn test_category() {
        match ValueSeq::from(vec![1i32]).category() {
            Category::Numeric(kind) => {
                assert_eq!(kind.bits, 32);
                assert_eq!(kind.class, NumberClass::Signed);
            }
            other => panic!("Expected Numeric, got {:?}", other),
        }
        assert_eq!(ValueSeq::from("ab").category(), Category::Text);
        assert_eq!(ValueSeq::records(vec![]).unwrap().category(), Category::NestedRecord);
    }

    #[test]
    fn test_record_seq_requires_same_fields() {
        let ok = RecordSeq::new(vec![record(&[("x", 1), ("y", 2)]), record(&[("x", 3), ("y", 4)])]);
        assert_eq!(ok.unwrap().fields(), &["x".to_string(), "y".to_string()]);

        let reordered = RecordSeq::new(vec![record(&[("x", 1), ("y", 2)]), record(&[("y", 3), ("x", 4)])]);
        assert!(matches!(reordered, Err(ConfigError::FieldMismatch { position: 1, .. })));
    }

    #[test]
    fn test_empty_sequences() {
        assert!(ValueSeq::from(Vec::<f64>::new()).is_empty());
        assert!(ValueSeq::from("").is_empty());
        assert!(ValueSeq::records(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_opaque_debug_hides_handle() {
        let seq = OpaqueSeq::new("table", 2, vec![1, 2]);
        let text = format!("{:?}", seq);
        assert!(text.contains("table"));
        assert_eq!(seq.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2]));
    }
}
