//! # Column extraction
//!
//! One slicing rule per sequence category. Native categories copy the
//! column out in-process; opaque sequences go through the `Subscript` port
//! with a 1-based column.

use crate::core::{Dimension, Value, ValueSeq};
use crate::ports::{SliceFailure, SliceResult, Subscript};

/// Slice 0-based `column` out of `dim`, as an owned value
pub fn extract(dim: &Dimension, column: usize, subscript: &dyn Subscript) -> SliceResult<Value> {
    let out_of_range = || SliceFailure::ColumnOutOfRange {
        dimension: dim.name().to_owned(),
        column,
        columns: dim.size(),
    };

    match dim.values() {
        ValueSeq::Numeric(numeric) => numeric
            .column(column)
            .map(Value::Numeric)
            .ok_or_else(out_of_range),
        ValueSeq::Boolean(matrix) => matrix
            .column(column)
            .map(Value::Boolean)
            .ok_or_else(out_of_range),
        ValueSeq::Text(chars) => chars
            .get(column)
            .copied()
            .map(Value::Char)
            .ok_or_else(out_of_range),
        ValueSeq::Records(records) => records
            .get(column)
            .cloned()
            .map(Value::Record)
            .ok_or_else(out_of_range),
        ValueSeq::Opaque(seq) => {
            if column >= seq.columns() {
                return Err(out_of_range());
            }
            subscript.subscript(seq, column + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Matrix, Numeric, OpaqueSeq, Record};
    use crate::ports::Unsupported;

    #[test]
    fn test_numeric_multi_row_column() {
        // [[1.0, 2.0, 3.0],
        //  [0.1, 0.2, 0.3]]
        let m = Matrix::new(2, 3, vec![1.0, 0.1, 2.0, 0.2, 3.0, 0.3]).unwrap();
        let dim = Dimension::new("pair", ValueSeq::from(m));

        let value = extract(&dim, 2, &Unsupported).unwrap();
        assert_eq!(
            value,
            Value::Numeric(Numeric::F64(Matrix::new(2, 1, vec![3.0, 0.3]).unwrap()))
        );
    }

    #[test]
    fn test_boolean_column() {
        let dim = Dimension::new("flag", ValueSeq::from(vec![false, true]));
        assert_eq!(extract(&dim, 1, &Unsupported).unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_text_yields_single_char() {
        let dim = Dimension::new("letter", ValueSeq::from("xyz"));
        assert_eq!(extract(&dim, 1, &Unsupported).unwrap(), Value::Char('y'));
    }

    #[test]
    fn test_nested_record_is_deep_copied() {
        let items = vec![
            Record::new().with("lr", 0.1).with("name", "adam"),
            Record::new().with("lr", 0.01).with("name", "sgd"),
        ];
        let dim = Dimension::new("opt", ValueSeq::records(items.clone()).unwrap());

        let value = extract(&dim, 1, &Unsupported).unwrap();
        assert_eq!(value.as_record(), Some(&items[1]));

        drop(dim);
        let copy = value.as_record().unwrap();
        assert_eq!(copy.get("name").and_then(Value::as_str), Some("sgd"));
        assert_eq!(
            serde_json::to_value(copy).unwrap(),
            serde_json::json!({ "lr": 0.01, "name": "sgd" })
        );
    }

    #[test]
    fn test_opaque_uses_one_based_subscript() {
        let seq = OpaqueSeq::new("labels", 3, vec!["lo", "mid", "hi"]);
        let dim = Dimension::new("level", ValueSeq::Opaque(seq));

        let subscript = |seq: &OpaqueSeq, column: usize| -> SliceResult<Value> {
            let labels = seq.downcast_ref::<Vec<&'static str>>().unwrap();
            Ok(Value::from(labels[column - 1]))
        };

        assert_eq!(extract(&dim, 0, &subscript).unwrap(), Value::from("lo"));
        assert_eq!(extract(&dim, 2, &subscript).unwrap(), Value::from("hi"));
    }

    #[test]
    fn test_opaque_without_subscript_fails() {
        let dim = Dimension::new("obj", ValueSeq::Opaque(OpaqueSeq::new("handle", 1, ())));
        let err = extract(&dim, 0, &Unsupported).unwrap_err();
        assert!(matches!(err, SliceFailure::Unavailable { .. }));
    }

    #[test]
    fn test_column_out_of_range() {
        let dim = Dimension::new("a", ValueSeq::from(vec![1u8, 2]));
        match extract(&dim, 2, &Unsupported) {
            Err(SliceFailure::ColumnOutOfRange { dimension, column, columns }) => {
                assert_eq!(dimension, "a");
                assert_eq!(column, 2);
                assert_eq!(columns, 2);
            }
            other => panic!("Expected ColumnOutOfRange, got {:?}", other),
        }
    }
}
