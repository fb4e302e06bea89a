//! # Python Bindings
//!
//! PyO3 bindings for grid-records, for driving parameter sweeps from Python.
//!
//! ## Python API
//!
//! ```python
//! from grid_records import Grid
//! import grid_records
//!
//! # Explicit handle
//! grid = Grid(["lr", "opt"], [[0.1, 0.01], "ab"])
//! len(grid)            # 4
//! grid.lookup(1)       # {'lr': 0.01, 'opt': 'a'}
//! grid.lookup_all()    # first dimension varies fastest
//!
//! # Process-wide current grid
//! grid_records.load(["n"], [[1, 2, 3]])
//! grid_records.lookup(2)                          # {'n': 3}
//! grid_records.load(["n"], [[4, 5]], index=0)     # load and look up at once
//! grid_records.unload()
//! ```
//!
//! Lists of bool, int, float or complex become native numeric dimensions,
//! `str` becomes a text dimension (one column per character) and a list of
//! dicts becomes a nested-record dimension. Anything else that supports
//! `len()` is kept opaque and sliced with `__getitem__`.

use std::sync::OnceLock;

use num_complex::Complex64;
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyComplex, PyDict, PyFloat, PyInt, PyList, PyString};

use crate::core::{
    GridConfig, GridSpec, IndexPolicy, Matrix, Numeric, OpaqueSeq, OpaqueValue, Record, Value, ValueSeq,
};
use crate::engine::{RecordBuilder, Session};
use crate::error::GridError;
use crate::ports::{SliceFailure, SliceResult, Subscript};

impl From<GridError> for PyErr {
    fn from(err: GridError) -> Self {
        match err {
            GridError::Config(e) => PyValueError::new_err(e.to_string()),
            GridError::Index(e) => PyIndexError::new_err(e.to_string()),
            GridError::Slice(e) => PyRuntimeError::new_err(e.to_string()),
        }
    }
}

// ============================================================================
// SUBSCRIPT PORT
// ============================================================================

/// Slices opaque Python sequences with `__getitem__`
struct PySubscript;

impl Subscript for PySubscript {
    fn subscript(&self, seq: &OpaqueSeq, column: usize) -> SliceResult<Value> {
        let handle = seq
            .downcast_ref::<Py<PyAny>>()
            .ok_or_else(|| SliceFailure::Unavailable {
                type_name: seq.type_name().to_owned(),
            })?;

        Python::with_gil(|py| {
            let item = handle
                .bind(py)
                .get_item(column - 1)
                .map_err(|e| SliceFailure::Failed {
                    type_name: seq.type_name().to_owned(),
                    column,
                    reason: e.to_string(),
                })?;
            Ok(Value::Opaque(OpaqueValue::new(type_name(&item), item.unbind())))
        })
    }
}

fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "object".to_owned())
}

// ============================================================================
// PYTHON -> RUST
// ============================================================================

fn to_value_seq(obj: &Bound<'_, PyAny>) -> PyResult<ValueSeq> {
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(ValueSeq::text(s.to_str()?));
    }

    if let Ok(list) = obj.downcast::<PyList>() {
        if let Some(seq) = native_list(list)? {
            return Ok(seq);
        }
    }

    let columns = obj.len()?;
    Ok(ValueSeq::Opaque(OpaqueSeq::new(type_name(obj), columns, obj.clone().unbind())))
}

/// A homogeneous list as a native sequence, `None` if it is mixed
fn native_list(list: &Bound<'_, PyList>) -> PyResult<Option<ValueSeq>> {
    let items: Vec<Bound<'_, PyAny>> = list.iter().collect();

    if items.is_empty() {
        return Ok(Some(ValueSeq::from(Vec::<f64>::new())));
    }

    let all = |check: fn(&Bound<'_, PyAny>) -> bool| items.iter().all(check);

    let seq = if all(|i| i.is_instance_of::<PyBool>()) {
        let values = items.iter().map(|i| i.extract::<bool>()).collect::<PyResult<Vec<_>>>()?;
        ValueSeq::from(values)
    } else if all(|i| i.is_instance_of::<PyInt>()) {
        let values = items.iter().map(|i| i.extract::<i64>()).collect::<PyResult<Vec<_>>>()?;
        ValueSeq::from(values)
    } else if all(|i| i.is_instance_of::<PyFloat>() || i.is_instance_of::<PyInt>()) {
        let values = items.iter().map(|i| i.extract::<f64>()).collect::<PyResult<Vec<_>>>()?;
        ValueSeq::from(values)
    } else if all(|i| i.is_instance_of::<PyComplex>()) {
        let values = items
            .iter()
            .map(|i| i.extract::<Complex64>())
            .collect::<PyResult<Vec<_>>>()?;
        ValueSeq::from(values)
    } else if all(|i| i.is_instance_of::<PyDict>()) {
        let records = items
            .iter()
            .map(|i| to_record(i.downcast::<PyDict>()?))
            .collect::<PyResult<Vec<_>>>()?;
        ValueSeq::records(records).map_err(|e| PyValueError::new_err(e.to_string()))?
    } else {
        return Ok(None);
    };

    Ok(Some(seq))
}

fn to_record(dict: &Bound<'_, PyDict>) -> PyResult<Record> {
    let mut record = Record::with_capacity(dict.len());
    for (key, value) in dict.iter() {
        record.insert(key.str()?.to_str()?, to_value(&value)?);
    }
    Ok(record)
}

/// A single field value inside a dict element
fn to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::from(obj.extract::<bool>()?));
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(v) = obj.extract::<i64>() {
            return Ok(Value::from(v));
        }
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(Value::from(obj.extract::<f64>()?));
    }
    if obj.is_instance_of::<PyComplex>() {
        let c = obj.extract::<Complex64>()?;
        return Ok(Value::Numeric(Numeric::from(Matrix::scalar(c))));
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(Value::from(s.to_str()?));
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        return Ok(Value::Record(to_record(dict)?));
    }
    Ok(Value::Opaque(OpaqueValue::new(type_name(obj), obj.clone().unbind())))
}

fn to_spec(py: Python<'_>, names: Vec<String>, values: &[PyObject]) -> PyResult<GridSpec> {
    let values = values
        .iter()
        .map(|v| to_value_seq(v.bind(py)))
        .collect::<PyResult<Vec<_>>>()?;
    GridSpec::load(names, values).map_err(|e| PyValueError::new_err(e.to_string()))
}

// ============================================================================
// RUST -> PYTHON
// ============================================================================

fn matrix_to_py<T: ToPyObject + Clone>(py: Python<'_>, matrix: &Matrix<T>) -> PyObject {
    match matrix.as_scalar() {
        Some(value) => value.to_object(py),
        None => PyList::new_bound(py, matrix.data()).into_py(py),
    }
}

fn numeric_to_py(py: Python<'_>, numeric: &Numeric) -> PyObject {
    match numeric {
        Numeric::I8(m) => matrix_to_py(py, m),
        Numeric::I16(m) => matrix_to_py(py, m),
        Numeric::I32(m) => matrix_to_py(py, m),
        Numeric::I64(m) => matrix_to_py(py, m),
        Numeric::U8(m) => matrix_to_py(py, m),
        Numeric::U16(m) => matrix_to_py(py, m),
        Numeric::U32(m) => matrix_to_py(py, m),
        Numeric::U64(m) => matrix_to_py(py, m),
        Numeric::F32(m) => matrix_to_py(py, m),
        Numeric::F64(m) => matrix_to_py(py, m),
        Numeric::C32(m) => matrix_to_py(py, m),
        Numeric::C64(m) => matrix_to_py(py, m),
    }
}

fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    let obj = match value {
        Value::Numeric(numeric) => numeric_to_py(py, numeric),
        Value::Boolean(matrix) => matrix_to_py(py, matrix),
        Value::Char(c) => c.to_string().into_py(py),
        Value::Text(text) => text.as_str().into_py(py),
        Value::Record(record) => record_to_py(py, record)?,
        Value::Opaque(opaque) => match opaque.downcast_ref::<Py<PyAny>>() {
            Some(handle) => handle.clone_ref(py),
            None => opaque.type_name().into_py(py),
        },
    };
    Ok(obj)
}

fn record_to_py(py: Python<'_>, record: &Record) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    for (name, value) in record.iter() {
        dict.set_item(name, value_to_py(py, value)?)?;
    }
    Ok(dict.into_py(py))
}

fn records_to_py(py: Python<'_>, records: &[Record]) -> PyResult<Vec<PyObject>> {
    records.iter().map(|r| record_to_py(py, r)).collect()
}

// ============================================================================
// GRID HANDLE
// ============================================================================

/// A loaded parameter grid
///
/// Records enumerate the Cartesian product with the first dimension
/// varying fastest.
#[pyclass(name = "Grid")]
pub struct PyGrid {
    inner: RecordBuilder,
}

#[pymethods]
impl PyGrid {
    /// Create a grid
    ///
    /// Args:
    ///     names: Dimension names (distinct, non-empty)
    ///     values: One sequence per dimension
    ///     strict: Reject out-of-range indices instead of wrapping them
    #[new]
    #[pyo3(signature = (names, values, strict = true))]
    fn new(py: Python<'_>, names: Vec<String>, values: Vec<PyObject>, strict: bool) -> PyResult<Self> {
        let policy = if strict { IndexPolicy::Strict } else { IndexPolicy::Wrap };
        let inner = RecordBuilder::new(to_spec(py, names, &values)?)
            .with_config(GridConfig::new().with_index_policy(policy))
            .with_subscript(PySubscript);

        Ok(Self { inner })
    }

    /// Record at a 0-based linear index
    fn lookup(&self, py: Python<'_>, index: usize) -> PyResult<PyObject> {
        let record = self.inner.build_record(index)?;
        record_to_py(py, &record)
    }

    /// Every record, in index order
    fn lookup_all(&self, py: Python<'_>) -> PyResult<Vec<PyObject>> {
        let records = self.inner.collect_all()?;
        records_to_py(py, &records)
    }

    /// Dimension names in declaration order
    #[getter]
    fn names(&self) -> Vec<String> {
        self.inner.spec().names().map(str::to_owned).collect()
    }

    /// Number of values per dimension
    #[getter]
    fn sizes(&self) -> Vec<usize> {
        self.inner.spec().sizes().to_vec()
    }

    fn __len__(&self) -> usize {
        self.inner.total()
    }

    fn __repr__(&self) -> String {
        format!("Grid(names={:?}, sizes={:?})", self.names(), self.sizes())
    }
}

// ============================================================================
// PROCESS-WIDE SESSION
// ============================================================================

static SESSION: OnceLock<Session> = OnceLock::new();

fn session() -> &'static Session {
    SESSION.get_or_init(|| Session::new().with_subscript(PySubscript))
}

/// Load the current grid, optionally looking up one record right away
#[pyfunction]
#[pyo3(signature = (names, values, index = None))]
fn load(
    py: Python<'_>,
    names: Vec<String>,
    values: Vec<PyObject>,
    index: Option<usize>,
) -> PyResult<Option<PyObject>> {
    let loaded = session().install(to_spec(py, names, &values)?);

    match index {
        Some(index) => {
            let record = loaded.build_record(index)?;
            Ok(Some(record_to_py(py, &record)?))
        }
        None => Ok(None),
    }
}

/// Record of the current grid at a 0-based linear index
#[pyfunction]
fn lookup(py: Python<'_>, index: usize) -> PyResult<PyObject> {
    let record = session().lookup(index)?;
    record_to_py(py, &record)
}

/// Every record of the current grid
#[pyfunction]
fn lookup_all(py: Python<'_>) -> PyResult<Vec<PyObject>> {
    let records = session().lookup_all()?;
    records_to_py(py, &records)
}

/// Release the current grid
#[pyfunction]
fn unload() -> bool {
    session().unload()
}

/// grid-records Python module
#[pymodule]
fn grid_records(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGrid>()?;
    m.add_function(wrap_pyfunction!(load, m)?)?;
    m.add_function(wrap_pyfunction!(lookup, m)?)?;
    m.add_function(wrap_pyfunction!(lookup_all, m)?)?;
    m.add_function(wrap_pyfunction!(unload, m)?)?;

    m.add("__doc__", "grid-records: parameter grids as ordered record lists")?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
