//! `nativelib`: Python extension module for the SRW native layer.

use numpy::ndarray::{ArrayViewD, ArrayViewMutD};
use numpy::{AllowTypeChange, PyArray, PyArray1, PyArrayDyn, PyArrayLikeDyn, PyArrayMethods};
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use srw_native::{DatError, MeshMetadata};
use std::path::PathBuf;

fn to_py_err(err: DatError) -> PyErr {
    match err {
        DatError::Io(e) => PyOSError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn metadata_dict<'py>(py: Python<'py>, m: &MeshMetadata) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("point_count_energy", m.point_count_energy)?;
    dict.set_item("point_count_x", m.point_count_x)?;
    dict.set_item("point_count_y", m.point_count_y)?;
    dict.set_item("energy_min", m.energy_min)?;
    dict.set_item("energy_max", m.energy_max)?;
    dict.set_item("x_min", m.x_min)?;
    dict.set_item("x_max", m.x_max)?;
    dict.set_item("y_min", m.y_min)?;
    dict.set_item("y_max", m.y_max)?;
    Ok(dict)
}

fn sum_view(view: ArrayViewD<'_, f64>) -> f64 {
    match view.as_slice_memory_order() {
        Some(slice) => srw_native::sum(slice),
        None => view.iter().sum(),
    }
}

fn scale_view(mut view: ArrayViewMutD<'_, f64>, factor: f64) {
    match view.as_slice_memory_order_mut() {
        Some(slice) => srw_native::scale(slice, factor),
        None => view.map_inplace(|v| *v *= factor),
    }
}

/// Sum of every element of an array of any shape, or of any nested sequence of
/// numbers.
#[pyfunction]
fn sum_array(values: PyArrayLikeDyn<'_, f64, AllowTypeChange>) -> f64 {
    sum_view(values.as_array())
}

/// Multiplies every element by `factor`.
///
/// A writable float64 array of any shape is updated in place and returned;
/// anything else is converted into a new float64 array first.
#[pyfunction]
fn scale_array<'py>(
    py: Python<'py>,
    values: &Bound<'py, PyAny>,
    factor: f64,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    if let Ok(array) = values.downcast::<PyArrayDyn<f64>>() {
        if let Ok(mut view) = array.try_readwrite() {
            scale_view(view.as_array_mut(), factor);
            return Ok(array.clone());
        }
    }
    let converted: PyArrayLikeDyn<'py, f64, AllowTypeChange> = values.extract()?;
    let mut owned = converted.as_array().to_owned();
    scale_view(owned.view_mut(), factor);
    Ok(PyArray::from_owned_array(py, owned))
}

/// Returns `(metadata, header_lines, values)` for an SRW mesh file.
#[pyfunction]
fn load_file(
    py: Python<'_>,
    path: PathBuf,
) -> PyResult<(Bound<'_, PyDict>, Vec<String>, Bound<'_, PyArray1<f64>>)> {
    let data = py.allow_threads(|| srw_native::load_file(&path)).map_err(to_py_err)?;
    let metadata = metadata_dict(py, &data.metadata)?;
    Ok((
        metadata,
        data.header_lines,
        PyArray1::from_vec(py, data.values),
    ))
}

/// Returns `(header_lines, values)` for any `#`-commented numeric text file.
#[pyfunction]
fn load_raw_file(
    py: Python<'_>,
    path: PathBuf,
) -> PyResult<(Vec<String>, Bound<'_, PyArray1<f64>>)> {
    let raw = py
        .allow_threads(|| srw_native::load_raw_file(&path))
        .map_err(to_py_err)?;
    Ok((raw.header_lines, PyArray1::from_vec(py, raw.values)))
}

/// Kept so older callers that call `nativelib.load_lib()` keep working.
#[pyfunction]
fn load_lib() {}

#[pymodule]
fn nativelib(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(sum_array, m)?)?;
    m.add_function(wrap_pyfunction!(scale_array, m)?)?;
    m.add_function(wrap_pyfunction!(load_file, m)?)?;
    m.add_function(wrap_pyfunction!(load_raw_file, m)?)?;
    m.add_function(wrap_pyfunction!(load_lib, m)?)?;
    Ok(())
}
