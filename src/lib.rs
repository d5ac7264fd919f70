//! caliop-profile: georeferencing and bounding-box filtering of CALIOP lidar profiles
//!
//! Turns decoded CALIPSO Level 2 profile variables into a latitude x altitude
//! curtain of 532 nm extinction coefficients and cuts it down to a region of
//! interest, ready for plotting or export.

pub mod types;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{
    AltitudeUnit, AxisOrder, Extinction, MaskedMatrix, MaskedValue, ProfileError, ProfileResult,
    SortAxis,
};

pub use crate::core::{
    filter, AltitudeAxis, AltitudeGridBuilder, FilterParams, GeoCoordinate, GridFilter,
    MeasurementGrid, PositionValue,
};
pub use io::{assemble_extinction_grid, ProfileColumns, ValidRange};

#[cfg(feature = "python")]
mod python {
    use crate::core::{filter, AltitudeAxis, GeoCoordinate};
    use crate::io::{assemble_extinction_grid, ProfileColumns, ValidRange};
    use crate::types::{ProfileError, SortAxis};
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2, ToPyArray};
    use pyo3::basic::CompareOp;
    use pyo3::prelude::*;
    use std::cmp::Ordering;

    fn to_py_err(e: ProfileError) -> PyErr {
        match e {
            ProfileError::InvalidBounds(_) | ProfileError::InvalidFormat(_) => {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e))
            }
            _ => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("{}", e)),
        }
    }

    /// Python module definition
    #[pymodule]
    fn _core(_py: Python, m: &PyModule) -> PyResult<()> {
        m.add_class::<PyCoordinate>()?;
        m.add_function(wrap_pyfunction!(altitudes, m)?)?;
        m.add_function(wrap_pyfunction!(filter_extinction, m)?)?;
        Ok(())
    }

    /// Python wrapper for GeoCoordinate
    #[pyclass(name = "Coordinate")]
    #[derive(Clone)]
    struct PyCoordinate {
        inner: GeoCoordinate,
    }

    #[pymethods]
    impl PyCoordinate {
        #[new]
        fn new(latitude: f64, longitude: f64) -> Self {
            PyCoordinate {
                inner: GeoCoordinate::new(latitude, longitude),
            }
        }

        #[getter]
        fn latitude(&self) -> f64 {
            self.inner.latitude()
        }

        #[getter]
        fn longitude(&self) -> f64 {
            self.inner.longitude()
        }

        #[getter]
        fn order_key(&self) -> f64 {
            self.inner.order_key()
        }

        fn __float__(&self) -> f64 {
            self.inner.as_number()
        }

        fn __richcmp__(&self, other: PyRef<PyCoordinate>, op: CompareOp) -> bool {
            let ordering = self.inner.cmp_key(&other.inner);
            match op {
                CompareOp::Eq => self.inner == other.inner,
                CompareOp::Ne => self.inner != other.inner,
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                CompareOp::Ge => ordering != Ordering::Less,
            }
        }

        fn __repr__(&self) -> String {
            format!(
                "Coordinate(latitude={}, longitude={}, order_key={})",
                self.inner.latitude(),
                self.inner.longitude(),
                self.inner.order_key()
            )
        }
    }

    /// Standard altitude grid in km, highest first
    #[pyfunction]
    fn altitudes(py: Python<'_>) -> &PyArray1<f64> {
        AltitudeAxis::standard().values().to_pyarray(py)
    }

    /// Mask, assemble and filter an extinction curtain.
    ///
    /// Returns (matrix, latitudes, longitudes, altitudes) with the matrix
    /// altitude-major and missing readings as NaN.
    #[pyfunction]
    #[pyo3(signature = (latitude, longitude, extinction, valid_range, latitude_bounds=(-90.0, 90.0), altitude_bounds=(0.0, 12.0)))]
    #[allow(clippy::type_complexity)]
    fn filter_extinction<'py>(
        py: Python<'py>,
        latitude: PyReadonlyArray2<f64>,
        longitude: PyReadonlyArray2<f64>,
        extinction: PyReadonlyArray2<f32>,
        valid_range: &str,
        latitude_bounds: (f64, f64),
        altitude_bounds: (f64, f64),
    ) -> PyResult<(&'py PyArray2<f32>, &'py PyArray1<f64>, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let range: ValidRange = valid_range.parse().map_err(to_py_err)?;
        let columns = ProfileColumns::extinction_532(
            latitude.as_array().to_owned(),
            longitude.as_array().to_owned(),
            extinction.as_array().to_owned(),
            range,
        );

        let grid = assemble_extinction_grid(&columns).map_err(to_py_err)?;
        let filtered = filter(&grid, latitude_bounds, altitude_bounds, SortAxis::Position)
            .map_err(to_py_err)?;

        let matrix = filtered.matrix().mapv(|v| v.unwrap_or(f32::NAN));
        let longitudes: Vec<f64> = filtered.positions().iter().map(GeoCoordinate::longitude).collect();

        Ok((
            matrix.into_pyarray(py),
            filtered.latitudes().into_pyarray(py),
            longitudes.into_pyarray(py),
            filtered.altitudes().values().to_pyarray(py),
        ))
    }
}
