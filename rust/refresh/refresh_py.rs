//! Wrapper module to export to Python using pyo3 bindings.

use crate::calendars::TradeDt;
use crate::json::JSON;
use crate::refresh::{Frequency, Refresh, DEFAULT_BEGIN, DEFAULT_END};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

fn to_strings(dates: Vec<TradeDt>) -> Vec<String> {
    dates.iter().map(|d| d.to_string()).collect()
}

#[pymethods]
impl Refresh {
    /// Create a new *Refresh* object on the process-wide calendar.
    ///
    /// Parameters
    /// ----------
    /// frequency: str
    ///     One of "weekly", "biweekly", "monthly", "quarterly", "reportly", "halfyearly" or
    ///     "yearly".
    /// *args: int
    ///     1 for the first trading day of each period, -1 for the last, or both.
    #[new]
    #[pyo3(signature = (frequency, *args))]
    fn new_py(frequency: &str, args: &Bound<'_, PyTuple>) -> PyResult<Self> {
        let frequency: Frequency = frequency.parse()?;
        let args: Vec<i32> = args.extract()?;
        Ok(Refresh::try_global(frequency, &args)?)
    }

    /// The name of the frequency.
    #[getter(frequency)]
    fn frequency_py(&self) -> String {
        self.frequency().to_string()
    }

    /// The direction args defining the selection policy.
    #[getter(args)]
    fn args_py(&self) -> Vec<i32> {
        self.policy().args()
    }

    /// Return the refresh dates between `begin` and `end`, inclusive.
    ///
    /// Parameters
    /// ----------
    /// begin: str, optional
    ///     Defaults to "19000101".
    /// end: str, optional
    ///     Defaults to "20990101".
    ///
    /// Returns
    /// -------
    /// list[str]
    #[pyo3(name = "get", signature = (begin = None, end = None))]
    fn get_py(&self, begin: Option<&str>, end: Option<&str>) -> PyResult<Vec<String>> {
        let dates = self.get(begin.unwrap_or(DEFAULT_BEGIN), end.unwrap_or(DEFAULT_END))?;
        Ok(to_strings(dates))
    }

    /// Return the refresh date `step` refresh dates after `date`.
    #[pyo3(name = "next", signature = (date, step = 1, adjust = true))]
    fn next_py(&self, date: &str, step: usize, adjust: bool) -> PyResult<String> {
        Ok(self.next(date, step, adjust)?.to_string())
    }

    /// Return the refresh date `step` refresh dates before `date`.
    #[pyo3(name = "prev", signature = (date, step = 1, adjust = true))]
    fn prev_py(&self, date: &str, step: usize, adjust: bool) -> PyResult<String> {
        Ok(self.prev(date, step, adjust)?.to_string())
    }

    /// Return a JSON representation of the object, including its trading calendar.
    #[pyo3(name = "to_json")]
    fn to_json_py(&self) -> PyResult<String> {
        match self.to_json() {
            Ok(v) => Ok(v),
            Err(e) => Err(PyValueError::new_err(format!(
                "Failed to serialize `Refresh` to JSON.\n{}",
                e
            ))),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "<rs.Refresh:{}{:?} at {:p}>",
            self.frequency(),
            self.policy().args(),
            self
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self == other
    }
}
