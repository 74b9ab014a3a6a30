//! Wrapper module to export to Python using pyo3 bindings.

use crate::calendars::{
    adjust_trade_dt, delta_trade_dt, get_trade_dts, load_calendar, normalize, step_trade_dt,
    Adjust,
};
use crate::error::CalendarError;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<CalendarError> for PyErr {
    fn from(err: CalendarError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Replace the process-wide trading calendar.
///
/// Parameters
/// ----------
/// dates: list[str]
///     Trading days in any supported layout, e.g. "20180928" or "2018-09-28".
///
/// Returns
/// -------
/// int: the number of distinct trading days loaded.
#[pyfunction]
#[pyo3(name = "inject")]
pub(crate) fn inject_py(dates: Vec<String>) -> PyResult<usize> {
    Ok(load_calendar(dates)?.len())
}

/// Return the trading days between two dates, inclusive.
#[pyfunction]
#[pyo3(name = "get_trade_dts")]
pub(crate) fn get_trade_dts_py(begin: &str, end: &str) -> PyResult<Vec<String>> {
    Ok(get_trade_dts(begin, end)?
        .iter()
        .map(|d| d.to_string())
        .collect())
}

/// Return the trading day a number of trading days away from a date.
///
/// Parameters
/// ----------
/// date: str
///     The date to step from. A non-trading date is treated as the next trading day.
/// step: int
///     The number of trading days to step, negative to step backwards.
///
/// Returns
/// -------
/// str
#[pyfunction]
#[pyo3(name = "step_trade_dt", signature = (date, step = 1))]
pub(crate) fn step_trade_dt_py(date: &str, step: i32) -> PyResult<String> {
    Ok(step_trade_dt(date, step)?.to_string())
}

/// Adjust a date onto the trading calendar, with `adjust` one of "last" or "next".
#[pyfunction]
#[pyo3(name = "adjust_trade_dt", signature = (date, adjust = "last"))]
pub(crate) fn adjust_trade_dt_py(date: &str, adjust: &str) -> PyResult<String> {
    let adjust: Adjust = adjust.parse()?;
    Ok(adjust_trade_dt(date, adjust)?.to_string())
}

/// Return the number of trading days between two dates, both included.
#[pyfunction]
#[pyo3(name = "delta_trade_dt")]
pub(crate) fn delta_trade_dt_py(begin: &str, end: &str) -> PyResult<usize> {
    Ok(delta_trade_dt(begin, end)?)
}

/// Convert a date string to the "YYYYMMDD" layout, returning it unchanged if unrecognised.
#[pyfunction]
#[pyo3(name = "normalize")]
pub(crate) fn normalize_py(date: &str) -> String {
    normalize(date)
}
