//! This is the documentation for tradecal
//!
//! Trading calendar date arithmetic and refresh (rebalancing) date generation.
//!
//! - [`calendars`] holds the trading day index, its sources and the process-wide calendar.
//! - [`refresh`] generates the first and/or last trading days of periods at a given frequency,
//!   and navigates between them.

#[cfg(test)]
mod tests;

pub mod error;
pub use error::{CalendarError, CalendarResult};

pub mod json;

pub mod calendars;

pub mod refresh;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use calendars::calendar_py::{
        adjust_trade_dt_py, delta_trade_dt_py, get_trade_dts_py, inject_py, normalize_py,
        step_trade_dt_py,
    };
    use json::json_py::from_json_py;

    // JSON
    m.add_function(wrap_pyfunction!(from_json_py, m)?)?;

    // Calendars
    m.add_function(wrap_pyfunction!(inject_py, m)?)?;
    m.add_function(wrap_pyfunction!(get_trade_dts_py, m)?)?;
    m.add_function(wrap_pyfunction!(step_trade_dt_py, m)?)?;
    m.add_function(wrap_pyfunction!(adjust_trade_dt_py, m)?)?;
    m.add_function(wrap_pyfunction!(delta_trade_dt_py, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_py, m)?)?;

    // Refresh
    m.add_class::<refresh::Refresh>()?;

    Ok(())
}
