//! Serialize trading calendars and refresh generators to and from JSON, with the ``serde`` crate.
//!
//! Dates are written in the canonical `YYYYMMDD` layout, so the output of
//! [`TradingDays`](crate::calendars::TradingDays) is a plain JSON array of strings and can be
//! read back by a [`JsonFileSource`](crate::calendars::JsonFileSource).

#[cfg(feature = "python")]
pub(crate) mod json_py;

use serde::{Deserialize, Serialize};

/// Handles the `to` and `from` JSON conversion.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a JSON string representing the object.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Create an object from a JSON string representation, revalidating it.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
