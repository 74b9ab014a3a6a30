//! Generate refresh (rebalancing) dates on a trading calendar.
//!
//! ### Basic usage
//!
//! A [`Refresh`] generator combines a [`Frequency`], a [`SelectionPolicy`] and a shared
//! [`TradingDays`](crate::calendars::TradingDays) index. The policy is built from direction
//! args: `1` for the first trading day of each period, `-1` for the last, or both.
//!
//! ```rust
//! # use std::sync::Arc;
//! # use tradecal::calendars::{tdt, TradingDays};
//! # use tradecal::refresh::{Frequency, Refresh};
//! let cal = Arc::new(TradingDays::try_new(vec![
//!     "20180927", "20180928", "20181008", "20181009", "20181031", "20181101",
//! ]).unwrap());
//! let month_ends = Refresh::try_new(Frequency::Monthly, &[-1], cal.clone()).unwrap();
//! assert_eq!(
//!     month_ends.get("20181001", "20181031").unwrap(),
//!     vec![tdt(2018, 10, 31)]
//! );
//! let month_edges = Refresh::try_new(Frequency::Monthly, &[1, -1], cal).unwrap();
//! assert_eq!(
//!     month_edges.get("20181001", "20181101").unwrap(),
//!     vec![tdt(2018, 10, 8), tdt(2018, 10, 31), tdt(2018, 11, 1)]
//! );
//! ```
//!
//! ### Navigation
//!
//! [`Refresh::next`] and [`Refresh::prev`] find the refresh date a number of steps away from
//! any date. Results are memoised per generator.

mod bucket;
mod cache;
mod frequency;
mod generator;
mod policy;
mod serde;

#[cfg(feature = "python")]
pub(crate) mod refresh_py;

pub use crate::refresh::{
    frequency::Frequency,
    generator::{Refresh, DEFAULT_BEGIN, DEFAULT_END, NAVIGATION_WINDOW_DAYS},
    policy::SelectionPolicy,
};
