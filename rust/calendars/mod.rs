//! Load a calendar of trading days and perform trading day date manipulation.
//!
//! ### Basic usage
//!
//! A [`TradingDays`] index is built from any collection of date-like values. Inputs are
//! normalised to canonical [`TradeDt`] dates, deduplicated and sorted.
//!
//! ```rust
//! # use tradecal::calendars::{TradingDays, tdt};
//! // Friday 28th September 2018 precedes the National Day holiday week.
//! let cal = TradingDays::try_new(vec![
//!     "2018-09-27", "2018-09-28", "2018-10-08", "2018-10-09",
//! ]).unwrap();
//! assert_eq!(cal.len(), 4);
//! ```
//! The index is used to manipulate dates, e.g. stepping over the holiday:
//!
//! ```rust
//! # use tradecal::calendars::{TradingDays, tdt, Adjust};
//! # let cal = TradingDays::try_new(vec!["20180927", "20180928", "20181008", "20181009"]).unwrap();
//! assert_eq!(cal.step(&tdt(2018, 9, 28), 1), tdt(2018, 10, 8));
//! // A holiday is treated as falling before the next trading day.
//! assert_eq!(cal.step(&tdt(2018, 10, 3), 1), tdt(2018, 10, 9));
//! assert_eq!(cal.adjust(&tdt(2018, 10, 3), Adjust::Last).unwrap(), tdt(2018, 9, 28));
//! ```
//!
//! ### Process-wide calendar
//!
//! A single calendar can be shared by the whole process through the [`CalendarManager`]. It is
//! loaded lazily from the [`TradingDaySource`] of each configured market, see
//! [`CalendarConfig`], or explicitly with [`load_calendar`]. The functions
//! [`step_trade_dt`], [`adjust_trade_dt`], [`delta_trade_dt`] and [`get_trade_dts`] operate on
//! it and accept any [`DateLike`] input.
//!
//! ```rust
//! # use tradecal::calendars::{load_calendar, step_trade_dt, delta_trade_dt, tdt};
//! load_calendar(vec!["20180927", "20180928", "20181008"]).unwrap();
//! assert_eq!(step_trade_dt("2018-09-30", 0).unwrap(), tdt(2018, 10, 8));
//! assert_eq!(delta_trade_dt("20180901", "20180930").unwrap(), 2);
//! ```

mod manager;
mod serde;
mod source;
mod trade_dt;
mod trading_days;

#[cfg(feature = "python")]
pub(crate) mod calendar_py;

pub use crate::calendars::{
    manager::{
        adjust_trade_dt, delta_trade_dt, get_trade_dts, load_calendar, step_trade_dt,
        CalendarConfig, CalendarManager, DATA_DIR_ENV, DEFAULT_MARKET, MARKETS_ENV,
    },
    source::{JsonFileSource, StaticSource, TextFileSource, TradingDaySource},
    trade_dt::{normalize, tdt, DateLike, TradeDt},
    trading_days::{Adjust, TradingDays},
};
