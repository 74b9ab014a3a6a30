use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::debug;

use crate::calendars::{DateLike, TradeDt};
use crate::error::{CalendarError, CalendarResult};

/// The direction in which a date is adjusted onto the trading calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjust {
    /// The greatest trading day on or before the date.
    Last,
    /// The smallest trading day on or after the date.
    Next,
}

impl FromStr for Adjust {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last" => Ok(Adjust::Last),
            "next" => Ok(Adjust::Next),
            _ => Err(CalendarError::Configuration(format!(
                "adjust: '{}' must be 'last' or 'next'.",
                s
            ))),
        }
    }
}

/// An ordered, deduplicated calendar of trading days.
///
/// The index is immutable once built. All period logic is expressed in terms of
/// [`range`](TradingDays::range), [`step`](TradingDays::step),
/// [`adjust`](TradingDays::adjust) and [`count_between`](TradingDays::count_between).
///
/// # Examples
/// ```rust
/// # use tradecal::calendars::{tdt, Adjust, TradingDays};
/// let cal = TradingDays::try_new(vec!["2018-09-27", "20180928", "2018/10/08"]).unwrap();
/// assert_eq!(cal.step(&tdt(2018, 9, 29), 0), tdt(2018, 10, 8));
/// assert_eq!(cal.adjust(&tdt(2018, 10, 1), Adjust::Last).unwrap(), tdt(2018, 9, 28));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TradeDt>", into = "Vec<TradeDt>")]
pub struct TradingDays {
    days: Vec<TradeDt>,
}

impl TradingDays {
    /// Build a calendar from raw date-like values.
    ///
    /// Every element is normalised, then the set is deduplicated and sorted ascending. An empty
    /// result is a configuration error.
    pub fn try_new<I>(raw: I) -> CalendarResult<Self>
    where
        I: IntoIterator,
        I::Item: DateLike,
    {
        let days: BTreeSet<TradeDt> = raw
            .into_iter()
            .map(|d| d.to_trade_dt())
            .collect::<CalendarResult<_>>()?;
        if days.is_empty() {
            return Err(CalendarError::Configuration(
                "The trading day source produced no dates.".to_string(),
            ));
        }
        let days: Vec<TradeDt> = days.into_iter().collect();
        debug!(
            count = days.len(),
            first = %days[0],
            last = %days[days.len() - 1],
            "built trading day index"
        );
        Ok(Self { days })
    }

    /// All trading days, ascending.
    pub fn dates(&self) -> &[TradeDt] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always `false`; a calendar cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The earliest known trading day.
    pub fn first(&self) -> TradeDt {
        self.days[0]
    }

    /// The latest known trading day.
    pub fn last(&self) -> TradeDt {
        self.days[self.days.len() - 1]
    }

    /// Returns whether the `date` is a trading day.
    pub fn contains(&self, date: &TradeDt) -> bool {
        self.days.binary_search(date).is_ok()
    }

    // Number of stored days strictly before `date`, i.e. the index of the first day >= `date`.
    fn index_left(&self, date: &TradeDt) -> usize {
        self.days.partition_point(|d| d < date)
    }

    /// Return the trading days between `begin` and `end`, inclusive.
    ///
    /// An empty slice is returned if no days qualify, including when `begin > end`.
    pub fn range(&self, begin: &TradeDt, end: &TradeDt) -> &[TradeDt] {
        if begin > end {
            return &[];
        }
        let lo = self.index_left(begin);
        let hi = self.days.partition_point(|d| d <= end);
        &self.days[lo..hi]
    }

    /// Return the trading day a number of positions away from `date`.
    ///
    /// For `n >= 0` counting starts at the first trading day on or after `date`, so a
    /// non-trading `date` behaves as the next trading day. For `n < 0` the trading day immediately
    /// before `date` is position `-1`.
    ///
    /// Steps beyond either end of the calendar clamp to the first or last known day.
    pub fn step(&self, date: &TradeDt, n: i32) -> TradeDt {
        let idx = self.index_left(date) as i64 + i64::from(n);
        if idx < 0 {
            self.first()
        } else if idx as usize >= self.days.len() {
            self.last()
        } else {
            self.days[idx as usize]
        }
    }

    /// Adjust a calendar date onto the trading calendar in the given direction.
    ///
    /// Errors if no trading day exists on the requested side of `date`.
    pub fn adjust(&self, date: &TradeDt, adjust: Adjust) -> CalendarResult<TradeDt> {
        match adjust {
            Adjust::Last => {
                let idx = self.days.partition_point(|d| d <= date);
                if idx == 0 {
                    Err(CalendarError::OutOfRange(format!(
                        "No trading day on or before {} (calendar begins {}).",
                        date,
                        self.first()
                    )))
                } else {
                    Ok(self.days[idx - 1])
                }
            }
            Adjust::Next => {
                let idx = self.index_left(date);
                if idx == self.days.len() {
                    Err(CalendarError::OutOfRange(format!(
                        "No trading day on or after {} (calendar ends {}).",
                        date,
                        self.last()
                    )))
                } else {
                    Ok(self.days[idx])
                }
            }
        }
    }

    /// Return the number of trading days between `begin` and `end`, inclusive.
    pub fn count_between(&self, begin: &TradeDt, end: &TradeDt) -> usize {
        self.range(begin, end).len()
    }
}

impl TryFrom<Vec<TradeDt>> for TradingDays {
    type Error = CalendarError;

    fn try_from(days: Vec<TradeDt>) -> Result<Self, Self::Error> {
        TradingDays::try_new(days)
    }
}

impl From<TradingDays> for Vec<TradeDt> {
    fn from(item: TradingDays) -> Self {
        item.days
    }
}
