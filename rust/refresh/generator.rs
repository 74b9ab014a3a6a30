use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

use crate::calendars::{CalendarManager, DateLike, TradeDt, TradingDays};
use crate::error::{CalendarError, CalendarResult};
use crate::refresh::bucket::{anchored, bucket, merge_sorted};
use crate::refresh::cache::{NeighbourCache, NeighbourKey, Side};
use crate::refresh::frequency::Periods;
use crate::refresh::{Frequency, SelectionPolicy};

/// Calendar days searched per step by [`Refresh::next`] and [`Refresh::prev`].
pub const NAVIGATION_WINDOW_DAYS: i64 = 600;
/// The earliest date queried by [`Refresh::get_all`].
pub const DEFAULT_BEGIN: &str = "19000101";
/// The latest date queried by [`Refresh::get_all`].
pub const DEFAULT_END: &str = "20990101";
const CACHE_CAPACITY: usize = 2048;

/// A generator of refresh dates at a given [`Frequency`] on a trading calendar.
///
/// Refresh dates are the first and/or last trading days of each period, depending on the
/// [`SelectionPolicy`].
///
/// # Examples
/// ```rust
/// # use std::sync::Arc;
/// # use tradecal::calendars::{tdt, TradingDays};
/// # use tradecal::refresh::{Frequency, Refresh};
/// let cal = TradingDays::try_new(vec![
///     "20180830", "20180831", "20180903", "20180927", "20180928", "20181008", "20181031",
/// ]).unwrap();
/// let monthly = Refresh::try_new(Frequency::Monthly, &[-1], Arc::new(cal)).unwrap();
/// assert_eq!(
///     monthly.get("20180901", "20181031").unwrap(),
///     vec![tdt(2018, 9, 28), tdt(2018, 10, 31)]
/// );
/// assert_eq!(monthly.next("20180910", 1, true).unwrap(), tdt(2018, 9, 28));
/// assert_eq!(monthly.prev("20180910", 1, true).unwrap(), tdt(2018, 8, 31));
/// ```
#[cfg_attr(feature = "python", pyo3::pyclass(module = "tradecal.rs"))]
#[derive(Debug, Serialize, Deserialize)]
#[serde(from = "RefreshDataModel", into = "RefreshDataModel")]
pub struct Refresh {
    frequency: Frequency,
    policy: SelectionPolicy,
    calendar: Arc<TradingDays>,
    cache: Mutex<NeighbourCache>,
}

// Serialized form of a Refresh, which omits the memoised lookups.
#[derive(Serialize, Deserialize)]
struct RefreshDataModel {
    frequency: Frequency,
    policy: SelectionPolicy,
    calendar: Arc<TradingDays>,
}

impl From<RefreshDataModel> for Refresh {
    fn from(model: RefreshDataModel) -> Self {
        Refresh::new(model.frequency, model.policy, model.calendar)
    }
}

impl From<Refresh> for RefreshDataModel {
    fn from(refresh: Refresh) -> Self {
        Self {
            frequency: refresh.frequency,
            policy: refresh.policy,
            calendar: refresh.calendar,
        }
    }
}

impl Clone for Refresh {
    // memoised lookups are not shared between clones
    fn clone(&self) -> Self {
        Refresh::new(self.frequency, self.policy, Arc::clone(&self.calendar))
    }
}

impl PartialEq for Refresh {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency
            && self.policy == other.policy
            && (Arc::ptr_eq(&self.calendar, &other.calendar) || self.calendar == other.calendar)
    }
}

impl Refresh {
    pub fn new(frequency: Frequency, policy: SelectionPolicy, calendar: Arc<TradingDays>) -> Self {
        Self {
            frequency,
            policy,
            calendar,
            cache: Mutex::new(NeighbourCache::new(CACHE_CAPACITY)),
        }
    }

    /// Create a generator from direction args, see [`SelectionPolicy::try_from_args`].
    pub fn try_new(
        frequency: Frequency,
        args: &[i32],
        calendar: Arc<TradingDays>,
    ) -> CalendarResult<Self> {
        let policy = SelectionPolicy::try_from_args(args)?;
        Ok(Self::new(frequency, policy, calendar))
    }

    /// Create a generator on the process-wide calendar, loading it if necessary.
    pub fn try_global(frequency: Frequency, args: &[i32]) -> CalendarResult<Self> {
        let policy = SelectionPolicy::try_from_args(args)?;
        let calendar = CalendarManager::new().get()?;
        Ok(Self::new(frequency, policy, calendar))
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn calendar(&self) -> &Arc<TradingDays> {
        &self.calendar
    }

    /// Return the refresh dates between `begin` and `end`, inclusive, ascending and unique.
    pub fn get(&self, begin: impl DateLike, end: impl DateLike) -> CalendarResult<Vec<TradeDt>> {
        self.series(&begin.to_trade_dt()?, &end.to_trade_dt()?)
    }

    /// Return the refresh dates between [`DEFAULT_BEGIN`] and [`DEFAULT_END`].
    pub fn get_all(&self) -> CalendarResult<Vec<TradeDt>> {
        self.get(DEFAULT_BEGIN, DEFAULT_END)
    }

    /// Return the `step`-th refresh date on or after `date`.
    ///
    /// If `adjust` is `true` and `date` is itself a refresh date it is not counted, so that
    /// `next` always moves forward. Steps beyond the known calendar return the latest refresh
    /// date. A `step` of zero returns the first refresh date on or after `date`.
    pub fn next(&self, date: impl DateLike, step: usize, adjust: bool) -> CalendarResult<TradeDt> {
        self.neighbour(Side::Next, date.to_trade_dt()?, step, adjust)
    }

    /// Return the `step`-th refresh date on or before `date`.
    ///
    /// The mirror image of [`next`](Refresh::next).
    pub fn prev(&self, date: impl DateLike, step: usize, adjust: bool) -> CalendarResult<TradeDt> {
        self.neighbour(Side::Prev, date.to_trade_dt()?, step, adjust)
    }

    fn series(&self, begin: &TradeDt, end: &TradeDt) -> CalendarResult<Vec<TradeDt>> {
        generate(&self.calendar, self.frequency, self.policy, begin, end)
    }

    fn neighbour(
        &self,
        side: Side,
        date: TradeDt,
        step: usize,
        adjust: bool,
    ) -> CalendarResult<TradeDt> {
        let key = NeighbourKey {
            side,
            date,
            step,
            adjust,
        };
        if let Some(found) = self.cache.lock().unwrap_or_else(PoisonError::into_inner).get(&key) {
            trace!(frequency = %self.frequency, %date, step, "neighbour cache hit");
            return Ok(found);
        }

        let span = NAVIGATION_WINDOW_DAYS
            .saturating_mul(i64::try_from(step.max(1)).unwrap_or(i64::MAX));
        let (begin, end) = match side {
            Side::Next => (date, date.add_cal_days(span)),
            Side::Prev => (date.add_cal_days(-span), date),
        };
        let series = self.series(&begin, &end)?;
        let boundary = match side {
            Side::Next => series.first(),
            Side::Prev => series.last(),
        };
        let Some(boundary) = boundary else {
            return Err(CalendarError::OutOfRange(format!(
                "No {} refresh date within {} calendar days of {} (calendar covers {} to {}).",
                self.frequency,
                span,
                date,
                self.calendar.first(),
                self.calendar.last(),
            )));
        };
        let offset = if adjust && *boundary == date {
            step
        } else {
            step.saturating_sub(1)
        };
        // overruns clamp to the far end of the window
        let offset = offset.min(series.len() - 1);
        let found = match side {
            Side::Next => series[offset],
            Side::Prev => series[series.len() - 1 - offset],
        };

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, found);
        Ok(found)
    }
}

// Generate the refresh dates of a frequency and policy within `[begin, end]`.
fn generate(
    calendar: &TradingDays,
    frequency: Frequency,
    policy: SelectionPolicy,
    begin: &TradeDt,
    end: &TradeDt,
) -> CalendarResult<Vec<TradeDt>> {
    match frequency.periods() {
        Periods::Keyed { padding, key } => Ok(bucket(calendar, begin, end, padding, key, policy)),
        Periods::Anchored { label, bounds } => anchored(calendar, begin, end, label, bounds, policy),
        Periods::Alternate(base) => {
            let mut dates: Vec<TradeDt> = vec![];
            for single in [SelectionPolicy::First, SelectionPolicy::Last] {
                let wanted = match single {
                    SelectionPolicy::First => policy.includes_first(),
                    _ => policy.includes_last(),
                };
                if wanted {
                    let every_other: Vec<TradeDt> = generate(calendar, base, single, begin, end)?
                        .into_iter()
                        .step_by(2)
                        .collect();
                    dates = merge_sorted(dates, every_other);
                }
            }
            Ok(dates)
        }
    }
}
