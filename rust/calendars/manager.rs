use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::{debug, info};

use crate::calendars::source::file_source_in_dir;
use crate::calendars::{Adjust, DateLike, TradeDt, TradingDaySource, TradingDays};
use crate::error::{CalendarError, CalendarResult};

/// Environment variable holding comma separated market codes.
pub const MARKETS_ENV: &str = "TRADECAL_MARKETS";
/// Environment variable naming a directory of `<market>.json` or `<market>.txt` files.
pub const DATA_DIR_ENV: &str = "TRADECAL_DATA_DIR";
/// The market used when none is configured.
pub const DEFAULT_MARKET: &str = "cn";

/// Market selection for the process-wide calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Lower case market codes whose trading days are merged into one calendar.
    pub markets: Vec<String>,
    /// Directory searched for markets without a registered source.
    pub data_dir: Option<PathBuf>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            markets: vec![DEFAULT_MARKET.to_string()],
            data_dir: None,
        }
    }
}

impl CalendarConfig {
    /// Read the configuration from [`MARKETS_ENV`] and [`DATA_DIR_ENV`].
    pub fn from_env() -> Self {
        Self {
            markets: parse_markets(env::var(MARKETS_ENV).ok().as_deref()),
            data_dir: env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Replace the selected markets.
    pub fn set_markets<I, S>(mut self, markets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<String> = markets.into_iter().map(|m| m.as_ref().to_string()).collect();
        self.markets = parse_markets(Some(&joined.join(",")));
        self
    }

    pub fn set_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

// Split a comma separated list of market codes, lower casing and removing repeats.
fn parse_markets(value: Option<&str>) -> Vec<String> {
    let mut markets: Vec<String> = Vec::new();
    for m in value.unwrap_or("").split(',') {
        let m = m.trim().to_lowercase();
        if !m.is_empty() && !markets.contains(&m) {
            markets.push(m);
        }
    }
    if markets.is_empty() {
        markets.push(DEFAULT_MARKET.to_string());
    }
    markets
}

#[derive(Debug, Default)]
struct CalendarState {
    config: Option<CalendarConfig>,
    sources: HashMap<String, Arc<dyn TradingDaySource>>,
    calendar: Option<Arc<TradingDays>>,
}

impl CalendarState {
    fn load(&self) -> CalendarResult<TradingDays> {
        let config = self.config.clone().unwrap_or_else(CalendarConfig::from_env);
        let mut raw: Vec<String> = Vec::new();
        for market in config.markets.iter() {
            let source = match (self.sources.get(market), &config.data_dir) {
                (Some(s), _) => s.clone(),
                (None, Some(dir)) => file_source_in_dir(dir, market)?,
                (None, None) => {
                    return Err(CalendarError::Configuration(format!(
                        "No trading day source registered for market '{}'.",
                        market
                    )))
                }
            };
            let dates = source.fetch()?;
            debug!(market = market.as_str(), count = dates.len(), "fetched trading days");
            raw.extend(dates);
        }
        let calendar = TradingDays::try_new(raw)?;
        info!(
            markets = ?config.markets,
            count = calendar.len(),
            "loaded process-wide trading calendar"
        );
        Ok(calendar)
    }
}

// A single memory allocated space for the process-wide calendar and its sources.
static CALENDAR_STATE: LazyLock<RwLock<CalendarState>> =
    LazyLock::new(|| RwLock::new(CalendarState::default()));

/// A manager for the process-wide trading calendar.
///
/// The calendar is built lazily on first access from the sources of the configured markets and
/// then shared, immutably, by every caller. Changing the configuration or calling
/// [`reset`](CalendarManager::reset) forces the next access to rebuild it.
#[derive(Clone, Copy, Debug, Default)]
pub struct CalendarManager;

impl CalendarManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Register the trading day source of a market.
    ///
    /// A calendar that is already loaded is not rebuilt until [`reset`](CalendarManager::reset).
    pub fn register_source(&self, market: &str, source: impl TradingDaySource + 'static) {
        let mut w = CALENDAR_STATE.write().unwrap_or_else(PoisonError::into_inner);
        w.sources.insert(market.trim().to_lowercase(), Arc::new(source));
    }

    /// Set the market selection, discarding any loaded calendar.
    pub fn configure(&self, config: CalendarConfig) {
        let mut w = CALENDAR_STATE.write().unwrap_or_else(PoisonError::into_inner);
        w.config = Some(config);
        w.calendar = None;
    }

    /// Return the process-wide calendar, loading it if necessary.
    pub fn get(&self) -> CalendarResult<Arc<TradingDays>> {
        {
            let r = CALENDAR_STATE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(calendar) = &r.calendar {
                return Ok(calendar.clone());
            }
        }
        let mut w = CALENDAR_STATE.write().unwrap_or_else(PoisonError::into_inner);
        // another caller may have loaded between releasing the read lock and acquiring this one
        if let Some(calendar) = &w.calendar {
            return Ok(calendar.clone());
        }
        let calendar = Arc::new(w.load()?);
        w.calendar = Some(calendar.clone());
        Ok(calendar)
    }

    /// Replace the process-wide calendar with one built from `raw` dates.
    pub fn inject<I>(&self, raw: I) -> CalendarResult<Arc<TradingDays>>
    where
        I: IntoIterator,
        I::Item: DateLike,
    {
        let calendar = Arc::new(TradingDays::try_new(raw)?);
        let mut w = CALENDAR_STATE.write().unwrap_or_else(PoisonError::into_inner);
        w.calendar = Some(calendar.clone());
        info!(count = calendar.len(), "injected process-wide trading calendar");
        Ok(calendar)
    }

    /// Discard the loaded calendar so that the next access rebuilds it.
    pub fn reset(&self) {
        let mut w = CALENDAR_STATE.write().unwrap_or_else(PoisonError::into_inner);
        w.calendar = None;
    }

    /// Returns whether the process-wide calendar is currently loaded.
    pub fn is_loaded(&self) -> bool {
        let r = CALENDAR_STATE.read().unwrap_or_else(PoisonError::into_inner);
        r.calendar.is_some()
    }
}

/// Build the process-wide calendar from raw date-like values.
pub fn load_calendar<I>(raw: I) -> CalendarResult<Arc<TradingDays>>
where
    I: IntoIterator,
    I::Item: DateLike,
{
    CalendarManager::new().inject(raw)
}

/// Return all trading days between `begin` and `end`, inclusive, from the process-wide calendar.
pub fn get_trade_dts(begin: impl DateLike, end: impl DateLike) -> CalendarResult<Vec<TradeDt>> {
    let cal = CalendarManager::new().get()?;
    Ok(cal.range(&begin.to_trade_dt()?, &end.to_trade_dt()?).to_vec())
}

/// Step a number of trading days from `date` on the process-wide calendar.
///
/// A non-trading `date` is treated as the next trading day. See [`TradingDays::step`].
pub fn step_trade_dt(date: impl DateLike, step: i32) -> CalendarResult<TradeDt> {
    let cal = CalendarManager::new().get()?;
    Ok(cal.step(&date.to_trade_dt()?, step))
}

/// Adjust a calendar date onto the process-wide calendar.
pub fn adjust_trade_dt(date: impl DateLike, adjust: Adjust) -> CalendarResult<TradeDt> {
    let cal = CalendarManager::new().get()?;
    cal.adjust(&date.to_trade_dt()?, adjust)
}

/// Return the number of trading days between `begin` and `end`, both included.
pub fn delta_trade_dt(begin: impl DateLike, end: impl DateLike) -> CalendarResult<usize> {
    let cal = CalendarManager::new().get()?;
    Ok(cal.count_between(&begin.to_trade_dt()?, &end.to_trade_dt()?))
}
