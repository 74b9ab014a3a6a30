use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::calendars::{normalize, TradeDt};
use crate::error::{CalendarError, CalendarResult};

/// A provider of raw trading days for one market.
///
/// The returned values are treated as opaque, date-like strings and are normalised when the
/// [`TradingDays`](crate::calendars::TradingDays) index is built.
pub trait TradingDaySource: Debug + Send + Sync {
    /// Return every known trading day of the market.
    fn fetch(&self) -> CalendarResult<Vec<String>>;
}

/// A source holding its trading days in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticSource {
    dates: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dates: dates.into_iter().map(Into::into).collect(),
        }
    }
}

impl TradingDaySource for StaticSource {
    fn fetch(&self) -> CalendarResult<Vec<String>> {
        Ok(self.dates.clone())
    }
}

/// A source reading a JSON array of date strings from a file.
///
/// ```json
/// ["2018-09-27", "2018-09-28", "20181008"]
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TradingDaySource for JsonFileSource {
    fn fetch(&self) -> CalendarResult<Vec<String>> {
        let content = fs::read_to_string(&self.path)?;
        let dates: Vec<String> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = dates.len(), "read JSON trading days");
        Ok(dates)
    }
}

/// A source reading one date per line from a text file.
///
/// Blank lines and lines starting with `#` are skipped. Any other line which does not normalise
/// to a canonical date fails the whole read with [`CalendarError::InvalidDate`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TradingDaySource for TextFileSource {
    fn fetch(&self) -> CalendarResult<Vec<String>> {
        let content = fs::read_to_string(&self.path)?;
        let mut dates: Vec<String> = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let date = normalize(line);
            if date.parse::<TradeDt>().is_err() {
                return Err(CalendarError::InvalidDate(format!(
                    "{} (line {} of {})",
                    line,
                    lineno + 1,
                    self.path.display()
                )));
            }
            dates.push(date);
        }
        debug!(path = %self.path.display(), count = dates.len(), "read text trading days");
        Ok(dates)
    }
}

/// Locate a file based source for `market` in `dir`, preferring `<market>.json` over
/// `<market>.txt`.
pub(crate) fn file_source_in_dir(
    dir: &Path,
    market: &str,
) -> CalendarResult<Arc<dyn TradingDaySource>> {
    let json = dir.join(format!("{}.json", market));
    if json.is_file() {
        return Ok(Arc::new(JsonFileSource::new(json)));
    }
    let txt = dir.join(format!("{}.txt", market));
    if txt.is_file() {
        return Ok(Arc::new(TextFileSource::new(txt)));
    }
    Err(CalendarError::Configuration(format!(
        "No trading day source for market '{}' in '{}'.",
        market,
        dir.display()
    )))
}
