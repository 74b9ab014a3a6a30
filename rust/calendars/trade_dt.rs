use chrono::prelude::*;
use chrono::{Days, IsoWeek};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalendarError, CalendarResult};

const CANONICAL_FORMAT: &str = "%Y%m%d";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// `%.f` also accepts an absent fractional part.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y%m%d %H:%M:%S%.f",
    "%Y%m%dT%H:%M:%S%.f",
];

fn is_canonical(date: &str) -> bool {
    date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit())
}

/// Normalise a date string to the canonical `YYYYMMDD` form.
///
/// Strings that are already 8 digits are passed through unchanged. Common ISO-like date and
/// datetime layouts are converted. If the input cannot be parsed it is returned unchanged, so
/// callers must be prepared to receive non-canonical strings back.
///
/// # Examples
/// ```rust
/// # use tradecal::calendars::normalize;
/// assert_eq!(normalize("2018-09-28"), "20180928");
/// assert_eq!(normalize("20180928"), "20180928");
/// assert_eq!(normalize("not a date"), "not a date");
/// ```
pub fn normalize(date: &str) -> String {
    let s = date.trim();
    if is_canonical(s) {
        return s.to_string();
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.format(CANONICAL_FORMAT).to_string();
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(d) = NaiveDateTime::parse_from_str(s, fmt) {
            return d.format(CANONICAL_FORMAT).to_string();
        }
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return d.date_naive().format(CANONICAL_FORMAT).to_string();
    }
    date.to_string()
}

/// A canonical calendar date, displayed and serialized as `YYYYMMDD`.
///
/// Ordering is chronological, which coincides with the lexical ordering of the canonical strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDt(NaiveDate);

/// Create a [`TradeDt`].
///
/// Panics if date values are invalid.
pub fn tdt(year: i32, month: u32, day: u32) -> TradeDt {
    TradeDt(NaiveDate::from_ymd_opt(year, month, day).expect("`year`, `month` `day` are invalid."))
}

impl TradeDt {
    pub fn new(date: NaiveDate) -> Self {
        TradeDt(date)
    }

    /// Create a [`TradeDt`] returning `None` for an impossible date.
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(TradeDt)
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn iso_week(&self) -> IsoWeek {
        self.0.iso_week()
    }

    /// Shift by a signed number of calendar days, saturating at the representable range.
    pub fn add_cal_days(&self, days: i64) -> Self {
        let shifted = if days < 0 {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        };
        match shifted {
            Some(d) => TradeDt(d),
            None if days < 0 => TradeDt(NaiveDate::MIN),
            None => TradeDt(NaiveDate::MAX),
        }
    }
}

impl fmt::Display for TradeDt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for TradeDt {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = normalize(s);
        if !is_canonical(&canonical) {
            return Err(CalendarError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(&canonical, CANONICAL_FORMAT)
            .map(TradeDt)
            .map_err(|_| CalendarError::InvalidDate(s.to_string()))
    }
}

impl From<NaiveDate> for TradeDt {
    fn from(item: NaiveDate) -> Self {
        TradeDt(item)
    }
}

impl From<TradeDt> for NaiveDate {
    fn from(item: TradeDt) -> Self {
        item.0
    }
}

impl PartialEq<str> for TradeDt {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for TradeDt {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for TradeDt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradeDt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Any value that can be converted to a canonical [`TradeDt`].
pub trait DateLike {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt>;
}

impl DateLike for str {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt> {
        self.parse()
    }
}

impl DateLike for String {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt> {
        self.parse()
    }
}

impl DateLike for NaiveDate {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt> {
        Ok(TradeDt(*self))
    }
}

impl DateLike for NaiveDateTime {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt> {
        Ok(TradeDt(self.date()))
    }
}

impl DateLike for TradeDt {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt> {
        Ok(*self)
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn to_trade_dt(&self) -> CalendarResult<TradeDt> {
        (**self).to_trade_dt()
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize("20171231"), "20171231");
        // canonical shape is passed through even if not a real date
        assert_eq!(normalize("20181332"), "20181332");
    }

    #[test]
    fn test_normalize_layouts() {
        assert_eq!(normalize("2017-12-31"), "20171231");
        assert_eq!(normalize("2017/12/31"), "20171231");
        assert_eq!(normalize("2017.12.31"), "20171231");
        assert_eq!(normalize("2017-12-31 15:00:00"), "20171231");
        assert_eq!(normalize("2017-12-31T09:30:00.250"), "20171231");
        assert_eq!(normalize("20171231 00:00:00"), "20171231");
        assert_eq!(normalize("2017-12-31T09:30:00+08:00"), "20171231");
        assert_eq!(normalize(" 2017-12-31 "), "20171231");
    }

    #[test]
    fn test_normalize_fails_closed() {
        assert_eq!(normalize("31 Dec"), "31 Dec");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_trade_dt_from_str() {
        let d: TradeDt = "2018-09-28".parse().unwrap();
        assert_eq!(d, tdt(2018, 9, 28));
        assert_eq!(d.to_string(), "20180928");
        assert!(d == "20180928");
    }

    #[test]
    fn test_trade_dt_invalid() {
        assert!(matches!(
            "20181332".parse::<TradeDt>(),
            Err(CalendarError::InvalidDate(_))
        ));
        assert!(matches!(
            "yesterday".parse::<TradeDt>(),
            Err(CalendarError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_date_like() {
        let nd = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
        assert_eq!(nd.to_trade_dt().unwrap(), tdt(2016, 2, 29));
        assert_eq!(
            nd.and_hms_opt(10, 0, 0).unwrap().to_trade_dt().unwrap(),
            tdt(2016, 2, 29)
        );
        assert_eq!("2016-02-29".to_trade_dt().unwrap(), tdt(2016, 2, 29));
        assert_eq!(
            String::from("20160229").to_trade_dt().unwrap(),
            tdt(2016, 2, 29)
        );
    }

    #[test]
    fn test_add_cal_days() {
        assert_eq!(tdt(2016, 2, 28).add_cal_days(2), tdt(2016, 3, 1));
        assert_eq!(tdt(2016, 3, 1).add_cal_days(-2), tdt(2016, 2, 28));
        assert_eq!(tdt(2016, 3, 1).add_cal_days(i64::MAX), TradeDt::new(NaiveDate::MAX));
    }

    #[test]
    fn test_ordering_matches_canonical_strings() {
        let a = tdt(2017, 12, 31);
        let b = tdt(2018, 1, 2);
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
