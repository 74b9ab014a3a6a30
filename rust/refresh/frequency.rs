use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendars::TradeDt;
use crate::error::CalendarError;

/// Identifies the period a trading day belongs to, e.g. (year, month).
pub(crate) type PeriodKey = (i32, u32);

/// A frequency at which refresh (rebalancing) dates are selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Weeks, keyed by calendar year and ISO week number.
    ///
    /// A week spanning the new year is split in two at January 1st.
    Weekly,
    /// Every other week of the [`Frequency::Weekly`] series of the queried window.
    ///
    /// The alternation is anchored to the first weekly date in the window, not to a fixed
    /// calendar epoch, so queries with different begin dates may select different weeks.
    BiWeekly,
    /// Calendar months.
    Monthly,
    /// Calendar quarters.
    Quarterly,
    /// Fiscal reporting periods beginning in May, September and November.
    Reportly,
    /// Half years beginning in January and July.
    Halfyearly,
    /// Calendar years.
    Yearly,
}

/// How a [`Frequency`] divides trading days into periods.
pub(crate) enum Periods {
    /// Consecutive trading days sharing a key form a period. `padding` trading days either side
    /// of a query make boundary periods fully visible.
    Keyed {
        padding: i32,
        key: fn(&TradeDt) -> PeriodKey,
    },
    /// A label identifies each period, and `bounds` gives the first calendar date of the period
    /// and of the period following it.
    Anchored {
        label: fn(&TradeDt) -> PeriodKey,
        bounds: fn(PeriodKey) -> (TradeDt, TradeDt),
    },
    /// Every other date of another frequency's series.
    Alternate(Frequency),
}

impl Frequency {
    pub(crate) fn periods(&self) -> Periods {
        match self {
            Frequency::Weekly => Periods::Keyed {
                padding: 20,
                key: week_key,
            },
            Frequency::BiWeekly => Periods::Alternate(Frequency::Weekly),
            Frequency::Monthly => Periods::Keyed {
                padding: 40,
                key: month_key,
            },
            Frequency::Quarterly => Periods::Keyed {
                padding: 120,
                key: quarter_key,
            },
            Frequency::Reportly => Periods::Anchored {
                label: report_label,
                bounds: report_bounds,
            },
            Frequency::Halfyearly => Periods::Anchored {
                label: half_label,
                bounds: half_bounds,
            },
            Frequency::Yearly => Periods::Keyed {
                padding: 300,
                key: year_key,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Reportly => "reportly",
            Frequency::Halfyearly => "halfyearly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        match name.as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::BiWeekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "reportly" => Ok(Frequency::Reportly),
            "halfyearly" | "semiannual" => Ok(Frequency::Halfyearly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(CalendarError::Configuration(format!(
                "Frequency: '{}' is not recognised.",
                s
            ))),
        }
    }
}

// The first day of a month, saturating at the last representable date.
fn first_of_month(year: i32, month: u32) -> TradeDt {
    TradeDt::from_ymd_opt(year, month, 1).unwrap_or(TradeDt::new(NaiveDate::MAX))
}

// Calendar year, not ISO year. December days in ISO week 1 only group with neighbouring days,
// since periods are consecutive runs of equal keys.
fn week_key(date: &TradeDt) -> PeriodKey {
    (date.year(), date.iso_week().week())
}

fn month_key(date: &TradeDt) -> PeriodKey {
    (date.year(), date.month())
}

fn quarter_key(date: &TradeDt) -> PeriodKey {
    (date.year(), (date.month() - 1) / 3 + 1)
}

fn year_key(date: &TradeDt) -> PeriodKey {
    (date.year(), 0)
}

// Half years are labelled by their starting month.
fn half_label(date: &TradeDt) -> PeriodKey {
    if date.month() <= 6 {
        (date.year(), 1)
    } else {
        (date.year(), 7)
    }
}

fn half_bounds(label: PeriodKey) -> (TradeDt, TradeDt) {
    let (year, month) = label;
    if month == 1 {
        (first_of_month(year, 1), first_of_month(year, 7))
    } else {
        (first_of_month(year, 7), first_of_month(year + 1, 1))
    }
}

/// Map a date to the fiscal reporting period in force on that date.
///
/// Annual reports are due by April 30th; until then the period opened the previous November is
/// current.
fn report_label(date: &TradeDt) -> PeriodKey {
    let (year, md) = (date.year(), (date.month(), date.day()));
    if md <= (4, 30) {
        (year - 1, 11)
    } else if md <= (8, 31) {
        (year, 5)
    } else if md <= (10, 31) {
        (year, 9)
    } else {
        (year, 11)
    }
}

fn report_bounds(label: PeriodKey) -> (TradeDt, TradeDt) {
    let (year, month) = label;
    match month {
        11 => (first_of_month(year, 11), first_of_month(year + 1, 5)),
        9 => (first_of_month(year, 9), first_of_month(year, 11)),
        _ => (first_of_month(year, 5), first_of_month(year, 9)),
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::tdt;

    #[test]
    fn test_from_str() {
        assert_eq!("Monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("bi-weekly".parse::<Frequency>().unwrap(), Frequency::BiWeekly);
        assert_eq!("semiannual".parse::<Frequency>().unwrap(), Frequency::Halfyearly);
        assert_eq!("half_yearly".parse::<Frequency>().unwrap(), Frequency::Halfyearly);
        assert!(matches!(
            "daily".parse::<Frequency>(),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn test_name_round_trip() {
        for f in [
            Frequency::Weekly,
            Frequency::BiWeekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Reportly,
            Frequency::Halfyearly,
            Frequency::Yearly,
        ] {
            assert_eq!(f.to_string().parse::<Frequency>().unwrap(), f);
        }
    }

    #[test]
    fn test_week_key_uses_calendar_year() {
        // Monday 31st December 2018 is in ISO week 1 of 2019
        assert_eq!(week_key(&tdt(2018, 12, 31)), (2018, 1));
        assert_eq!(week_key(&tdt(2019, 1, 2)), (2019, 1));
        assert_eq!(week_key(&tdt(2018, 12, 28)), (2018, 52));
    }

    #[test]
    fn test_quarter_key() {
        assert_eq!(quarter_key(&tdt(2018, 3, 30)), (2018, 1));
        assert_eq!(quarter_key(&tdt(2018, 4, 2)), (2018, 2));
        assert_eq!(quarter_key(&tdt(2018, 12, 28)), (2018, 4));
    }

    #[test]
    fn test_half_label_and_bounds() {
        assert_eq!(half_label(&tdt(2018, 6, 30)), (2018, 1));
        assert_eq!(half_label(&tdt(2018, 7, 1)), (2018, 7));
        assert_eq!(half_bounds((2018, 1)), (tdt(2018, 1, 1), tdt(2018, 7, 1)));
        assert_eq!(half_bounds((2018, 7)), (tdt(2018, 7, 1), tdt(2019, 1, 1)));
    }

    #[test]
    fn test_report_label_boundaries() {
        assert_eq!(report_label(&tdt(2018, 1, 1)), (2017, 11));
        assert_eq!(report_label(&tdt(2018, 4, 30)), (2017, 11));
        assert_eq!(report_label(&tdt(2018, 5, 1)), (2018, 5));
        assert_eq!(report_label(&tdt(2018, 8, 31)), (2018, 5));
        assert_eq!(report_label(&tdt(2018, 9, 1)), (2018, 9));
        assert_eq!(report_label(&tdt(2018, 10, 31)), (2018, 9));
        assert_eq!(report_label(&tdt(2018, 11, 1)), (2018, 11));
        assert_eq!(report_label(&tdt(2018, 12, 31)), (2018, 11));
    }

    #[test]
    fn test_report_labels_partition_the_year() {
        // leap year, to include February 29th
        let mut date = tdt(2016, 1, 1);
        let mut seen: Vec<PeriodKey> = vec![];
        while date <= tdt(2016, 12, 31) {
            let label = report_label(&date);
            assert!([(2015, 11), (2016, 5), (2016, 9), (2016, 11)].contains(&label));
            let (start, next) = report_bounds(label);
            assert!(start <= date && date < next, "{} not in {:?}", date, label);
            if seen.last() != Some(&label) {
                seen.push(label);
            }
            date = date.add_cal_days(1);
        }
        // each label is one contiguous run, in order
        assert_eq!(seen, vec![(2015, 11), (2016, 5), (2016, 9), (2016, 11)]);
    }

    #[test]
    fn test_report_bounds() {
        assert_eq!(report_bounds((2017, 11)), (tdt(2017, 11, 1), tdt(2018, 5, 1)));
        assert_eq!(report_bounds((2018, 9)), (tdt(2018, 9, 1), tdt(2018, 11, 1)));
        assert_eq!(report_bounds((2018, 5)), (tdt(2018, 5, 1), tdt(2018, 9, 1)));
    }
}
