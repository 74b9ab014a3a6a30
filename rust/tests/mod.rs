use crate::calendars::{tdt, TradeDt, TradingDays};
use chrono::{Datelike, Weekday};
use std::sync::Mutex;

mod global;

// Tests which touch the process-wide calendar hold this lock.
pub(crate) static GLOBAL_CALENDAR_LOCK: Mutex<()> = Mutex::new(());

const FIXTURE_HOLIDAYS: [&str; 68] = [
    // 2016
    "20160101", "20160208", "20160209", "20160210", "20160211", "20160212", "20160404",
    "20160502", "20160609", "20160610", "20160915", "20160916", "20161003", "20161004",
    "20161005", "20161006", "20161007",
    // 2017
    "20170102", "20170127", "20170130", "20170131", "20170201", "20170202", "20170203",
    "20170403", "20170404", "20170501", "20170529", "20170530", "20171002", "20171003",
    "20171004", "20171005", "20171006",
    // 2018
    "20180101", "20180215", "20180216", "20180219", "20180220", "20180221", "20180405",
    "20180406", "20180430", "20180501", "20180618", "20180924", "20181001", "20181002",
    "20181003", "20181004", "20181005",
    // 2019
    "20190101", "20190204", "20190205", "20190206", "20190207", "20190208", "20190405",
    "20190501", "20190502", "20190503", "20190607", "20190913", "20191001", "20191002",
    "20191003", "20191004", "20191007",
];

/// An exchange calendar of weekdays from 2016 to 2019, excluding public holidays.
pub(crate) fn fixture_calendar() -> TradingDays {
    let holidays: Vec<TradeDt> = FIXTURE_HOLIDAYS.iter().map(|h| h.parse().unwrap()).collect();
    let mut days: Vec<TradeDt> = vec![];
    let mut date = tdt(2016, 1, 1);
    while date <= tdt(2019, 12, 31) {
        let weekend = matches!(date.date().weekday(), Weekday::Sat | Weekday::Sun);
        if !weekend && !holidays.contains(&date) {
            days.push(date);
        }
        date = date.add_cal_days(1);
    }
    TradingDays::try_new(days).unwrap()
}

#[test]
fn fixture_calendar_bounds() {
    let cal = fixture_calendar();
    assert_eq!(cal.len(), 975);
    assert_eq!(cal.first(), tdt(2016, 1, 4));
    assert_eq!(cal.last(), tdt(2019, 12, 31));
    assert!(!cal.contains(&tdt(2018, 10, 1)));
    assert!(cal.contains(&tdt(2018, 9, 28)));
}
