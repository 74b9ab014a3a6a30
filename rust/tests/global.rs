use crate::calendars::{
    adjust_trade_dt, delta_trade_dt, get_trade_dts, load_calendar, step_trade_dt, tdt, Adjust,
    CalendarManager,
};
use crate::error::CalendarError;
use crate::refresh::{Frequency, Refresh};
use crate::tests::{fixture_calendar, GLOBAL_CALENDAR_LOCK};
use std::sync::{Arc, PoisonError};

fn load_fixture() {
    let days: Vec<String> = fixture_calendar()
        .dates()
        .iter()
        .map(|d| d.to_string())
        .collect();
    load_calendar(days).unwrap();
}

#[test]
fn global_refresh_monthly_last() {
    let _guard = GLOBAL_CALENDAR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    load_fixture();
    let r = Refresh::try_global(Frequency::Monthly, &[-1]).unwrap();
    assert!(Arc::ptr_eq(r.calendar(), &CalendarManager::new().get().unwrap()));
    assert_eq!(r.next("20180921", 1, true).unwrap(), "20180928");
    assert_eq!(r.prev("20180921", 1, true).unwrap(), "20180831");
    CalendarManager::new().reset();
}

#[test]
fn global_trade_dt_functions() {
    let _guard = GLOBAL_CALENDAR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    load_fixture();
    // National Day holiday week
    assert_eq!(step_trade_dt("20180928", 1).unwrap(), tdt(2018, 10, 8));
    assert_eq!(step_trade_dt("2018-10-03", -1).unwrap(), tdt(2018, 9, 28));
    assert_eq!(
        adjust_trade_dt("2018-10-03 15:00:00", Adjust::Next).unwrap(),
        tdt(2018, 10, 8)
    );
    assert_eq!(delta_trade_dt("20180901", "20180930").unwrap(), 19);
    assert!(get_trade_dts("20180929", "20181007").unwrap().is_empty());
    assert!(matches!(
        adjust_trade_dt("20200101", Adjust::Next),
        Err(CalendarError::OutOfRange(_))
    ));
    CalendarManager::new().reset();
}

#[test]
fn global_refresh_rejects_bad_args_before_loading() {
    let _guard = GLOBAL_CALENDAR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    CalendarManager::new().reset();
    assert!(matches!(
        Refresh::try_global(Frequency::Weekly, &[1, 1]),
        Err(CalendarError::Configuration(_))
    ));
    assert!(!CalendarManager::new().is_loaded());
}

#[test]
fn refresh_shares_one_calendar() {
    let cal = Arc::new(fixture_calendar());
    let first = Refresh::try_new(Frequency::Quarterly, &[1], cal.clone()).unwrap();
    let last = Refresh::try_new(Frequency::Quarterly, &[-1], cal.clone()).unwrap();
    assert_eq!(Arc::strong_count(&cal), 3);
    assert_ne!(first, last);
    // the last trading day of each quarter precedes the first of the next
    let firsts = first.get("20170101", "20191231").unwrap();
    let lasts = last.get("20161201", "20191130").unwrap();
    assert_eq!(firsts.len(), lasts.len());
    for (l, f) in lasts.iter().zip(firsts.iter()) {
        assert_eq!(cal.step(f, -1), *l);
    }
}
