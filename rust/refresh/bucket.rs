//! Reduce a range of trading days to the first and/or last trading day of each period.

use itertools::Itertools;

use crate::calendars::{Adjust, TradeDt, TradingDays};
use crate::error::CalendarResult;
use crate::refresh::frequency::PeriodKey;
use crate::refresh::SelectionPolicy;

/// Merge two ascending series into one, removing duplicates.
pub(crate) fn merge_sorted(a: Vec<TradeDt>, b: Vec<TradeDt>) -> Vec<TradeDt> {
    a.into_iter().merge(b).dedup().collect()
}

// Keep only dates within the inclusive window.
fn within(dates: Vec<TradeDt>, begin: &TradeDt, end: &TradeDt) -> Vec<TradeDt> {
    dates
        .into_iter()
        .filter(|d| d >= begin && d <= end)
        .collect()
}

/// Select the first and/or last trading day of each keyed period overlapping `[begin, end]`.
///
/// The range is padded by `padding` trading days either side so that the true first or last
/// day of a boundary period is identified even when it lies outside the window; the result is
/// then filtered back to `[begin, end]`.
pub(crate) fn bucket(
    calendar: &TradingDays,
    begin: &TradeDt,
    end: &TradeDt,
    padding: i32,
    key: fn(&TradeDt) -> PeriodKey,
    policy: SelectionPolicy,
) -> Vec<TradeDt> {
    if begin > end {
        return vec![];
    }
    let padded = calendar.range(&calendar.step(begin, -padding), &calendar.step(end, padding));
    let mut firsts: Vec<TradeDt> = vec![];
    let mut lasts: Vec<TradeDt> = vec![];
    // trading days are ascending and every key is monotonic in time, so a period is one run
    for period in padded.chunk_by(|a, b| key(a) == key(b)) {
        if policy.includes_first() {
            firsts.push(period[0]);
        }
        if policy.includes_last() {
            lasts.push(period[period.len() - 1]);
        }
    }
    within(merge_sorted(firsts, lasts), begin, end)
}

/// Select period boundaries for labelled periods with fixed calendar anchors.
///
/// Each trading day in `[begin, end]` is labelled. For each label the first trading day on or
/// after the period start and the trading day immediately before the following period's start
/// are candidates, filtered back to `[begin, end]`.
pub(crate) fn anchored(
    calendar: &TradingDays,
    begin: &TradeDt,
    end: &TradeDt,
    label: fn(&TradeDt) -> PeriodKey,
    bounds: fn(PeriodKey) -> (TradeDt, TradeDt),
    policy: SelectionPolicy,
) -> CalendarResult<Vec<TradeDt>> {
    let mut firsts: Vec<TradeDt> = vec![];
    let mut lasts: Vec<TradeDt> = vec![];
    for period in calendar.range(begin, end).iter().map(label).dedup() {
        let (start, following) = bounds(period);
        if policy.includes_first() {
            firsts.push(calendar.adjust(&start, Adjust::Next)?);
        }
        if policy.includes_last() {
            lasts.push(calendar.step(&following, -1));
        }
    }
    Ok(within(merge_sorted(firsts, lasts), begin, end))
}
