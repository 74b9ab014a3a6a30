use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Which trading day(s) of each period a refresh frequency selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// The earliest trading day of each period.
    First,
    /// The latest trading day of each period.
    Last,
    /// Both the earliest and latest trading day of each period.
    Both,
}

impl SelectionPolicy {
    /// Derive a policy from direction arguments.
    ///
    /// `1` selects the first day of a period and `-1` the last; supplying both selects both.
    /// Any other value, no value at all, or arguments whose sum has a magnitude greater than 1
    /// are rejected.
    ///
    /// # Examples
    /// ```rust
    /// # use tradecal::refresh::SelectionPolicy;
    /// assert_eq!(SelectionPolicy::try_from_args(&[-1]).unwrap(), SelectionPolicy::Last);
    /// assert_eq!(SelectionPolicy::try_from_args(&[1, -1]).unwrap(), SelectionPolicy::Both);
    /// assert!(SelectionPolicy::try_from_args(&[1, 1]).is_err());
    /// ```
    pub fn try_from_args(args: &[i32]) -> CalendarResult<Self> {
        if args.iter().any(|a| *a != 1 && *a != -1) {
            return Err(CalendarError::Configuration(format!(
                "Refresh direction args must be 1 or -1, got {:?}.",
                args
            )));
        }
        if args.iter().sum::<i32>().abs() > 1 {
            return Err(CalendarError::Configuration(format!(
                "Refresh direction args must be 1, -1 or (1, -1), got {:?}.",
                args
            )));
        }
        match (args.contains(&1), args.contains(&-1)) {
            (true, true) => Ok(SelectionPolicy::Both),
            (true, false) => Ok(SelectionPolicy::First),
            (false, true) => Ok(SelectionPolicy::Last),
            (false, false) => Err(CalendarError::Configuration(
                "At least one refresh direction arg, 1 or -1, is required.".to_string(),
            )),
        }
    }

    /// The direction args which construct this policy.
    pub fn args(&self) -> Vec<i32> {
        match self {
            SelectionPolicy::First => vec![1],
            SelectionPolicy::Last => vec![-1],
            SelectionPolicy::Both => vec![1, -1],
        }
    }

    pub fn includes_first(&self) -> bool {
        matches!(self, SelectionPolicy::First | SelectionPolicy::Both)
    }

    pub fn includes_last(&self) -> bool {
        matches!(self, SelectionPolicy::Last | SelectionPolicy::Both)
    }
}
