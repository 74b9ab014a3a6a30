use crate::json::JSON;
use crate::refresh::{Frequency, Refresh, SelectionPolicy};

impl JSON for Frequency {}
impl JSON for SelectionPolicy {}
impl JSON for Refresh {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{tdt, TradingDays};
    use std::sync::Arc;

    #[test]
    fn test_frequency_json() {
        let js = Frequency::BiWeekly.to_json().unwrap();
        assert_eq!(js, "\"BiWeekly\"");
        assert_eq!(Frequency::from_json(&js).unwrap(), Frequency::BiWeekly);
        assert!(Frequency::from_json("\"Daily\"").is_err());
    }

    #[test]
    fn test_selection_policy_json() {
        let js = SelectionPolicy::Both.to_json().unwrap();
        assert_eq!(SelectionPolicy::from_json(&js).unwrap(), SelectionPolicy::Both);
    }

    #[test]
    fn test_refresh_json() {
        let cal = TradingDays::try_new(vec!["20180927", "20180928", "20181008"]).unwrap();
        let r = Refresh::try_new(Frequency::Monthly, &[-1], Arc::new(cal)).unwrap();
        assert_eq!(r.next("20180901", 1, true).unwrap(), tdt(2018, 9, 28));
        let js = r.to_json().unwrap();
        assert_eq!(
            js,
            "{\"frequency\":\"Monthly\",\"policy\":\"Last\",\"calendar\":[\"20180927\",\"20180928\",\"20181008\"]}"
        );
        let r2 = Refresh::from_json(&js).unwrap();
        assert_eq!(r, r2);
        assert_eq!(r2.prev("20181005", 1, true).unwrap(), tdt(2018, 9, 28));
    }
}
