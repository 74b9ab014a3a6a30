use crate::calendars::{Adjust, TradeDt, TradingDays};
use crate::json::JSON;

impl JSON for TradeDt {}
impl JSON for TradingDays {}
impl JSON for Adjust {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::tdt;

    #[test]
    fn test_trade_dt_json() {
        let d = tdt(2018, 9, 28);
        let js = d.to_json().unwrap();
        assert_eq!(js, "\"20180928\"");
        assert_eq!(TradeDt::from_json(&js).unwrap(), d);
    }

    #[test]
    fn test_trade_dt_json_accepts_other_layouts() {
        assert_eq!(TradeDt::from_json("\"2018-09-28\"").unwrap(), tdt(2018, 9, 28));
        assert!(TradeDt::from_json("\"28th September\"").is_err());
    }

    #[test]
    fn test_trading_days_json_rejects_empty() {
        assert!(TradingDays::from_json("[]").is_err());
    }

    #[test]
    fn test_adjust_json() {
        let js = Adjust::Next.to_json().unwrap();
        assert_eq!(Adjust::from_json(&js).unwrap(), Adjust::Next);
    }
}
