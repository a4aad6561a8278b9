use chrono::{Datelike, NaiveDateTime};
use core_types::Order;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days between purchase and delivery.
///
/// The elapsed time is floored to a day count: 47h is 1 day, and a delivery one
/// hour *before* the purchase is -1. Negative results are kept as-is.
pub fn derive_delivery_duration(
    purchased: Option<NaiveDateTime>,
    delivered: Option<NaiveDateTime>,
) -> Option<i64> {
    let elapsed = delivered? - purchased?;
    Some(elapsed.num_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Calendar year of the purchase.
pub fn derive_year(purchased: Option<NaiveDateTime>) -> Option<i32> {
    purchased.map(|ts| ts.year())
}

/// Fills in the derived fields of an order from its timestamps.
pub fn apply_derivations(order: &mut Order) {
    order.delivery_duration_days =
        derive_delivery_duration(order.purchase_timestamp, order.delivered_timestamp);
    order.purchase_year = derive_year(order.purchase_timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::OrderStatus;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(h, 0, 0))
    }

    #[test]
    fn truncates_partial_days() {
        // 47 hours elapsed.
        assert_eq!(derive_delivery_duration(ts(2018, 1, 1, 10), ts(2018, 1, 3, 9)), Some(1));
        assert_eq!(derive_delivery_duration(ts(2018, 1, 1, 10), ts(2018, 1, 3, 10)), Some(2));
        assert_eq!(derive_delivery_duration(ts(2018, 1, 1, 10), ts(2018, 1, 1, 23)), Some(0));
    }

    #[test]
    fn negative_spans_are_preserved() {
        assert_eq!(derive_delivery_duration(ts(2018, 1, 3, 10), ts(2018, 1, 3, 9)), Some(-1));
        assert_eq!(derive_delivery_duration(ts(2018, 1, 5, 0), ts(2018, 1, 3, 0)), Some(-2));
    }

    #[test]
    fn missing_timestamps_are_undefined() {
        assert_eq!(derive_delivery_duration(None, ts(2018, 1, 3, 9)), None);
        assert_eq!(derive_delivery_duration(ts(2018, 1, 3, 9), None), None);
        assert_eq!(derive_year(None), None);
    }

    #[test]
    fn year_follows_purchase_only() {
        let mut order = Order::new("o1", "c1", OrderStatus::Delivered, ts(2017, 12, 31, 23), ts(2018, 1, 4, 8));
        apply_derivations(&mut order);
        assert_eq!(order.purchase_year, Some(2017));
        assert_eq!(order.delivery_duration_days, Some(3));
    }

    #[test]
    fn non_negative_spans_match_the_integer_day_difference() {
        let start = ts(2017, 3, 1, 6).unwrap();
        for hours in [0_i64, 1, 23, 24, 25, 71, 72, 24 * 40 + 5] {
            let end = start + chrono::Duration::hours(hours);
            let days = derive_delivery_duration(Some(start), Some(end)).unwrap();
            assert!(days >= 0);
            assert_eq!(days, hours / 24);
        }
    }
}
