mod common;

use common::{date_pairs, intervals_from, quarter_store, store_with, utc, MockFees, MockOrders};
use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;

use stripe_fee_analytics::analytics::{AnalyticsError, IntervalAggregator};
use stripe_fee_analytics::domain_types::{Interval, OrderId, OrderStatus, OrderSummary, RevenueReport, Shape};

fn aggregator() -> IntervalAggregator {
    let store = quarter_store();
    IntervalAggregator::new(store.clone(), store)
}

fn monthly_intervals() -> Value {
    json!([
        {"interval": "2024-01", "date_start": "2024-01-01 00:00:00", "date_end": "2024-02-01 00:00:00"},
        {"interval": "2024-02", "date_start": "2024-02-01 00:00:00", "date_end": "2024-03-01 00:00:00"},
        {"interval": "2024-03", "date_start": "2024-03-01 00:00:00", "date_end": "2024-04-01 00:00:00"}
    ])
}

#[tokio::test]
async fn test_single_interval_with_missing_fee() {
    let store = store_with(&[
        (1, OrderStatus::Completed, utc(2024, 1, 10), Some("12.50")),
        (2, OrderStatus::Completed, utc(2024, 1, 11), None),
    ]);
    let aggregator = IntervalAggregator::new(store.clone(), store);
    let mut intervals = intervals_from(json!([{"date_start": "2024-01-01", "date_end": "2024-02-01"}]));

    let outcome = aggregator.aggregate(&mut intervals).await.unwrap();

    assert_eq!(intervals[0].stripe_fee(), Some(dec!(12.50)));
    assert_eq!(outcome.total_fee, dec!(12.50));
    // 缺少費用的訂單仍計為已掃描
    assert_eq!(outcome.orders_scanned, 2);
    assert_eq!(outcome.orders_missing_fee, 1);
}

#[tokio::test]
async fn test_empty_intervals() {
    let mut intervals: Vec<Interval> = Vec::new();
    let outcome = aggregator().aggregate(&mut intervals).await.unwrap();

    assert!(intervals.is_empty());
    assert_eq!(outcome.total_fee, Decimal::ZERO);
    assert_eq!(outcome.intervals_processed, 0);
}

#[tokio::test]
async fn test_interval_missing_end_is_passed_through() {
    let raw = json!([
        {"interval": "2024-01", "date_start": "2024-01-01 00:00:00"},
        {"interval": "2024-02", "date_start": "2024-02-01 00:00:00", "date_end": "2024-03-01 00:00:00"}
    ]);
    let mut intervals = intervals_from(raw.clone());

    let outcome = aggregator().aggregate(&mut intervals).await.unwrap();

    assert_eq!(outcome.intervals_skipped, 1);
    assert_eq!(outcome.intervals_processed, 1);
    assert_eq!(outcome.total_fee, dec!(5.00));

    let output: Vec<Value> = intervals.into_iter().map(Interval::into_value).collect();
    assert_eq!(output[0], raw[0]);
    assert!(output[0].get("subtotals").is_none());
}

#[tokio::test]
async fn test_monthly_totals_and_status_filter() {
    let mut intervals = intervals_from(monthly_intervals());
    let outcome = aggregator().aggregate(&mut intervals).await.unwrap();

    let fees: Vec<_> = intervals.iter().map(Interval::stripe_fee).collect();
    // 二月的取消訂單與三月的退款訂單不計入
    assert_eq!(fees, vec![Some(dec!(12.50)), Some(dec!(5.00)), Some(dec!(0))]);
    assert_eq!(outcome.total_fee, dec!(17.50));
    assert_eq!(outcome.orders_scanned, 5);
    assert_eq!(outcome.orders_missing_fee, 2);
}

#[tokio::test]
async fn test_output_preserves_length_and_dates() {
    let raw = monthly_intervals();
    let mut intervals = intervals_from(raw.clone());
    aggregator().aggregate(&mut intervals).await.unwrap();

    let output: Vec<Value> = intervals.into_iter().map(Interval::into_value).collect();
    let input = raw.as_array().unwrap();
    assert_eq!(output.len(), input.len());
    assert_eq!(date_pairs(&output), date_pairs(input));
}

#[tokio::test]
async fn test_aggregate_is_idempotent() {
    let aggregator = aggregator();

    let mut once = intervals_from(monthly_intervals());
    let first = aggregator.aggregate(&mut once).await.unwrap();

    let mut twice = once.clone();
    let second = aggregator.aggregate(&mut twice).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_shape_preservation() {
    let mut intervals = intervals_from(json!([
        {"date_start": "2024-01-01", "date_end": "2024-02-01", "subtotals": {"orders_count": 2}},
        [["date_start", "2024-02-01"], ["date_end", "2024-03-01"], ["subtotals", [["orders_count", 2]]]],
        [["date_start", "2024-03-01"], ["date_end", "2024-04-01"]]
    ]));

    aggregator().aggregate(&mut intervals).await.unwrap();

    assert_eq!(intervals[0].subtotals().map(|s| s.shape()), Some(Shape::Record));
    assert_eq!(intervals[1].subtotals().map(|s| s.shape()), Some(Shape::Keyed));
    assert_eq!(intervals[2].subtotals().map(|s| s.shape()), Some(Shape::Keyed));

    let output: Vec<Value> = intervals.into_iter().map(Interval::into_value).collect();
    assert_eq!(output[0]["subtotals"], json!({"orders_count": 2, "stripe_fee": 12.5}));
    assert_eq!(output[1][2], json!(["subtotals", [["orders_count", 2], ["stripe_fee", 5]]]));
    assert_eq!(output[2][2], json!(["subtotals", [["stripe_fee", 0]]]));
}

#[tokio::test]
async fn test_report_totals_match_interval_sum() {
    let mut report = RevenueReport::from_value(json!({
        "data": {"intervals": monthly_intervals()},
        "totals": {"net_revenue": 1000}
    }))
    .unwrap();

    let outcome = aggregator().aggregate_report(&mut report).await.unwrap();

    let totals = report.totals().unwrap();
    assert_eq!(totals.stripe_fee(), Some(outcome.total_fee));
    assert_eq!(report.interval_fee_sum(), outcome.total_fee);
    assert_eq!(totals.get_decimal("net_revenue"), Some(dec!(1000)));
}

#[tokio::test]
async fn test_query_uses_half_open_range_and_allow_list() {
    let mut orders = MockOrders::new();
    orders
        .expect_find_orders()
        .withf(|range, statuses| {
            range.start == Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                && range.end == Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
                && statuses.to_vec() == OrderStatus::REPORTABLE.to_vec()
        })
        .times(1)
        .returning(|_, _| Ok(vec![OrderId(1), OrderId(2), OrderId(3)]));
    orders
        .expect_get_order()
        .times(3)
        .returning(|id| {
            Ok((id != OrderId(3)).then(|| OrderSummary::new(id, OrderStatus::Completed, utc(2024, 1, 2))))
        });

    let mut fees = MockFees::new();
    fees.expect_stored_fee()
        .times(2)
        .returning(|id| Ok(Some(format!("{}.25", id.get()))));

    let aggregator = IntervalAggregator::new(Arc::new(orders), Arc::new(fees));
    let mut intervals = intervals_from(json!([{"date_start": "2024-01-01", "date_end": "2024-02-01"}]));
    let outcome = aggregator.aggregate(&mut intervals).await.unwrap();

    // 訂單 3 不存在，不查詢費用
    assert_eq!(outcome.total_fee, dec!(3.50));
    assert_eq!(outcome.orders_scanned, 2);
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let mut orders = MockOrders::new();
    orders
        .expect_find_orders()
        .returning(|_, _| Err(anyhow::anyhow!("connection reset")));
    let fees = MockFees::new();

    let aggregator = IntervalAggregator::new(Arc::new(orders), Arc::new(fees));
    let mut intervals = intervals_from(json!([{"date_start": "2024-01-01", "date_end": "2024-02-01"}]));
    let err = aggregator.aggregate(&mut intervals).await.unwrap_err();

    assert!(err.to_string().contains("connection reset"));
    assert_matches!(err, AnalyticsError::Upstream(_));
}

#[tokio::test]
async fn test_interval_dates_with_utc_offset() {
    let store = store_with(&[(1, OrderStatus::Completed, utc(2024, 1, 10), Some("12.50"))]);
    let aggregator = IntervalAggregator::new(store.clone(), store);
    let mut intervals = intervals_from(json!([
        {"date_start": "2024-01-01T00:00:00Z", "date_end": "2024-02-01T00:00:00Z"},
        {"date_start": "2024-01-01T08:00:00+08:00", "date_end": "2024-02-01 08:00:00+08:00"}
    ]));

    let outcome = aggregator.aggregate(&mut intervals).await.unwrap();

    assert_eq!(outcome.intervals_skipped, 0);
    assert_eq!(outcome.intervals_processed, 2);
    assert_eq!(intervals[0].stripe_fee(), Some(dec!(12.50)));
    assert_eq!(intervals[1].stripe_fee(), Some(dec!(12.50)));
    assert_eq!(outcome.total_fee, dec!(25.00));
}

#[tokio::test]
async fn test_scalar_subtotals_skip_order_query() {
    let mut orders = MockOrders::new();
    orders.expect_find_orders().never();
    orders.expect_get_order().never();
    let mut fees = MockFees::new();
    fees.expect_stored_fee().never();

    let aggregator = IntervalAggregator::new(Arc::new(orders), Arc::new(fees));
    let raw = json!([{"date_start": "2024-01-01", "date_end": "2024-02-01", "subtotals": "n/a"}]);
    let mut intervals = intervals_from(raw.clone());
    let outcome = aggregator.aggregate(&mut intervals).await.unwrap();

    assert_eq!(outcome.intervals_skipped, 1);
    assert_eq!(outcome.intervals_processed, 0);
    assert_eq!(outcome.total_fee, Decimal::ZERO);

    let output: Vec<Value> = intervals.into_iter().map(Interval::into_value).collect();
    assert_eq!(Value::Array(output), raw);
}

fn fee_strategy() -> impl Strategy<Value = Vec<Option<u32>>> {
    prop::collection::vec(prop::option::of(0u32..100_000), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn total_equals_sum_of_subtotals(fees in fee_strategy(), skip_every in 2usize..5) {
        let orders: Vec<(u64, OrderStatus, chrono::DateTime<chrono::Utc>, Option<String>)> = fees
            .iter()
            .enumerate()
            .map(|(i, fee)| {
                (
                    i as u64 + 1,
                    OrderStatus::Completed,
                    utc(2024, 1 + (i % 6) as u32, 10),
                    fee.map(|cents| Decimal::new(cents as i64, 2).to_string()),
                )
            })
            .collect();
        let borrowed: Vec<_> = orders
            .iter()
            .map(|(id, status, created, fee)| (*id, *status, *created, fee.as_deref()))
            .collect();
        let store = store_with(&borrowed);

        let raw: Vec<Value> = (1..=6u32)
            .map(|month| {
                if month as usize % skip_every == 0 {
                    json!({"date_start": format!("2024-{:02}-01", month)})
                } else {
                    json!({
                        "date_start": format!("2024-{:02}-01", month),
                        "date_end": format!("2024-{:02}-01", month + 1),
                    })
                }
            })
            .collect();
        let expected: Decimal = fees
            .iter()
            .enumerate()
            .filter(|(i, _)| (i % 6 + 1) % skip_every != 0)
            .filter_map(|(_, fee)| fee.map(|cents| Decimal::new(cents as i64, 2)))
            .sum();

        let (outcome, intervals) = tokio_test::block_on(async {
            let aggregator = IntervalAggregator::new(store.clone(), store);
            let mut intervals: Vec<Interval> = raw.into_iter().map(Interval::from_value).collect();
            let outcome = aggregator.aggregate(&mut intervals).await.unwrap();
            (outcome, intervals)
        });

        let sum: Decimal = intervals.iter().filter_map(Interval::stripe_fee).sum();
        prop_assert_eq!(outcome.total_fee, sum);
        prop_assert_eq!(outcome.total_fee, expected);
    }
}
