mod common;

use assert_matches::assert_matches;
use common::{quarter_store, MockFees};
use mockall::predicate::eq;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;

use stripe_fee_analytics::analytics::{AnalyticsError, FeeAnnotator};
use stripe_fee_analytics::domain_types::{Container, OrderId, OrderRecord};

#[tokio::test]
async fn test_one_lookup_per_record() {
    let mut fees = MockFees::new();
    for id in [3u64, 1, 2] {
        fees.expect_stored_fee()
            .with(eq(OrderId(id)))
            .times(1)
            .returning(move |_| Ok(Some(format!("{}.00", id))));
    }

    let annotator = FeeAnnotator::new(Arc::new(fees));
    let records = vec![
        OrderRecord::new(OrderId(3)),
        OrderRecord::new(OrderId(1)),
        OrderRecord::new(OrderId(2)),
    ];

    let annotated = annotator.annotate(records).await.unwrap();
    let fees: Vec<_> = annotated.iter().map(|r| r.stripe_fee()).collect();
    assert_eq!(fees, vec![Some(dec!(3)), Some(dec!(1)), Some(dec!(2))]);
}

#[tokio::test]
async fn test_record_without_order_id_skips_lookup() {
    let mut fees = MockFees::new();
    fees.expect_stored_fee().never();

    let annotator = FeeAnnotator::new(Arc::new(fees));
    let columns = Container::from_value(json!({"customer": "guest"})).unwrap();
    let annotated = annotator
        .annotate(vec![OrderRecord::from_container(columns)])
        .await
        .unwrap();

    assert_eq!(annotated[0].stripe_fee(), Some(Decimal::ZERO));
    assert_eq!(annotated[0].columns.get("customer"), Some(&json!("guest")));
}

#[rstest]
#[case::stored_string(1, dec!(12.50))]
#[case::absent(2, dec!(0))]
#[case::non_numeric(6, dec!(0))]
#[case::unknown_order(404, dec!(0))]
#[tokio::test]
async fn test_fee_defaults(#[case] id: u64, #[case] expected: Decimal) {
    let annotator = FeeAnnotator::new(quarter_store());
    let annotated = annotator.annotate(vec![OrderRecord::new(OrderId(id))]).await.unwrap();

    assert_eq!(annotated.len(), 1);
    assert_eq!(annotated[0].stripe_fee(), Some(expected));
}

#[tokio::test]
async fn test_lookup_failure_propagates() {
    let mut fees = MockFees::new();
    fees.expect_stored_fee()
        .returning(|_| Err(anyhow::anyhow!("meta table missing")));

    let annotator = FeeAnnotator::new(Arc::new(fees));
    let result = annotator.annotate(vec![OrderRecord::new(OrderId(1))]).await;

    assert_matches!(result, Err(AnalyticsError::Upstream(_)));
}
