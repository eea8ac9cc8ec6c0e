use chrono::{TimeZone, Utc};
use serde_json::json;
use std::env;
use std::io;
use std::sync::Arc;
use stripe_fee_analytics::analytics::{CsvExporter, ReportPipeline};
use stripe_fee_analytics::config::init_config;
use stripe_fee_analytics::domain_types::{ExportColumns, ExportItem, OrderId, OrderStatus, OrderSummary};
use stripe_fee_analytics::monitor::init_logging;
use stripe_fee_analytics::storage::{get_order_pool, InMemoryOrderStore, MySqlOrderRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化配置與日誌
    let config = init_config()?;
    init_logging(&config.log)?;

    // 帶 `--mysql` 參數時使用配置中的資料庫，否則使用示範資料
    let use_mysql = env::args().any(|arg| arg == "--mysql");
    let pipeline = if use_mysql {
        let pool = get_order_pool().await?;
        let repo = Arc::new(MySqlOrderRepository::from_config(Arc::new(pool.clone()), config));
        ReportPipeline::from_config(config, repo.clone(), repo)
    } else {
        let store = Arc::new(demo_store());
        ReportPipeline::from_config(config, store.clone(), store)
    };

    let results = json!({
        "totals": {"net_revenue": 542.0, "orders_count": 4},
        "intervals": [
            {
                "interval": "2024-01",
                "date_start": "2024-01-01 00:00:00",
                "date_end": "2024-02-01 00:00:00",
                "subtotals": {"net_revenue": 320.0, "orders_count": 2}
            },
            {
                "interval": "2024-02",
                "date_start": "2024-02-01 00:00:00",
                "date_end": "2024-03-01 00:00:00",
                "subtotals": {"net_revenue": 222.0, "orders_count": 2}
            }
        ]
    });

    let report = pipeline.revenue_select(results).await?;
    info!("營收報表: {}", serde_json::to_string_pretty(&report)?);

    // 輸出 CSV 到標準輸出
    let columns = pipeline.revenue_export_columns(
        ExportColumns::new()
            .with("interval", "Date")
            .with("net_revenue", "Net Sales"),
    );
    let mut exporter = CsvExporter::new(io::stdout(), columns)?;

    if let Some(intervals) = report["intervals"].as_array() {
        for interval in intervals {
            let mut item = ExportItem::new();
            item.insert("interval".to_string(), interval["interval"].clone());
            item.insert("net_revenue".to_string(), interval["subtotals"]["net_revenue"].clone());
            exporter.write_item(&pipeline.revenue_export_item(item, interval))?;
        }
    }
    exporter.finish()?;

    Ok(())
}

fn demo_store() -> InMemoryOrderStore {
    let orders = [
        (1001, OrderStatus::Completed, (2024, 1, 4), Some("9.58")),
        (1002, OrderStatus::Processing, (2024, 1, 19), Some("4.12")),
        (1003, OrderStatus::OnHold, (2024, 2, 7), None),
        (1004, OrderStatus::Completed, (2024, 2, 21), Some("6.74")),
        (1005, OrderStatus::Refunded, (2024, 2, 22), Some("3.00")),
    ];

    orders
        .into_iter()
        .fold(InMemoryOrderStore::new(), |store, (id, status, (y, m, d), fee)| {
            let created = Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).single();
            match created {
                Some(created) => store.with_order(OrderSummary::new(OrderId(id), status, created), fee),
                None => store,
            }
        })
}
