//! 費用分析模組
//!
//! 為訂單與營收報表加上支付手續費欄位，並擴充匯出、表格與圖表描述。

pub mod aggregator;
pub mod annotator;
pub mod chart;
pub mod error;
pub mod export;
pub mod net_fees;
pub mod pipeline;
pub mod settings;
pub mod table;

pub use aggregator::{AggregationOutcome, IntervalAggregator};
pub use annotator::FeeAnnotator;
pub use chart::{append_stripe_fee_chart, stripe_fee_chart};
pub use error::{AnalyticsError, AnalyticsResult};
pub use export::{
    append_fee_column, append_net_after_fees_column, prepare_net_after_fees_item, prepare_orders_export_item,
    prepare_revenue_export_item, CsvExporter,
};
pub use net_fees::{display_amount, display_net_after_fees, net_after_fees};
pub use pipeline::ReportPipeline;
pub use settings::PipelineSettings;
pub use table::{augment_orders_table, augment_revenue_table, augment_table};
