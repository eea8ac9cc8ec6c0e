//! 報表領域類型
//!
//! 上游報表查詢結果、訂單、時間區間，以及表格、圖表與匯出描述。

pub mod container;
pub mod export;
pub mod interval;
pub mod order;
pub mod presentation;
pub mod report;

pub use container::{Container, Shape};
pub use export::{ExportColumn, ExportColumns, ExportItem};
pub use interval::{Interval, Subtotals, SubtotalsSlot};
pub use order::{OrderId, OrderRecord, OrderStatus, OrderSummary};
pub use presentation::{ChartConfig, ChartType, ReportTable, SortOrder, TableCell, TableHeader, TableItems};
pub use report::{IntervalsLocation, OrdersReport, RevenueReport};

/// 費用欄位與小計鍵
pub const STRIPE_FEE_KEY: &str = "stripe_fee";

/// 扣除費用後淨額欄位鍵
pub const NET_AFTER_FEES_KEY: &str = "net_after_fees";
