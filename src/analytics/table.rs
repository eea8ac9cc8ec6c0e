//! 管理後台報表表格的費用欄位

use rust_decimal::Decimal;
use tracing::debug;

use crate::analytics::net_fees::{display_amount, display_net_after_fees, net_after_fees};
use crate::analytics::settings::PipelineSettings;
use crate::domain_types::{
    Container, Interval, ReportTable, TableCell, TableHeader, NET_AFTER_FEES_KEY, STRIPE_FEE_KEY,
};
use crate::utils::{decimal_from_value, decimal_to_value};

/// 訂單表格端點
pub const ORDERS_ENDPOINT: &str = "orders";
/// 營收表格端點
pub const REVENUE_ENDPOINT: &str = "revenue";

/// 依端點加上費用欄位，其他端點原樣返回
pub fn augment_table(table: ReportTable, settings: &PipelineSettings) -> ReportTable {
    match table.endpoint.as_str() {
        ORDERS_ENDPOINT => augment_orders_table(table, settings),
        REVENUE_ENDPOINT => augment_revenue_table(table, settings),
        other => {
            debug!(endpoint = other, "表格端點不需要費用欄位");
            table
        }
    }
}

/// 訂單表格：每列讀取資料項目的 `stripe_fee`
pub fn augment_orders_table(mut table: ReportTable, settings: &PipelineSettings) -> ReportTable {
    table
        .headers
        .push(numeric_header(&settings.labels.orders_column, STRIPE_FEE_KEY, false));

    for (index, row) in table.rows.iter_mut().enumerate() {
        let fee = table
            .items
            .data
            .get(index)
            .and_then(|item| Container::from_value(item.clone()).ok())
            .and_then(|columns| columns.get(STRIPE_FEE_KEY).and_then(decimal_from_value))
            .unwrap_or(Decimal::ZERO);

        row.push(amount_cell(fee, &settings.currency_symbol));
    }

    table
}

/// 營收表格：每列讀取資料項目的 `subtotals.stripe_fee`，可選擇加上淨額欄位
pub fn augment_revenue_table(mut table: ReportTable, settings: &PipelineSettings) -> ReportTable {
    table
        .headers
        .push(numeric_header(&settings.labels.revenue_column, STRIPE_FEE_KEY, true));
    if settings.show_net_after_fees {
        table.headers.push(numeric_header(
            &settings.labels.net_after_fees_column,
            NET_AFTER_FEES_KEY,
            false,
        ));
    }

    for (index, row) in table.rows.iter_mut().enumerate() {
        let interval = table.items.data.get(index).cloned().map(Interval::from_value);
        let subtotals = interval.as_ref().and_then(Interval::subtotals);

        let fee = subtotals
            .and_then(|s| s.stripe_fee())
            .unwrap_or(Decimal::ZERO);
        row.push(amount_cell(fee, &settings.currency_symbol));

        if settings.show_net_after_fees {
            let net_total = subtotals
                .and_then(|s| s.get_decimal(&settings.net_total_key))
                .unwrap_or(Decimal::ZERO);
            let net = net_after_fees(net_total, fee);
            row.push(TableCell {
                display: display_net_after_fees(net_total, fee, &settings.currency_symbol),
                value: decimal_to_value(net),
            });
        }
    }

    table
}

fn numeric_header(label: &str, key: &str, is_sortable: bool) -> TableHeader {
    TableHeader {
        label: label.to_string(),
        key: key.to_string(),
        required: false,
        is_sortable,
        is_numeric: true,
    }
}

fn amount_cell(amount: Decimal, currency_symbol: &str) -> TableCell {
    TableCell {
        display: display_amount(amount, currency_symbol),
        value: decimal_to_value(amount),
    }
}
