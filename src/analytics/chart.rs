use crate::domain_types::{ChartConfig, ChartType, SortOrder, STRIPE_FEE_KEY};

/// 營收報表的費用圖表：貨幣類型，降序排列，數值越低越好
pub fn stripe_fee_chart(label: &str) -> ChartConfig {
    ChartConfig {
        key: STRIPE_FEE_KEY.to_string(),
        label: label.to_string(),
        order: SortOrder::Desc,
        orderby: STRIPE_FEE_KEY.to_string(),
        chart_type: ChartType::Currency,
        is_reverse_trend: true,
    }
}

/// 在圖表列表最後加上費用圖表，已存在時不重複加入
pub fn append_stripe_fee_chart(mut charts: Vec<ChartConfig>, label: &str) -> Vec<ChartConfig> {
    if !charts.iter().any(|chart| chart.key == STRIPE_FEE_KEY) {
        charts.push(stripe_fee_chart(label));
    }
    charts
}
