use crate::config::{ApplicationConfig, FeeConfig, LabelConfig, ReportConfig};
use crate::domain_types::OrderStatus;

/// 報表處理設定，由應用程序配置轉換而來
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// 計入區間費用的訂單狀態
    pub order_statuses: Vec<OrderStatus>,
    pub labels: LabelConfig,
    pub currency_symbol: String,
    /// 是否加上扣除費用後淨額
    pub show_net_after_fees: bool,
    /// 營收小計中的淨額鍵
    pub net_total_key: String,
}

impl PipelineSettings {
    pub fn from_config(config: &ApplicationConfig) -> Self {
        Self::from_sections(&config.fees, &config.labels, &config.report)
    }

    fn from_sections(fees: &FeeConfig, labels: &LabelConfig, report: &ReportConfig) -> Self {
        Self {
            order_statuses: fees.order_statuses.clone(),
            labels: labels.clone(),
            currency_symbol: fees.currency_symbol.clone(),
            show_net_after_fees: report.show_net_after_fees,
            net_total_key: report.net_total_key.clone(),
        }
    }

    /// 開啟淨額欄位
    pub fn with_net_after_fees(mut self, enabled: bool) -> Self {
        self.show_net_after_fees = enabled;
        self
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_sections(
            &FeeConfig::default(),
            &LabelConfig::default(),
            &ReportConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.order_statuses, OrderStatus::REPORTABLE.to_vec());
        assert_eq!(settings.labels.orders_column, "Stripe Fee");
        assert_eq!(settings.currency_symbol, "$");
        assert!(!settings.show_net_after_fees);
        assert!(settings.with_net_after_fees(true).show_net_after_fees);
    }

    #[test]
    fn test_settings_compare_by_value() {
        let settings = PipelineSettings::default();
        assert_eq!(settings, settings.clone());
        assert_eq!(settings.labels, LabelConfig::default());

        let relabelled = PipelineSettings {
            labels: LabelConfig {
                chart: "Processor Fees".to_string(),
                ..LabelConfig::default()
            },
            ..PipelineSettings::default()
        };
        assert_ne!(relabelled, settings);
        assert_ne!(settings.clone().with_net_after_fees(true), settings);
    }
}
