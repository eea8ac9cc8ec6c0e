// monitor.rs - 日誌系統初始化

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::LogConfig;

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// 從配置值解析，未知值使用 Pretty
    pub fn from_config(format: &str) -> Self {
        match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// 建立日誌過濾器
///
/// `RUST_LOG` 存在時優先使用，否則使用配置中的級別。
pub fn build_env_filter(log_config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.level.to_lowercase()))
}

/// 初始化全局日誌系統
pub fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = build_env_filter(log_config);

    match LogFormat::from_config(&log_config.format) {
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;
        }
        LogFormat::Pretty => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;
        }
    }

    info!(level = %log_config.level, format = %log_config.format, "日誌系統初始化完成");
    Ok(())
}
