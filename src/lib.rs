// 模組定義
pub mod analytics;
pub mod config;
pub mod domain_types;
pub mod monitor;
pub mod storage;
pub mod utils;
