use crate::config::{self, DatabaseConfig};
use anyhow::Result;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::ConnectOptions;
use tokio::sync::OnceCell;
use tracing::info;

/// 全局訂單資料庫連接池（唯讀）
static ORDER_DB_POOL: OnceCell<MySqlPool> = OnceCell::const_new();

/// 資料庫池類型
pub type DatabasePool = MySqlPool;

/// 初始化訂單資料庫連接池
pub async fn init_order_pool(config: &DatabaseConfig) -> Result<MySqlPool> {
    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database);

    options = options.disable_statement_logging();

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime())
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect_with(options)
        .await?;

    // 測試連接
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        "訂單資料庫連接池已建立: {}:{}/{}",
        config.host, config.port, config.database
    );

    Ok(pool)
}

/// 獲取訂單資料庫連接池
pub async fn get_order_pool() -> Result<&'static MySqlPool> {
    ORDER_DB_POOL
        .get_or_try_init(|| async {
            let app_config = config::get_config()?;
            init_order_pool(&app_config.database).await
        })
        .await
}
