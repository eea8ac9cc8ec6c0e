use thiserror::Error;

/// 費用分析錯誤類型
///
/// 格式錯誤的輸入不屬於錯誤，會原樣傳遞；這裡只有上游與輸出錯誤。
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// 訂單查詢或元數據儲存失敗，原樣向呼叫方傳遞
    #[error("上游資料來源錯誤: {0}")]
    Upstream(#[from] anyhow::Error),

    /// CSV 寫入錯誤
    #[error("CSV 錯誤: {0}")]
    Csv(#[from] csv::Error),

    /// IO 錯誤
    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化錯誤
    #[error("JSON 錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

/// 費用分析結果類型別名
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
