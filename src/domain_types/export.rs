use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CSV 匯出欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumn {
    pub key: String,
    pub label: String,
}

/// CSV 匯出欄位定義，保持欄位順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportColumns {
    columns: Vec<ExportColumn>,
}

impl ExportColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定欄位：已存在的鍵更新標籤並保留位置，否則附加在最後
    pub fn set(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();

        match self.columns.iter_mut().find(|c| c.key == key) {
            Some(column) => column.label = label,
            None => self.columns.push(ExportColumn { key, label }),
        }
    }

    /// 鏈式設定欄位
    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.set(key, label);
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.label.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// 單筆 CSV 匯出資料
pub type ExportItem = Map<String, Value>;
