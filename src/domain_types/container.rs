//! 上游報表容器
//!
//! 上游報表資料可能以兩種結構到達：有序鍵值表（JSON 中以 `[key, value]`
//! 配對陣列表示）或鬆散記錄（JSON 物件）。`Container` 在邊界處統一這兩種
//! 結構，寫入時沿用原本的結構，輸出時也還原為相同的結構。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 容器結構類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// 有序鍵值表
    Keyed,
    /// 鬆散記錄
    Record,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Keyed => write!(f, "Keyed"),
            Shape::Record => write!(f, "Record"),
        }
    }
}

/// 鍵值容器，保留到達時的結構與鍵的順序
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Keyed(Vec<(String, Value)>),
    Record(Map<String, Value>),
}

impl Container {
    /// 創建指定結構的空容器
    pub fn new(shape: Shape) -> Self {
        match shape {
            Shape::Keyed => Container::Keyed(Vec::new()),
            Shape::Record => Container::Record(Map::new()),
        }
    }

    /// 從 JSON 值建立容器
    ///
    /// 物件視為 `Record`；空陣列或全部由 `[字串, 值]` 組成的陣列視為 `Keyed`。
    /// 其他值不是容器，原樣退回給呼叫方。
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Container::Record(map)),
            Value::Array(items) => {
                if !items.iter().all(is_key_value_pair) {
                    return Err(Value::Array(items));
                }

                let pairs = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Array(mut pair) => {
                            let value = pair.pop()?;
                            match pair.pop()? {
                                Value::String(key) => Some((key, value)),
                                _ => None,
                            }
                        }
                        _ => None,
                    })
                    .collect();

                Ok(Container::Keyed(pairs))
            }
            other => Err(other),
        }
    }

    /// 轉換回 JSON 值，結構與到達時相同
    pub fn into_value(self) -> Value {
        match self {
            Container::Keyed(pairs) => Value::Array(
                pairs
                    .into_iter()
                    .map(|(key, value)| Value::Array(vec![Value::String(key), value]))
                    .collect(),
            ),
            Container::Record(map) => Value::Object(map),
        }
    }

    /// 獲取容器結構
    pub fn shape(&self) -> Shape {
        match self {
            Container::Keyed(_) => Shape::Keyed,
            Container::Record(_) => Shape::Record,
        }
    }

    /// 讀取指定鍵的值
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Container::Keyed(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Container::Record(map) => map.get(key),
        }
    }

    /// 讀取指定鍵的可變值
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Container::Keyed(pairs) => pairs.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v),
            Container::Record(map) => map.get_mut(key),
        }
    }

    /// 檢查鍵是否存在
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 寫入鍵值
    ///
    /// 已存在的鍵在原位置更新，新鍵附加在最後。返回舊值。
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self {
            Container::Keyed(pairs) => {
                if let Some((_, slot)) = pairs.iter_mut().find(|(k, _)| *k == key) {
                    return Some(std::mem::replace(slot, value));
                }
                pairs.push((key, value));
                None
            }
            Container::Record(map) => map.insert(key, value),
        }
    }

    /// 移除鍵值
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match self {
            Container::Keyed(pairs) => {
                let index = pairs.iter().position(|(k, _)| k == key)?;
                Some(pairs.remove(index).1)
            }
            Container::Record(map) => map.shift_remove(key),
        }
    }

    /// 鍵值數量
    pub fn len(&self) -> usize {
        match self {
            Container::Keyed(pairs) => pairs.len(),
            Container::Record(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按順序列出所有鍵
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Container::Keyed(pairs) => pairs.iter().map(|(k, _)| k.as_str()).collect(),
            Container::Record(map) => map.keys().map(String::as_str).collect(),
        }
    }
}

impl From<Container> for Value {
    fn from(container: Container) -> Self {
        container.into_value()
    }
}

fn is_key_value_pair(item: &Value) -> bool {
    matches!(item, Value::Array(pair) if pair.len() == 2 && pair[0].is_string())
}
