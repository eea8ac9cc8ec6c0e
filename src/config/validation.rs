use std::fmt::Display;
use std::ops::RangeInclusive;
use thiserror::Error;

/// 配置驗證錯誤，欄位名稱使用 `section.key` 形式
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} 不可為空")]
    MissingField(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("{field} = {value} 超出允許範圍 {min}..={max}")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("啟用 {dependent} 時必須設定 {dependency}")]
    DependencyError {
        dependent: String,
        dependency: String,
    },
}

/// 可驗證的配置區段
pub trait Validator {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證整份配置或單一區段
pub fn validate_config<T: Validator>(config: &T) -> Result<(), ValidationError> {
    config.validate()
}

/// 各配置區段共用的檢查
pub struct ValidationUtils;

impl ValidationUtils {
    /// 數值必須落在閉區間內
    pub fn in_range<T>(value: T, bounds: RangeInclusive<T>, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + Display,
    {
        if bounds.contains(&value) {
            return Ok(());
        }
        let (min, max) = bounds.into_inner();
        Err(ValidationError::RangeError {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }

    /// 字串必須是候選值之一（不分大小寫）
    pub fn one_of(value: &str, options: &[&str], field: &str) -> Result<(), ValidationError> {
        if options.iter().any(|option| option.eq_ignore_ascii_case(value.trim())) {
            return Ok(());
        }
        Err(ValidationError::InvalidValue(format!(
            "{} 必須是 {} 之一，目前為 {:?}",
            field,
            options.join(" / "),
            value
        )))
    }

    /// 去除空白後不可為空字串
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field.to_string()));
        }
        Ok(())
    }

    /// 表前綴等會拼入 SQL 的名稱只能包含英數字與底線（允許空字串）
    pub fn identifier(value: &str, field: &str) -> Result<(), ValidationError> {
        match value.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            None => Ok(()),
            Some(bad) => Err(ValidationError::InvalidValue(format!(
                "{} 含有不允許的字元 {:?}: {}",
                field, bad, value
            ))),
        }
    }

    pub fn not_empty_list<T>(values: &[T], field: &str) -> Result<(), ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::MissingField(field.to_string()));
        }
        Ok(())
    }

    /// 開關 `dependent` 開啟時 `dependency` 必須已設定
    pub fn check_dependency(
        enabled: bool,
        dependency_set: bool,
        dependent: &str,
        dependency: &str,
    ) -> Result<(), ValidationError> {
        if enabled && !dependency_set {
            return Err(ValidationError::DependencyError {
                dependent: dependent.to_string(),
                dependency: dependency.to_string(),
            });
        }
        Ok(())
    }
}
