use crate::utils::error::{IntakeError, Result};
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 比較皆為 false，這裡要當作超出範圍
    if !(value >= min && value <= max) {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_amount(field_name: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(IntakeError::ValidationError {
            message: format!("{} must be a finite, non-negative number (got {})", field_name, amount),
        });
    }
    Ok(())
}

/// 出生日期不可晚於參考日期
pub fn validate_not_after(field_name: &str, date: NaiveDate, reference: NaiveDate) -> Result<()> {
    if date > reference {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: date.to_string(),
            reason: format!("Date cannot be after {}", reference),
        });
    }
    Ok(())
}

/// 命令列日期參數的解析器（clap `value_parser`）
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        IntakeError::InvalidConfigValueError {
            field: "date".to_string(),
            value: value.to_string(),
            reason: format!("Expected YYYY-MM-DD: {}", e),
        }
    })
}
