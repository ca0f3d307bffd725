//! 節假日日曆模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 節假日
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    /// 日期
    pub date: NaiveDate,

    /// 名稱
    pub name: String,
}

impl Holiday {
    /// 創建新的節假日
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// 節假日日曆
///
/// 僅作為補貨規劃的查詢表，列表順序即查詢順序。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// 節假日列表（依日曆順序）
    pub holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// 創建空的日曆
    pub fn new() -> Self {
        Self {
            holidays: Vec::new(),
        }
    }

    /// 建構器模式：載入節假日列表
    pub fn with_holidays(mut self, holidays: Vec<Holiday>) -> Self {
        self.holidays = holidays;
        self
    }

    /// 添加節假日
    pub fn add_holiday(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.holidays.push(Holiday::new(date, name));
    }

    /// 查詢即將到來的節假日
    ///
    /// 回傳列表順序中第一個落在 `[check_date, check_date + days_before]`
    /// 區間（含兩端）的節假日名稱。已過期或超出區間的節假日一律忽略。
    /// NaiveDate 為日粒度，兩端日期天生對齊到當日零點。
    pub fn upcoming_holiday(&self, check_date: NaiveDate, days_before: u32) -> Option<&str> {
        self.holidays
            .iter()
            .find(|holiday| {
                let diff_days = (holiday.date - check_date).num_days();
                diff_days >= 0 && diff_days <= i64::from(days_before)
            })
            .map(|holiday| holiday.name.as_str())
    }
}
