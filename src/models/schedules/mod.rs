use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    #[derive(PartialOrd, Ord, TS)]
    #[ts(export, export_to = "school/schedule.ts")]
    pub enum Weekday ("weekday") {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

impl Weekday {
    /// 周一为 0
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/schedule.ts")]
pub struct TeacherSchedule {
    pub id: i64,
    // 教师档案 ID
    pub teacher_id: i64,
    pub weekday: Weekday,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub subject_id: Option<i64>,
    pub room_number: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "school/schedule.ts")]
pub struct CreateScheduleRequest {
    /// 仅管理员需要指定；教师默认为自己
    pub teacher_id: Option<i64>,
    pub weekday: Weekday,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub subject_id: Option<i64>,
    pub room_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "school/schedule.ts")]
pub struct UpdateScheduleRequest {
    pub weekday: Option<Weekday>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub clear_subject: bool,
    pub room_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "school/schedule.ts")]
pub struct ScheduleQueryParams {
    pub teacher_id: Option<i64>,
    pub weekday: Option<Weekday>,
}

/// 校验时间段，结束时间必须晚于开始时间
pub fn validate_time_slot(
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
) -> Result<(), &'static str> {
    if end_time <= start_time {
        return Err("End time must be after start time");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_time_slot() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert!(validate_time_slot(nine, ten).is_ok());
        assert!(validate_time_slot(ten, nine).is_err());
        assert!(validate_time_slot(nine, nine).is_err());
    }

    #[test]
    fn test_weekday_order() {
        assert!(Weekday::Monday < Weekday::Friday);
        assert_eq!(Weekday::Sunday.index(), 6);
        assert_eq!("wednesday".parse::<Weekday>().unwrap(), Weekday::Wednesday);
    }
}
