use serde::Serialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::utils::round_to;

/// 出勤统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "school/attendance.ts")]
pub struct AttendanceSummary {
    pub total_classes: u64,
    pub present_classes: u64,
    pub absent_classes: u64,
    pub attendance_percentage: f64,
}

impl AttendanceSummary {
    pub fn from_counts(total_classes: u64, present_classes: u64) -> Self {
        let attendance_percentage = if total_classes > 0 {
            round_to(present_classes as f64 / total_classes as f64 * 100.0, 1)
        } else {
            0.0
        };
        Self {
            total_classes,
            present_classes,
            absent_classes: total_classes.saturating_sub(present_classes),
            attendance_percentage,
        }
    }

    pub fn from_statuses<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceStatus>,
    {
        let (total, present) = statuses.into_iter().fold((0u64, 0u64), |(t, p), s| {
            (t + 1, if s.is_present() { p + 1 } else { p })
        });
        Self::from_counts(total, present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = AttendanceSummary::from_counts(0, 0);
        assert_eq!(summary.attendance_percentage, 0.0);
        assert_eq!(summary.absent_classes, 0);
    }

    #[test]
    fn test_late_counts_as_present_excused_does_not() {
        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Late,
            AttendanceStatus::Excused,
        ];
        let summary = AttendanceSummary::from_statuses(&statuses);
        assert_eq!(summary.total_classes, 3);
        assert_eq!(summary.present_classes, 2);
        // 非出勤均计入缺勤
        assert_eq!(summary.absent_classes, 1);
        assert_eq!(summary.attendance_percentage, 66.7);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(AttendanceSummary::from_counts(8, 7).attendance_percentage, 87.5);
        assert_eq!(AttendanceSummary::from_counts(3, 1).attendance_percentage, 33.3);
        assert_eq!(AttendanceSummary::from_counts(4, 4).attendance_percentage, 100.0);
    }
}
