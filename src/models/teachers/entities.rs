use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "school/teacher.ts")]
    pub enum Qualification ("qualification") {
        Bachelor => "bachelor",
        Master => "master",
        Phd => "phd",
        Diploma => "diploma",
        Other => "other",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school/teacher.ts")]
pub struct TeacherProfile {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: String,
    pub qualification: Qualification,
    pub specialization: String,
    pub experience_years: i32,
    pub joining_date: chrono::NaiveDate,
    /// 月薪，仅管理员可见
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub salary: Option<f64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TeacherProfile {
    pub fn without_salary(mut self) -> Self {
        self.salary = None;
        self
    }
}

/// 教师档案 + 账号信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "school/teacher.ts")]
pub struct TeacherDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub profile: TeacherProfile,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl TeacherDetail {
    pub fn without_salary(self) -> Self {
        Self {
            profile: self.profile.without_salary(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_strings() {
        assert_eq!(Qualification::Phd.as_str(), "phd");
        assert_eq!("master".parse::<Qualification>().unwrap(), Qualification::Master);
        let err = "doctorate".parse::<Qualification>().unwrap_err();
        assert!(err.contains("bachelor, master, phd, diploma, other"));
    }

    #[test]
    fn test_salary_hidden() {
        let profile = TeacherProfile {
            id: 1,
            user_id: 2,
            employee_id: "EMP001".to_string(),
            qualification: Qualification::Master,
            specialization: "Mathematics".to_string(),
            experience_years: 5,
            joining_date: chrono::NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(),
            salary: Some(4200.50),
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let visible = serde_json::to_value(&profile).unwrap();
        assert_eq!(visible["salary"], 4200.5);

        let hidden = serde_json::to_value(profile.without_salary()).unwrap();
        assert!(hidden.get("salary").is_none());
    }
}
