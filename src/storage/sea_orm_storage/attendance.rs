//! 考勤存储操作

use std::collections::HashMap;

use chrono::NaiveDate;

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    attendance::{
        AttendanceStatus, AttendanceSummary,
        entities::Attendance,
        requests::{AttendanceEntry, AttendanceListQuery},
        responses::{
            AttendanceListResponse, AttendanceReport, MarkAttendanceResponse,
            StudentAttendanceRow,
        },
    },
};
use crate::utils::dates::format_date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set, TransactionTrait,
};

fn filter_date_range(
    mut select: Select<AttendanceRecords>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> Select<AttendanceRecords> {
    // YYYY-MM-DD 字符串比较与日期顺序一致
    if let Some(from) = date_from {
        select = select.filter(Column::Date.gte(format_date(from)));
    }
    if let Some(to) = date_to {
        select = select.filter(Column::Date.lte(format_date(to)));
    }
    select
}

impl SeaOrmStorage {
    /// 批量记录考勤，按 (学生, 科目, 日期) 插入或更新
    pub async fn mark_attendance_impl(
        &self,
        subject_id: i64,
        date: NaiveDate,
        entries: Vec<AttendanceEntry>,
        marked_by: Option<i64>,
    ) -> Result<MarkAttendanceResponse> {
        let date_str = format_date(date);
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = 0u64;
        let mut updated = 0u64;
        let mut records = Vec::with_capacity(entries.len());

        for entry in entries {
            let existing = AttendanceRecords::find()
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::SubjectId.eq(subject_id))
                .filter(Column::Date.eq(date_str.clone()))
                .one(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询考勤记录失败: {e}")))?;

            let model = match existing {
                Some(model) => {
                    let mut active: ActiveModel = model.into();
                    active.status = Set(entry.status.to_string());
                    active.remarks = Set(entry.remarks);
                    active.marked_by = Set(marked_by);
                    active.updated_at = Set(now);
                    updated += 1;
                    active.update(&txn).await
                }
                None => {
                    created += 1;
                    ActiveModel {
                        student_id: Set(entry.student_id),
                        subject_id: Set(subject_id),
                        date: Set(date_str.clone()),
                        status: Set(entry.status.to_string()),
                        remarks: Set(entry.remarks),
                        marked_by: Set(marked_by),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                }
            }
            .map_err(|e| SchoolError::database_operation(format!("保存考勤记录失败: {e}")))?;

            records.push(model.into_attendance());
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(MarkAttendanceResponse {
            subject_id,
            date,
            created,
            updated,
            records,
        })
    }

    /// 分页查询考勤，按日期倒序、科目、学生排序
    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = AttendanceRecords::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select = filter_date_range(select, query.date_from, query.date_to)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::SubjectId)
            .order_by_asc(Column::StudentId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤页数失败: {e}")))?;

        let records = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(AttendanceListResponse {
            items: records.into_iter().map(|m| m.into_attendance()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 学生考勤记录，按日期倒序
    pub async fn list_student_attendance_impl(
        &self,
        student_id: i64,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Attendance>> {
        let select = AttendanceRecords::find().filter(Column::StudentId.eq(student_id));

        let records = filter_date_range(select, since, None)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 科目考勤报表：每名有效选课学生一行
    pub async fn subject_attendance_report_impl(
        &self,
        subject_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AttendanceReport> {
        let students = self.list_subject_students_impl(subject_id).await?;

        let select = AttendanceRecords::find().filter(Column::SubjectId.eq(subject_id));
        let records = filter_date_range(select, date_from, date_to)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目考勤失败: {e}")))?;

        let mut by_student: HashMap<i64, Vec<AttendanceStatus>> = HashMap::new();
        for record in records {
            let status = record.status.parse::<AttendanceStatus>().unwrap_or_default();
            by_student.entry(record.student_id).or_default().push(status);
        }

        let rows = students
            .into_iter()
            .map(|student| {
                let summary = by_student
                    .get(&student.profile.id)
                    .map(|statuses| AttendanceSummary::from_statuses(statuses))
                    .unwrap_or_else(|| AttendanceSummary::from_counts(0, 0));
                StudentAttendanceRow {
                    student_id: student.profile.id,
                    student_number: student.profile.student_number,
                    student_name: student.full_name,
                    summary,
                }
            })
            .collect();

        Ok(AttendanceReport {
            subject_id,
            date_from,
            date_to,
            rows,
        })
    }

    /// 某日某科目的 (已记录人数, 出勤人数)
    pub async fn count_subject_attendance_on_impl(
        &self,
        subject_id: i64,
        date: NaiveDate,
    ) -> Result<(u64, u64)> {
        let records = AttendanceRecords::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Date.eq(format_date(date)))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询当日考勤失败: {e}")))?;

        let marked = records.len() as u64;
        let present = records
            .iter()
            .filter(|r| {
                r.status
                    .parse::<AttendanceStatus>()
                    .is_ok_and(|s| s.is_present())
            })
            .count() as u64;

        Ok((marked, present))
    }
}
