use crate::models::common::PaginationQuery;
use crate::models::common::deserialize::{option_string_or_i64, string_or_i64};
use crate::utils::semester::semester_number;
use crate::utils::validate::parse_attendance_date;
use serde::Deserialize;
use ts_rs::TS;

// 出勤记录查询参数（batchCode 即课程代码）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    pub batch_code: Option<String>,
    pub semester: Option<String>,
    pub date: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub subject_code: Option<String>,
    pub semester: Option<i32>,
    pub date: Option<String>,
}

impl AttendanceListParams {
    pub fn into_query(self) -> Result<AttendanceListQuery, String> {
        let date = match self.date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => Some(parse_attendance_date(d)?),
            _ => None,
        };
        let semester = match self.semester.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                Some(semester_number(s).ok_or_else(|| format!("Invalid semester: {s}"))?)
            }
            _ => None,
        };

        Ok(AttendanceListQuery {
            subject_code: self
                .batch_code
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty()),
            semester,
            date,
        })
    }
}

/// 单个学生的出勤标记
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceMark {
    #[serde(deserialize_with = "string_or_i64")]
    #[ts(type = "number")]
    pub student_id: i64,
    pub is_present: bool,
}

/// 批量标记出勤请求
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub subject_code: String,
    pub subject_name: String,
    pub semester: i32,
    pub date: String,
    /// 未提供时使用当前用户的显示名
    pub professor: Option<String>,
    pub records: Vec<AttendanceMark>,
}

/// 校验后的批量出勤
#[derive(Debug, Clone)]
pub struct AttendanceBatch {
    pub subject_code: String,
    pub subject_name: String,
    pub semester: i32,
    pub date: String,
    pub professor: String,
    pub records: Vec<AttendanceMark>,
}

impl MarkAttendanceRequest {
    pub fn validate(self, default_professor: &str) -> Result<AttendanceBatch, String> {
        let subject_code = self.subject_code.trim().to_uppercase();
        if subject_code.is_empty() {
            return Err("Missing required field: subjectCode".to_string());
        }
        let subject_name = self.subject_name.trim().to_string();
        if subject_name.is_empty() {
            return Err("Missing required field: subjectName".to_string());
        }
        if !(1..=12).contains(&self.semester) {
            return Err(format!("Invalid semester: {}", self.semester));
        }
        if self.records.is_empty() {
            return Err("records must not be empty".to_string());
        }
        let date = parse_attendance_date(self.date.trim())?;
        let professor = self
            .professor
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| default_professor.to_string());

        // 同一学生出现多次时以最后一次为准
        let mut records: Vec<AttendanceMark> = Vec::with_capacity(self.records.len());
        for mark in self.records {
            if mark.student_id <= 0 {
                return Err("Every record needs a studentId".to_string());
            }
            match records.iter_mut().find(|r| r.student_id == mark.student_id) {
                Some(existing) => *existing = mark,
                None => records.push(mark),
            }
        }

        Ok(AttendanceBatch {
            subject_code,
            subject_name,
            semester: self.semester,
            date,
            professor,
            records,
        })
    }
}

/// 出勤表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSheetParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub department: Option<String>,
    pub sem: Option<String>,
    #[serde(default, deserialize_with = "option_string_or_i64")]
    #[ts(type = "number | null")]
    pub subject_id: Option<i64>,
    pub date: Option<String>,
    pub search: Option<String>,
}
