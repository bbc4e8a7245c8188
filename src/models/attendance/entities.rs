use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub is_present: bool,
    pub subject_name: String,
    pub subject_code: String,
    pub professor: String,
    // YYYY-MM-DD
    pub date: String,
    pub semester: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 名册中某个学生当天的出勤状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    // 没有记录，与明确缺勤区分
    Unknown,
}

impl AttendanceStatus {
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            Some(r) if r.is_present => AttendanceStatus::Present,
            Some(_) => AttendanceStatus::Absent,
            None => AttendanceStatus::Unknown,
        }
    }
}
