use super::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::students::entities::Student;
use crate::models::subjects::entities::Subject;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub success: bool,
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub success: bool,
    pub saved: u64,
}

// 出勤表中的一行
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RosterEntry {
    pub student: Student,
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSheetResponse {
    pub subject: Subject,
    pub date: String,
    pub students: Vec<RosterEntry>,
    pub page: i64,
    pub total: i64,
    pub total_pages: i64,
    /// 当天已记录的出勤条数
    pub recorded: i64,
}
