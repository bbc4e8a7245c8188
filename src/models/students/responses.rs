use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 学生名册响应
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub students: Vec<Student>,
    pub page: i64,
    pub total: i64,
    pub total_pages: i64,
}
