use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    // 课程代码，如 "CS301"
    pub code: String,
    pub branch: String,
    pub semester: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
