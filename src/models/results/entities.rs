use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 成绩记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamResult {
    pub id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    // 科目名称（非外键）
    pub subject: String,
    pub marks_obtained: f64,
    pub sem: String,
    pub batch_code: String,
    pub is_updated: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 一批成绩的定位键
#[derive(Debug, Clone, PartialEq)]
pub struct MarksBatchKey {
    pub exam_id: i64,
    pub sem: String,
    pub batch_code: String,
}

/// 校验后的单条成绩
#[derive(Debug, Clone, PartialEq)]
pub struct MarksEntry {
    pub student_id: i64,
    pub marks: f64,
    /// 是否被标记为已修改（重复提交时只处理这些条目）
    pub selected: bool,
}

/// 校验后的成绩提交
#[derive(Debug, Clone, PartialEq)]
pub struct MarksSubmission {
    pub batch: MarksBatchKey,
    pub subject: String,
    pub entries: Vec<MarksEntry>,
}

/// 成绩提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarksOutcome {
    /// 首次提交，插入的行数
    Created(u64),
    /// 重复提交，实际改写的行数
    Updated(u64),
}
