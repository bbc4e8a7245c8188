use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    // 考试名称，如 "Mid Term 1"
    pub name: String,
    pub subject_name: String,
    pub subject_code: Option<String>,
    pub sem: String,
    pub batch_code: String,
    pub max_marks: f64,
    pub exam_date: Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
    // 出卷人（所有者）用户 ID
    pub paper_setter: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Exam {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.paper_setter == user_id
    }
}

// 出卷人信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct PaperSetterInfo {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
}

// 考试详情（附带出卷人信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub exam: Exam,
    pub setter: Option<PaperSetterInfo>,
}
