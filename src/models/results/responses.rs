use super::entities::{ExamResult, MarksOutcome};
use serde::Serialize;
use ts_rs::TS;

/// 成绩提交响应，created / updated 二者只出现其一
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SubmitMarksResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub updated: Option<bool>,
}

impl From<MarksOutcome> for SubmitMarksResponse {
    fn from(outcome: MarksOutcome) -> Self {
        match outcome {
            MarksOutcome::Created(_) => Self {
                success: true,
                created: Some(true),
                updated: None,
            },
            MarksOutcome::Updated(_) => Self {
                success: true,
                created: None,
                updated: Some(true),
            },
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListResponse {
    pub success: bool,
    pub results: Vec<ExamResult>,
}
