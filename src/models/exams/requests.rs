use crate::models::common::PaginationQuery;
use crate::models::common::deserialize::option_string_or_bool;
use crate::utils::semester::normalize_semester;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建考试请求，出卷人为当前用户
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub name: String,
    pub subject_name: String,
    pub subject_code: Option<String>,
    pub sem: String,
    pub batch_code: String,
    pub max_marks: Option<f64>,
    pub exam_date: Option<DateTime<Utc>>, // ISO 8601 格式
    pub description: Option<String>,
}

/// 更新考试请求（部分字段），出卷人不可修改
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub name: Option<String>,
    pub subject_name: Option<String>,
    pub subject_code: Option<String>,
    pub sem: Option<String>,
    pub batch_code: Option<String>,
    pub max_marks: Option<f64>,
    pub exam_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl UpdateExamRequest {
    /// 校验提供的字段，返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        let non_blank = [
            ("name", &self.name),
            ("subjectName", &self.subject_name),
            ("sem", &self.sem),
            ("batchCode", &self.batch_code),
        ];
        for (field, value) in non_blank {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(format!("{field} must not be empty"));
            }
        }
        if let Some(sem) = &self.sem
            && normalize_semester(sem).is_none()
        {
            return Err(format!("Invalid semester: {sem}"));
        }
        if let Some(max) = self.max_marks
            && (!max.is_finite() || max < 0.0)
        {
            return Err("maxMarks must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// 考试列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub batch_code: Option<String>,
    pub sem: Option<String>,
    /// 仅列出自己出的卷
    #[serde(default, deserialize_with = "option_string_or_bool")]
    pub mine: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct ExamListQuery {
    pub page: u64,
    pub limit: u64,
    pub batch_code: Option<String>,
    pub sem: Option<String>,
    pub paper_setter: Option<i64>,
}

impl ExamListParams {
    pub fn into_query(self, actor_id: i64) -> ExamListQuery {
        ExamListQuery {
            page: self.pagination.page(),
            limit: self.pagination.limit(),
            batch_code: self
                .batch_code
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            sem: self.sem.as_deref().and_then(normalize_semester),
            paper_setter: self.mine.unwrap_or(false).then_some(actor_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_validation() {
        assert!(UpdateExamRequest::default().validate().is_ok());

        let req = UpdateExamRequest {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateExamRequest {
            max_marks: Some(-5.0),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateExamRequest {
            sem: Some("semester one".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_params_mine_flag() {
        let params = actix_web::web::Query::<ExamListParams>::from_query(
            "page=1&batchCode=CSE24&sem=1&mine=true",
        )
        .unwrap()
        .into_inner();
        let query = params.into_query(7);
        assert_eq!(query.paper_setter, Some(7));
        assert_eq!(query.sem.as_deref(), Some("sem1"));
        assert_eq!(query.batch_code.as_deref(), Some("CSE24"));

        let query = ExamListParams::default().into_query(7);
        assert_eq!(query.paper_setter, None);
    }
}
