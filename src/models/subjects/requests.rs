use crate::utils::semester::{is_show_all, semester_number};
use serde::Deserialize;
use ts_rs::TS;

// 课程分配查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListParams {
    pub branch: Option<String>,
    /// 接受 "1" 或 "sem1"
    pub semester: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub branch: Option<String>,
    pub semester: Option<i32>,
}

impl SubjectListParams {
    pub fn into_query(self) -> Result<SubjectListQuery, String> {
        let branch = self
            .branch
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty() && !is_show_all(b))
            .map(str::to_uppercase);

        let semester = match self.semester.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                Some(semester_number(s).ok_or_else(|| format!("Invalid semester: {s}"))?)
            }
            _ => None,
        };

        Ok(SubjectListQuery { branch, semester })
    }
}

// 创建课程请求（仅管理员）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub branch: String,
    /// 未提供时从课程代码第 4 位推断
    pub semester: Option<i32>,
}
