use crate::models::common::PaginationQuery;
use crate::utils::semester::{is_show_all, normalize_semester};
use serde::Deserialize;
use ts_rs::TS;

// 学生名册查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<String>,
    pub sem: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
}

impl StudentListParams {
    /// 转换为存储层查询
    ///
    /// department 为 "all"（不区分大小写）时同时忽略专业和学期过滤，
    /// 否则无法识别的学期返回错误
    pub fn into_query(self) -> Result<StudentListQuery, String> {
        let show_all = self.department.as_deref().is_some_and(is_show_all);
        let (branch, semester) = if show_all {
            (None, None)
        } else {
            let semester = match self.sem.as_deref().map(str::trim) {
                Some(s) if !s.is_empty() => Some(
                    normalize_semester(s).ok_or_else(|| format!("Invalid semester: {s}"))?,
                ),
                _ => None,
            };
            (
                self.department
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_uppercase),
                semester,
            )
        };

        Ok(StudentListQuery {
            page: self.pagination.page(),
            limit: self.pagination.limit(),
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            branch,
            semester,
        })
    }
}

// 创建学生请求（仅管理员）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub roll: String,
    pub branch: String,
    /// 接受 "1" 或 "sem1"
    pub semester: String,
    pub section: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(department: Option<&str>, sem: Option<&str>) -> StudentListParams {
        StudentListParams {
            department: department.map(str::to_string),
            sem: sem.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_department_all_disables_both_filters() {
        for dept in ["all", "ALL", "All"] {
            let query = params(Some(dept), Some("sem3")).into_query().unwrap();
            assert_eq!(query.branch, None);
            assert_eq!(query.semester, None);
        }
    }

    #[test]
    fn test_department_and_sem_are_normalized() {
        let query = params(Some("cse"), Some("3")).into_query().unwrap();
        assert_eq!(query.branch.as_deref(), Some("CSE"));
        assert_eq!(query.semester.as_deref(), Some("sem3"));
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let mut p = params(None, None);
        p.search = Some("   ".to_string());
        assert!(p.into_query().unwrap().search.is_none());
    }

    #[test]
    fn test_unknown_semester_is_rejected() {
        for sem in ["sem99", "foo", "sem0"] {
            assert!(params(Some("cse"), Some(sem)).into_query().is_err(), "{sem}");
            assert!(params(None, Some(sem)).into_query().is_err(), "{sem}");
        }
        // "all" 模式下学期参数被忽略
        assert!(params(Some("all"), Some("sem99")).into_query().is_ok());
        assert!(params(Some("cse"), Some(" ")).into_query().unwrap().semester.is_none());
    }

    #[test]
    fn test_query_string_with_flattened_pagination() {
        let p = actix_web::web::Query::<StudentListParams>::from_query(
            "page=2&limit=5&department=ece&sem=sem2&search=ra",
        )
        .unwrap();
        let query = p.into_inner().into_query().unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
        assert_eq!(query.branch.as_deref(), Some("ECE"));
        assert_eq!(query.search.as_deref(), Some("ra"));
    }
}
