use std::sync::Arc;

use crate::models::{
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceBatch, AttendanceListQuery},
    },
    exams::{
        entities::{Exam, ExamDetail},
        requests::{CreateExamRequest, ExamListQuery, UpdateExamRequest},
        responses::ExamListResponse,
    },
    results::{
        entities::{ExamResult, MarksOutcome, MarksSubmission},
        requests::ResultListQuery,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[cfg(test)]
pub(crate) mod test_support;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn count_users(&self) -> Result<u64>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生（字段已规范化）
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 分页列出学生名册
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;

    /// 课程管理方法
    // 创建课程（semester 已确定）
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>>;

    /// 考试管理方法
    async fn create_exam(&self, paper_setter: i64, exam: CreateExamRequest) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    // 获取考试详情（附带出卷人信息）
    async fn get_exam_detail(&self, id: i64) -> Result<Option<ExamDetail>>;
    async fn list_exams_with_pagination(&self, query: ExamListQuery) -> Result<ExamListResponse>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    // 成绩提交：首次批量创建，之后只改写被选中且分数变化的条目（单事务）
    async fn submit_marks(&self, submission: MarksSubmission) -> Result<MarksOutcome>;
    async fn list_results(&self, query: ResultListQuery) -> Result<Vec<ExamResult>>;

    /// 出勤管理方法
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>>;
    // 按 (学生, 课程代码, 日期) 写入或覆盖出勤，返回保存条数
    async fn mark_attendance(&self, batch: AttendanceBatch) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
