pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{CreateExamRequest, ExamListParams};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        actor: &User,
        params: ExamListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, actor, params).await
    }

    // 创建考试，出卷人为当前用户
    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        actor: &User,
        exam: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, actor, exam).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        detail::get_exam(self, request, exam_id).await
    }

    // 仅出卷人可修改，body 为原始 JSON
    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        actor: &User,
        exam_id: i64,
        body: &[u8],
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, actor, exam_id, body).await
    }

    // 仅出卷人可删除
    pub async fn delete_exam(
        &self,
        request: &HttpRequest,
        actor: &User,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, actor, exam_id).await
    }
}

/// 测试用：内存存储 + 出卷人 + 一场考试
#[cfg(test)]
pub(crate) mod fixture {
    use crate::models::exams::entities::Exam;
    use crate::models::users::entities::{User, UserRole};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::test_support::{memory_storage, seed_exam, seed_user};

    pub struct ExamFixture {
        pub storage: SeaOrmStorage,
        pub owner: User,
        pub other: User,
        pub admin: User,
        pub exam: Exam,
    }

    pub async fn exam_fixture() -> ExamFixture {
        let storage = memory_storage().await;
        let owner = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let other = seed_user(&storage, "prof_iyer", UserRole::Teacher).await;
        let admin = seed_user(&storage, "root", UserRole::Admin).await;
        let exam = seed_exam(&storage, owner.id, "CSE24").await;
        ExamFixture {
            storage,
            owner,
            other,
            admin,
            exam,
        }
    }
}
