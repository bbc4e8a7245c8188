use super::{SeaOrmStorage, db_error};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::entity::users::Entity as Users;
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    exams::{
        entities::{Exam, ExamDetail},
        requests::{CreateExamRequest, ExamListQuery, UpdateExamRequest},
        responses::ExamListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

const DEFAULT_MAX_MARKS: f64 = 100.0;

impl SeaOrmStorage {
    /// 创建考试
    pub async fn create_exam_impl(&self, paper_setter: i64, req: CreateExamRequest) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            subject_name: Set(req.subject_name),
            subject_code: Set(req.subject_code),
            sem: Set(req.sem),
            batch_code: Set(req.batch_code),
            max_marks: Set(req.max_marks.unwrap_or(DEFAULT_MAX_MARKS)),
            exam_date: Set(req.exam_date.map(|d| d.timestamp())),
            description: Set(req.description),
            paper_setter: Set(paper_setter),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建考试失败"))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询考试失败"))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 考试详情，附带出卷人
    pub async fn get_exam_detail_impl(&self, id: i64) -> Result<Option<ExamDetail>> {
        let result = Exams::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(db_error("查询考试详情失败"))?;

        Ok(result.map(|(exam, setter)| ExamDetail {
            exam: exam.into_exam(),
            setter: setter.map(|u| u.into_paper_setter()),
        }))
    }

    /// 分页列出考试，最新创建的在前
    pub async fn list_exams_with_pagination_impl(
        &self,
        query: ExamListQuery,
    ) -> Result<ExamListResponse> {
        let page = query.page.max(1);
        let size = query.limit.clamp(1, 100);

        let mut select = Exams::find();

        if let Some(batch_code) = query.batch_code {
            select = select.filter(Column::BatchCode.eq(batch_code));
        }
        if let Some(sem) = query.sem {
            select = select.filter(Column::Sem.eq(sem));
        }
        if let Some(setter) = query.paper_setter {
            select = select.filter(Column::PaperSetter.eq(setter));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询考试总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_error("查询考试页数失败"))?;
        let exams = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询考试列表失败"))?;

        Ok(ExamListResponse {
            items: exams.into_iter().map(|m| m.into_exam()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 部分更新考试，考试不存在返回 None
    pub async fn update_exam_impl(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        let Some(existing) = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询考试失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(subject_name) = update.subject_name {
            model.subject_name = Set(subject_name);
        }
        if let Some(subject_code) = update.subject_code {
            model.subject_code = Set(Some(subject_code));
        }
        if let Some(sem) = update.sem {
            model.sem = Set(sem);
        }
        if let Some(batch_code) = update.batch_code {
            model.batch_code = Set(batch_code);
        }
        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(max_marks);
        }
        if let Some(exam_date) = update.exam_date {
            model.exam_date = Set(Some(exam_date.timestamp()));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model.update(&self.db).await.map_err(db_error("更新考试失败"))?;

        Ok(Some(updated.into_exam()))
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除考试失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::exams::requests::{ExamListQuery, UpdateExamRequest};
    use crate::models::users::entities::UserRole;
    use crate::storage::test_support::{memory_storage, seed_exam, seed_user};

    #[tokio::test]
    async fn test_create_and_detail_includes_setter() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let exam = seed_exam(&storage, teacher.id, "CSE24").await;

        assert_eq!(exam.max_marks, 100.0);
        assert!(exam.is_owned_by(teacher.id));

        let detail = storage.get_exam_detail_impl(exam.id).await.unwrap().unwrap();
        assert_eq!(detail.exam.id, exam.id);
        let setter = detail.setter.unwrap();
        assert_eq!(setter.id, teacher.id);
        assert_eq!(setter.username, "prof_rao");

        assert!(storage.get_exam_detail_impl(exam.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_batch_and_owner() {
        let storage = memory_storage().await;
        let a = seed_user(&storage, "prof_a", UserRole::Teacher).await;
        let b = seed_user(&storage, "prof_b", UserRole::Teacher).await;
        seed_exam(&storage, a.id, "CSE24").await;
        seed_exam(&storage, a.id, "ECE24").await;
        let latest = seed_exam(&storage, b.id, "CSE24").await;

        let all = storage
            .list_exams_with_pagination_impl(ExamListQuery {
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 3);
        assert_eq!(all.items[0].id, latest.id);

        let cse = storage
            .list_exams_with_pagination_impl(ExamListQuery {
                page: 1,
                limit: 10,
                batch_code: Some("CSE24".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cse.items.len(), 2);

        let mine = storage
            .list_exams_with_pagination_impl(ExamListQuery {
                page: 1,
                limit: 10,
                paper_setter: Some(a.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.items.len(), 2);
        assert!(mine.items.iter().all(|e| e.paper_setter == a.id));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let exam = seed_exam(&storage, teacher.id, "CSE24").await;

        let updated = storage
            .update_exam_impl(
                exam.id,
                UpdateExamRequest {
                    name: Some("Mid Term 2".to_string()),
                    max_marks: Some(50.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Mid Term 2");
        assert_eq!(updated.max_marks, 50.0);
        assert_eq!(updated.subject_name, "Maths");
        assert_eq!(updated.batch_code, "CSE24");
        assert_eq!(updated.paper_setter, teacher.id);

        let missing = storage
            .update_exam_impl(exam.id + 1, UpdateExamRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_exam() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let exam = seed_exam(&storage, teacher.id, "CSE24").await;

        assert!(storage.delete_exam_impl(exam.id).await.unwrap());
        assert!(!storage.delete_exam_impl(exam.id).await.unwrap());
        assert!(storage.get_exam_by_id_impl(exam.id).await.unwrap().is_none());
    }
}
