use super::{SeaOrmStorage, db_error};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, StudentListQuery},
    responses::StudentListResponse,
};
use crate::utils::sql::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            roll: Set(req.roll),
            branch: Set(req.branch),
            semester: Set(req.semester),
            section: Set(req.section),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建学生失败"))?;

        Ok(result.into_student())
    }

    /// 分页列出学生名册
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.max(1);
        let size = query.limit.clamp(1, 100);

        let mut select = Students::find();

        if let Some(ref search) = query.search {
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_pattern(search)))
                    .add(Column::Roll.like(contains_pattern(search))),
            );
        }

        if let Some(branch) = query.branch {
            select = select.filter(Column::Branch.eq(branch));
        }

        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        select = select.order_by_asc(Column::Roll);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询学生总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_error("查询学生页数失败"))?;
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询学生列表失败"))?;

        Ok(StudentListResponse {
            students: students.into_iter().map(|m| m.into_student()).collect(),
            page: page as i64,
            total: total as i64,
            total_pages: pages as i64,
        })
    }
}
