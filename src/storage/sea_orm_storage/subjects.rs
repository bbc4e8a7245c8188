use super::{SeaOrmStorage, db_error};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{CampusError, Result};
use crate::models::subjects::{
    entities::Subject,
    requests::{CreateSubjectRequest, SubjectListQuery},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let semester = req
            .semester
            .ok_or_else(|| CampusError::validation("课程学期未确定"))?;

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            branch: Set(req.branch),
            semester: Set(semester),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建课程失败"))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询课程失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 按专业、学期列出课程
    pub async fn list_subjects_impl(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        let mut select = Subjects::find();

        if let Some(branch) = query.branch {
            select = select.filter(Column::Branch.eq(branch));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        let subjects = select
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(db_error("查询课程列表失败"))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }
}
