//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub subject_name: String,
    pub subject_code: Option<String>,
    pub sem: String,
    pub batch_code: String,
    pub max_marks: f64,
    pub exam_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub paper_setter: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PaperSetter",
        to = "super::users::Column::Id"
    )]
    PaperSetter,
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaperSetter.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        crate::models::exams::entities::Exam {
            id: self.id,
            name: self.name,
            subject_name: self.subject_name,
            subject_code: self.subject_code,
            sem: self.sem,
            batch_code: self.batch_code,
            max_marks: self.max_marks,
            exam_date: self.exam_date.map(super::ts),
            description: self.description,
            paper_setter: self.paper_setter,
            created_at: super::ts(self.created_at),
            updated_at: super::ts(self.updated_at),
        }
    }
}
