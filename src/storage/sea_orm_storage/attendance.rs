use super::{SeaOrmStorage, db_error};
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{CampusError, Result};
use crate::models::attendance::{
    entities::AttendanceRecord,
    requests::{AttendanceBatch, AttendanceListQuery},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 查询出勤记录
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(code) = query.subject_code {
            select = select.filter(Column::SubjectCode.eq(code));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }

        let records = select
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(db_error("查询出勤记录失败"))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// 写入一批出勤，已有 (学生, 课程代码, 日期) 的记录被覆盖
    pub async fn mark_attendance_impl(&self, batch: AttendanceBatch) -> Result<u64> {
        if batch.records.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let ids: Vec<i64> = batch.records.iter().map(|r| r.student_id).collect();
        let known = Students::find()
            .filter(StudentColumn::Id.is_in(ids.clone()))
            .count(&txn)
            .await
            .map_err(db_error("查询学生失败"))?;
        if known != ids.len() as u64 {
            return Err(CampusError::validation("出勤记录包含不存在的学生"));
        }

        let now = chrono::Utc::now().timestamp();
        let rows: Vec<ActiveModel> = batch
            .records
            .iter()
            .map(|mark| ActiveModel {
                student_id: Set(mark.student_id),
                is_present: Set(mark.is_present),
                subject_name: Set(batch.subject_name.clone()),
                subject_code: Set(batch.subject_code.clone()),
                professor: Set(batch.professor.clone()),
                date: Set(batch.date.clone()),
                semester: Set(batch.semester),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();

        let on_conflict = OnConflict::columns([Column::StudentId, Column::SubjectCode, Column::Date])
            .update_columns([
                Column::IsPresent,
                Column::SubjectName,
                Column::Professor,
                Column::Semester,
                Column::UpdatedAt,
            ])
            .to_owned();

        Attendance::insert_many(rows)
            .on_conflict(on_conflict)
            .exec_without_returning(&txn)
            .await
            .map_err(db_error("保存出勤记录失败"))?;

        txn.commit().await.map_err(db_error("提交出勤事务失败"))?;

        Ok(ids.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::attendance::requests::{
        AttendanceBatch, AttendanceListQuery, AttendanceMark,
    };
    use crate::storage::test_support::{memory_storage, seed_student};

    fn batch(date: &str, records: Vec<(i64, bool)>) -> AttendanceBatch {
        AttendanceBatch {
            subject_code: "CSE301".to_string(),
            subject_name: "Operating Systems".to_string(),
            semester: 3,
            date: date.to_string(),
            professor: "Dr. Rao".to_string(),
            records: records
                .into_iter()
                .map(|(student_id, is_present)| AttendanceMark {
                    student_id,
                    is_present,
                })
                .collect(),
        }
    }

    fn by_subject_and_date(date: &str) -> AttendanceListQuery {
        AttendanceListQuery {
            subject_code: Some("CSE301".to_string()),
            semester: Some(3),
            date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn test_mark_then_overwrite_same_day() {
        let storage = memory_storage().await;
        let s1 = seed_student(&storage, "Anita Rao", "21CSE001", "CSE", "sem3").await;
        let s2 = seed_student(&storage, "Ravi Kumar", "21CSE002", "CSE", "sem3").await;

        let saved = storage
            .mark_attendance_impl(batch("2025-03-14", vec![(s1.id, true), (s2.id, true)]))
            .await
            .unwrap();
        assert_eq!(saved, 2);

        storage
            .mark_attendance_impl(batch("2025-03-14", vec![(s2.id, false)]))
            .await
            .unwrap();

        let records = storage
            .list_attendance_impl(by_subject_and_date("2025-03-14"))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_present);
        assert_eq!(records[1].student_id, s2.id);
        assert!(!records[1].is_present);
    }

    #[tokio::test]
    async fn test_days_are_kept_apart() {
        let storage = memory_storage().await;
        let s1 = seed_student(&storage, "Anita Rao", "21CSE001", "CSE", "sem3").await;

        storage
            .mark_attendance_impl(batch("2025-03-14", vec![(s1.id, true)]))
            .await
            .unwrap();
        storage
            .mark_attendance_impl(batch("2025-03-15", vec![(s1.id, false)]))
            .await
            .unwrap();

        let all = storage
            .list_attendance_impl(AttendanceListQuery {
                subject_code: Some("CSE301".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].date, "2025-03-14");

        let other_subject = storage
            .list_attendance_impl(AttendanceListQuery {
                subject_code: Some("ECE301".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(other_subject.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_student_rejects_whole_batch() {
        let storage = memory_storage().await;
        let s1 = seed_student(&storage, "Anita Rao", "21CSE001", "CSE", "sem3").await;

        let err = storage
            .mark_attendance_impl(batch("2025-03-14", vec![(s1.id, true), (404, true)]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let records = storage
            .list_attendance_impl(by_subject_and_date("2025-03-14"))
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
