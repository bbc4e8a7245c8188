use super::{SeaOrmStorage, db_error};
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::Result;
use crate::models::results::{
    entities::{ExamResult, MarksBatchKey, MarksOutcome, MarksSubmission},
    requests::ResultListQuery,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};

fn batch_filter(batch: &MarksBatchKey) -> Select<Results> {
    Results::find()
        .filter(Column::ExamId.eq(batch.exam_id))
        .filter(Column::Sem.eq(batch.sem.as_str()))
        .filter(Column::BatchCode.eq(batch.batch_code.as_str()))
}

impl SeaOrmStorage {
    /// 提交一批成绩
    ///
    /// 该批次 (exam, sem, batchCode) 尚无记录时整体插入；否则只处理被选中的条目，
    /// 分数有变化才改写，并把 is_updated 复位为 false。整个过程在同一事务内。
    pub async fn submit_marks_impl(&self, submission: MarksSubmission) -> Result<MarksOutcome> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let existing = batch_filter(&submission.batch)
            .count(&txn)
            .await
            .map_err(db_error("查询成绩失败"))?;

        let outcome = if existing == 0 {
            let created = insert_batch(&txn, &submission).await?;
            MarksOutcome::Created(created)
        } else {
            let updated = update_selected(&txn, &submission).await?;
            MarksOutcome::Updated(updated)
        };

        txn.commit().await.map_err(db_error("提交成绩事务失败"))?;

        Ok(outcome)
    }

    /// 列出一批成绩，按学生 ID 排序
    pub async fn list_results_impl(&self, query: ResultListQuery) -> Result<Vec<ExamResult>> {
        let mut select = batch_filter(&query.batch);

        if let Some(subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject));
        }

        let results = select
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(db_error("查询成绩列表失败"))?;

        Ok(results.into_iter().map(|m| m.into_result()).collect())
    }
}

async fn insert_batch<C: ConnectionTrait>(db: &C, submission: &MarksSubmission) -> Result<u64> {
    let now = chrono::Utc::now().timestamp();
    let batch = &submission.batch;

    let rows: Vec<ActiveModel> = submission
        .entries
        .iter()
        .map(|entry| ActiveModel {
            student_id: Set(entry.student_id),
            exam_id: Set(batch.exam_id),
            subject: Set(submission.subject.clone()),
            marks_obtained: Set(entry.marks),
            sem: Set(batch.sem.clone()),
            batch_code: Set(batch.batch_code.clone()),
            is_updated: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .collect();

    if rows.is_empty() {
        return Ok(0);
    }

    Results::insert_many(rows)
        .exec_without_returning(db)
        .await
        .map_err(db_error("批量创建成绩失败"))
}

async fn update_selected<C: ConnectionTrait>(db: &C, submission: &MarksSubmission) -> Result<u64> {
    let now = chrono::Utc::now().timestamp();
    let mut updated = 0;

    for entry in submission.entries.iter().filter(|e| e.selected) {
        let row = batch_filter(&submission.batch)
            .filter(Column::StudentId.eq(entry.student_id))
            .filter(Column::Subject.eq(submission.subject.as_str()))
            .one(db)
            .await
            .map_err(db_error("查询成绩失败"))?;

        // 找不到或分数未变都不写
        let Some(row) = row else { continue };
        if row.marks_obtained == entry.marks {
            continue;
        }

        let mut model = row.into_active_model();
        model.marks_obtained = Set(entry.marks);
        model.is_updated = Set(false);
        model.updated_at = Set(now);
        model.update(db).await.map_err(db_error("更新成绩失败"))?;
        updated += 1;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::results::entities::{MarksBatchKey, MarksEntry};
    use crate::models::users::entities::UserRole;
    use crate::storage::test_support::{memory_storage, seed_exam, seed_student, seed_user};

    fn submission(exam_id: i64, entries: Vec<MarksEntry>) -> MarksSubmission {
        MarksSubmission {
            batch: MarksBatchKey {
                exam_id,
                sem: "sem1".to_string(),
                batch_code: "CSE24".to_string(),
            },
            subject: "Maths".to_string(),
            entries,
        }
    }

    fn entry(student_id: i64, marks: f64, selected: bool) -> MarksEntry {
        MarksEntry {
            student_id,
            marks,
            selected,
        }
    }

    struct Fixture {
        storage: SeaOrmStorage,
        exam_id: i64,
        s1: i64,
        s2: i64,
    }

    async fn fixture() -> Fixture {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "prof_rao", UserRole::Teacher).await;
        let exam = seed_exam(&storage, teacher.id, "CSE24").await;
        let s1 = seed_student(&storage, "Anita Rao", "21CSE001", "CSE", "sem1").await;
        let s2 = seed_student(&storage, "Ravi Kumar", "21CSE002", "CSE", "sem1").await;
        Fixture {
            storage,
            exam_id: exam.id,
            s1: s1.id,
            s2: s2.id,
        }
    }

    async fn stored(f: &Fixture) -> Vec<crate::entity::results::Model> {
        Results::find()
            .order_by_asc(Column::StudentId)
            .all(&f.storage.db)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_submission_creates_rows() {
        let f = fixture().await;
        let outcome = f
            .storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s1, 80.0, false)]))
            .await
            .unwrap();
        assert_eq!(outcome, MarksOutcome::Created(1));

        let rows = stored(&f).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_id, f.s1);
        assert_eq!(rows[0].marks_obtained, 80.0);
        assert!(!rows[0].is_updated);
    }

    #[tokio::test]
    async fn test_first_submission_ignores_selection() {
        let f = fixture().await;
        let outcome = f
            .storage
            .submit_marks_impl(submission(
                f.exam_id,
                vec![entry(f.s1, 0.0, true), entry(f.s2, 41.5, false)],
            ))
            .await
            .unwrap();
        assert_eq!(outcome, MarksOutcome::Created(2));

        let rows = stored(&f).await;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_updated));
        assert_eq!(rows[0].marks_obtained, 0.0);
    }

    #[tokio::test]
    async fn test_resubmission_updates_selected_changed_marks() {
        let f = fixture().await;
        f.storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s1, 80.0, false)]))
            .await
            .unwrap();

        let outcome = f
            .storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s1, 95.0, true)]))
            .await
            .unwrap();
        assert_eq!(outcome, MarksOutcome::Updated(1));

        let rows = stored(&f).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].marks_obtained, 95.0);
        assert!(!rows[0].is_updated);
    }

    #[tokio::test]
    async fn test_resubmission_skips_unselected_entries() {
        let f = fixture().await;
        f.storage
            .submit_marks_impl(submission(
                f.exam_id,
                vec![entry(f.s1, 80.0, false), entry(f.s2, 60.0, false)],
            ))
            .await
            .unwrap();

        let outcome = f
            .storage
            .submit_marks_impl(submission(
                f.exam_id,
                vec![entry(f.s1, 10.0, false), entry(f.s2, 70.0, true)],
            ))
            .await
            .unwrap();
        assert_eq!(outcome, MarksOutcome::Updated(1));

        let rows = stored(&f).await;
        assert_eq!(rows[0].marks_obtained, 80.0);
        assert_eq!(rows[1].marks_obtained, 70.0);
    }

    #[tokio::test]
    async fn test_unchanged_marks_leave_row_untouched() {
        let f = fixture().await;
        f.storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s1, 80.0, false)]))
            .await
            .unwrap();

        // 手动把存储的 is_updated 置为 true，确认相同分数不会复位它
        let row = stored(&f).await.remove(0);
        let mut model = row.clone().into_active_model();
        model.is_updated = Set(true);
        model.update(&f.storage.db).await.unwrap();

        let outcome = f
            .storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s1, 80.0, true)]))
            .await
            .unwrap();
        assert_eq!(outcome, MarksOutcome::Updated(0));

        let after = stored(&f).await.remove(0);
        assert!(after.is_updated);
        assert_eq!(after.updated_at, row.updated_at);
    }

    #[tokio::test]
    async fn test_selected_entry_without_row_is_noop() {
        let f = fixture().await;
        f.storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s1, 80.0, false)]))
            .await
            .unwrap();

        let outcome = f
            .storage
            .submit_marks_impl(submission(f.exam_id, vec![entry(f.s2, 50.0, true)]))
            .await
            .unwrap();
        assert_eq!(outcome, MarksOutcome::Updated(0));
        assert_eq!(stored(&f).await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_batch_insert_rolls_back() {
        let f = fixture().await;
        // 未知学生触发外键错误，整批不落库
        let result = f
            .storage
            .submit_marks_impl(submission(
                f.exam_id,
                vec![entry(f.s1, 80.0, false), entry(9999, 50.0, false)],
            ))
            .await;
        assert!(result.is_err());
        assert!(stored(&f).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_results_ordered_by_student() {
        let f = fixture().await;
        f.storage
            .submit_marks_impl(submission(
                f.exam_id,
                vec![entry(f.s2, 60.0, false), entry(f.s1, 80.0, false)],
            ))
            .await
            .unwrap();

        let results = f
            .storage
            .list_results_impl(ResultListQuery {
                batch: submission(f.exam_id, vec![]).batch,
                subject: Some("Maths".to_string()),
            })
            .await
            .unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![f.s1, f.s2]);

        let other_subject = f
            .storage
            .list_results_impl(ResultListQuery {
                batch: submission(f.exam_id, vec![]).batch,
                subject: Some("Physics".to_string()),
            })
            .await
            .unwrap();
        assert!(other_subject.is_empty());
    }
}
