use super::entities::{MarksBatchKey, MarksEntry, MarksSubmission};
use crate::models::common::deserialize::{
    option_string_or_bool, option_string_or_i64, option_vec_string_or_i64,
};
use crate::utils::semester::normalize_semester;
use serde::Deserialize;
use ts_rs::TS;

/// 单个学生的成绩条目（原始请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct MarksEntryPayload {
    #[serde(default, deserialize_with = "option_string_or_i64")]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub marks: Option<f64>,
    #[serde(default, deserialize_with = "option_string_or_bool")]
    #[ts(type = "boolean | null")]
    pub is_updated: Option<bool>,
}

/// 成绩提交请求
///
/// 所有字段都是可选的，缺失由 [`SubmitMarksRequest::validate`] 统一报告为无效请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SubmitMarksRequest {
    #[serde(default, deserialize_with = "option_string_or_i64")]
    #[ts(type = "number | null")]
    pub exam: Option<i64>,
    pub sem: Option<String>,
    pub subject_name: Option<String>,
    pub batch_code: Option<String>,
    pub entries: Option<Vec<MarksEntryPayload>>,
    /// 显式列出已修改的学生 ID
    #[serde(default, deserialize_with = "option_vec_string_or_i64")]
    #[ts(type = "Array<number> | null")]
    pub changed: Option<Vec<i64>>,
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(format!("Missing required field: {field}")),
    }
}

impl SubmitMarksRequest {
    pub fn validate(self) -> Result<MarksSubmission, String> {
        let exam_id = match self.exam {
            Some(id) if id > 0 => id,
            _ => return Err("Missing required field: exam".to_string()),
        };
        let sem = required_text(self.sem.as_deref(), "sem")?;
        let sem = normalize_semester(&sem).unwrap_or(sem);
        let subject = required_text(self.subject_name.as_deref(), "subjectName")?;
        let batch_code = required_text(self.batch_code.as_deref(), "batchCode")?;

        let entries = match self.entries {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Err("entries must not be empty".to_string()),
        };
        let changed = self.changed.unwrap_or_default();

        let entries = entries
            .into_iter()
            .map(|entry| {
                let student_id = entry
                    .student_id
                    .filter(|id| *id > 0)
                    .ok_or_else(|| "Every entry needs a studentId".to_string())?;
                let marks = entry.marks.unwrap_or(0.0);
                if !marks.is_finite() {
                    return Err(format!("Invalid marks for student {student_id}"));
                }
                Ok(MarksEntry {
                    student_id,
                    marks,
                    selected: entry.is_updated.unwrap_or(false) || changed.contains(&student_id),
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(MarksSubmission {
            batch: MarksBatchKey {
                exam_id,
                sem,
                batch_code,
            },
            subject,
            entries,
        })
    }
}

/// 成绩列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListParams {
    #[serde(default, deserialize_with = "option_string_or_i64")]
    #[ts(type = "number | null")]
    pub exam: Option<i64>,
    pub sem: Option<String>,
    pub batch_code: Option<String>,
    pub subject: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct ResultListQuery {
    pub batch: MarksBatchKey,
    pub subject: Option<String>,
}

impl ResultListParams {
    pub fn into_query(self) -> Result<ResultListQuery, String> {
        let exam_id = match self.exam {
            Some(id) if id > 0 => id,
            _ => return Err("Missing required field: exam".to_string()),
        };
        let sem = required_text(self.sem.as_deref(), "sem")?;
        let sem = normalize_semester(&sem).unwrap_or(sem);
        let batch_code = required_text(self.batch_code.as_deref(), "batchCode")?;

        Ok(ResultListQuery {
            batch: MarksBatchKey {
                exam_id,
                sem,
                batch_code,
            },
            subject: self
                .subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SubmitMarksRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "exam": 1,
            "sem": "sem1",
            "subjectName": "Maths",
            "batchCode": "CSE24",
            "entries": [{"studentId": 1, "marks": 80, "isUpdated": false}]
        })
    }

    #[test]
    fn test_valid_payload() {
        let submission = parse(valid_body()).validate().unwrap();
        assert_eq!(submission.batch.exam_id, 1);
        assert_eq!(submission.batch.sem, "sem1");
        assert_eq!(submission.subject, "Maths");
        assert_eq!(
            submission.entries,
            vec![MarksEntry {
                student_id: 1,
                marks: 80.0,
                selected: false
            }]
        );
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        for field in ["exam", "sem", "subjectName", "batchCode"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            assert!(parse(body).validate().is_err(), "missing {field}");

            let mut body = valid_body();
            body[field] = serde_json::Value::Null;
            assert!(parse(body).validate().is_err(), "null {field}");
        }

        let mut body = valid_body();
        body["subjectName"] = json!("  ");
        assert!(parse(body).validate().is_err());

        let mut body = valid_body();
        body["exam"] = json!(0);
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn test_empty_or_missing_entries_are_rejected() {
        let mut body = valid_body();
        body["entries"] = json!([]);
        assert!(parse(body).validate().is_err());

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("entries");
        assert!(parse(body).validate().is_err());

        let mut body = valid_body();
        body["entries"] = json!([{"marks": 10}]);
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn test_absent_marks_default_to_zero_and_selection() {
        let mut body = valid_body();
        body["entries"] = json!([
            {"studentId": 1},
            {"studentId": "2", "marks": 40, "isUpdated": true},
            {"studentId": 3, "marks": 55}
        ]);
        body["changed"] = json!([3]);
        let submission = parse(body).validate().unwrap();

        assert_eq!(submission.entries[0].marks, 0.0);
        assert!(!submission.entries[0].selected);
        assert_eq!(submission.entries[1].student_id, 2);
        assert!(submission.entries[1].selected);
        assert!(submission.entries[2].selected);
    }

    #[test]
    fn test_changed_ids_accept_strings_like_student_ids() {
        let mut body = valid_body();
        body["entries"] = json!([{"studentId": "3", "marks": 70}]);
        body["changed"] = json!(["3"]);
        let submission = parse(body).validate().unwrap();
        assert_eq!(submission.entries[0].student_id, 3);
        assert!(submission.entries[0].selected);
    }

    #[test]
    fn test_result_list_params_require_batch_key() {
        let params = ResultListParams {
            exam: Some(3),
            sem: Some("2".to_string()),
            batch_code: Some("CSE24".to_string()),
            subject: None,
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.batch.sem, "sem2");

        assert!(ResultListParams::default().into_query().is_err());
    }
}
