use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::ErrorCode;
use crate::models::exams::requests::CreateExamRequest;
use crate::models::users::entities::User;
use crate::services::{bad_request, server_error};
use crate::utils::semester::normalize_semester;

/// 校验并规范化创建请求
fn normalize(mut exam: CreateExamRequest) -> Result<CreateExamRequest, String> {
    exam.name = exam.name.trim().to_string();
    exam.subject_name = exam.subject_name.trim().to_string();
    exam.batch_code = exam.batch_code.trim().to_string();

    for (field, value) in [
        ("name", &exam.name),
        ("subjectName", &exam.subject_name),
        ("batchCode", &exam.batch_code),
    ] {
        if value.is_empty() {
            return Err(format!("Missing required field: {field}"));
        }
    }

    exam.sem = normalize_semester(&exam.sem)
        .ok_or_else(|| format!("Invalid semester: {}", exam.sem))?;

    if let Some(max) = exam.max_marks
        && (!max.is_finite() || max < 0.0)
    {
        return Err("maxMarks must be a non-negative number".to_string());
    }

    exam.subject_code = exam
        .subject_code
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty());

    Ok(exam)
}

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    actor: &User,
    exam: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let exam = match normalize(exam) {
        Ok(exam) => exam,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.create_exam(actor.id, exam).await {
        Ok(exam) => {
            info!("Exam {} created by user {}", exam.id, actor.id);
            Ok(HttpResponse::Created().json(exam))
        }
        Err(e) => Ok(server_error("Failed to create exam", e)),
    }
}
