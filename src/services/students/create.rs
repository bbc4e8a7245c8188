use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::ErrorCode;
use crate::models::students::requests::CreateStudentRequest;
use crate::services::{bad_request, conflict, server_error};
use crate::utils::semester::normalize_semester;
use crate::utils::validate::{validate_branch, validate_roll};

/// 校验并规范化：学号格式、专业大写、学期写成 semN
fn normalize(student: CreateStudentRequest) -> Result<CreateStudentRequest, (ErrorCode, String)> {
    let name = student.name.trim().to_string();
    if name.is_empty() {
        return Err((
            ErrorCode::InvalidPayload,
            "Missing required field: name".to_string(),
        ));
    }

    let roll = student.roll.trim().to_uppercase();
    validate_roll(&roll).map_err(|msg| (ErrorCode::StudentRollInvalid, msg.to_string()))?;

    let branch = student.branch.trim().to_uppercase();
    validate_branch(&branch).map_err(|msg| (ErrorCode::InvalidPayload, msg.to_string()))?;

    let semester = normalize_semester(&student.semester).ok_or_else(|| {
        (
            ErrorCode::SemesterInvalid,
            format!("Invalid semester: {}", student.semester),
        )
    })?;

    Ok(CreateStudentRequest {
        name,
        roll,
        branch,
        semester,
        section: student
            .section
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty()),
    })
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let student = match normalize(student) {
        Ok(student) => student,
        Err((code, msg)) => return Ok(bad_request(code, msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.create_student(student).await {
        Ok(student) => {
            info!("Student {} created", student.roll);
            Ok(HttpResponse::Created().json(student))
        }
        Err(e) if e.is_unique_violation() => Ok(conflict(
            ErrorCode::StudentAlreadyExists,
            "Roll number already exists",
        )),
        Err(e) => Ok(server_error("Failed to create student", e)),
    }
}
