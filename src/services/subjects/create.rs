use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::ErrorCode;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::services::{bad_request, conflict, server_error};
use crate::utils::semester::semester_from_code;
use crate::utils::validate::{validate_branch, validate_subject_code};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let name = subject.name.trim().to_string();
    if name.is_empty() {
        return Ok(bad_request(
            ErrorCode::InvalidPayload,
            "Missing required field: name",
        ));
    }

    let code = subject.code.trim().to_uppercase();
    if let Err(msg) = validate_subject_code(&code) {
        return Ok(bad_request(ErrorCode::SubjectCodeInvalid, msg));
    }

    let branch = subject.branch.trim().to_uppercase();
    if let Err(msg) = validate_branch(&branch) {
        return Ok(bad_request(ErrorCode::InvalidPayload, msg));
    }

    // 未显式给出学期时按旧的代码约定推断
    let semester = match subject.semester {
        Some(sem) if (1..=12).contains(&sem) => sem,
        Some(sem) => {
            return Ok(bad_request(
                ErrorCode::SemesterInvalid,
                format!("Invalid semester: {sem}"),
            ));
        }
        None => match semester_from_code(&code) {
            Some(sem) => sem,
            None => {
                return Ok(bad_request(
                    ErrorCode::SemesterInvalid,
                    "Semester is required when it cannot be derived from the code",
                ));
            }
        },
    };

    let storage = service.get_storage(request)?;
    let subject = CreateSubjectRequest {
        name,
        code,
        branch,
        semester: Some(semester),
    };

    match storage.create_subject(subject).await {
        Ok(subject) => {
            info!("Subject {} created", subject.code);
            Ok(HttpResponse::Created().json(subject))
        }
        Err(e) if e.is_unique_violation() => Ok(conflict(
            ErrorCode::SubjectAlreadyExists,
            "Subject code already exists",
        )),
        Err(e) => Ok(server_error("Failed to create subject", e)),
    }
}
