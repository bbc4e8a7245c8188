use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::AttendanceService;
use crate::models::ErrorCode;
use crate::models::attendance::{
    entities::AttendanceStatus,
    requests::{AttendanceListQuery, AttendanceSheetParams},
    responses::{AttendanceSheetResponse, RosterEntry},
};
use crate::models::students::requests::StudentListParams;
use crate::services::{bad_request, not_found, server_error};
use crate::utils::validate::{parse_attendance_date, today};

/// 出勤表：课程 + 名册一页 + 当天出勤记录的交叉结果
pub async fn attendance_sheet(
    service: &AttendanceService,
    request: &HttpRequest,
    params: AttendanceSheetParams,
) -> ActixResult<HttpResponse> {
    let Some(subject_id) = params.subject_id.filter(|id| *id > 0) else {
        return Ok(bad_request(
            ErrorCode::InvalidPayload,
            "Missing required field: subjectId",
        ));
    };

    let date = match params.date.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => match parse_attendance_date(d) {
            Ok(date) => date,
            Err(msg) => return Ok(bad_request(ErrorCode::InvalidDate, msg)),
        },
        _ => today(),
    };

    let roster_params = StudentListParams {
        pagination: params.pagination,
        search: params.search,
        department: params.department,
        sem: params.sem,
    };
    let roster_query = match roster_params.into_query() {
        Ok(query) => query,
        Err(msg) => return Ok(bad_request(ErrorCode::InvalidPayload, msg)),
    };

    let storage = service.get_storage(request)?;

    let subject = match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(server_error("Failed to load subject", e)),
    };

    let roster = match storage.list_students_with_pagination(roster_query).await {
        Ok(roster) => roster,
        Err(e) => return Ok(server_error("Failed to load roster", e)),
    };

    let records = match storage
        .list_attendance(AttendanceListQuery {
            subject_code: Some(subject.code.clone()),
            semester: Some(subject.semester),
            date: Some(date.clone()),
        })
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(server_error("Failed to load attendance", e)),
    };

    let by_student: HashMap<i64, _> = records.iter().map(|r| (r.student_id, r)).collect();
    let students: Vec<RosterEntry> = roster
        .students
        .into_iter()
        .map(|student| {
            let status = AttendanceStatus::of(by_student.get(&student.id).copied());
            RosterEntry { student, status }
        })
        .collect();

    Ok(HttpResponse::Ok().json(AttendanceSheetResponse {
        subject,
        date,
        students,
        page: roster.page,
        total: roster.total,
        total_pages: roster.total_pages,
        recorded: records.len() as i64,
    }))
}
