pub mod list;
pub mod mark;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSheetParams, MarkAttendanceRequest,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        params: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, params).await
    }

    // 批量标记出勤
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        actor: &User,
        payload: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, actor, payload).await
    }

    // 课程当天的出勤表（名册 + 状态）
    pub async fn attendance_sheet(
        &self,
        request: &HttpRequest,
        params: AttendanceSheetParams,
    ) -> ActixResult<HttpResponse> {
        sheet::attendance_sheet(self, request, params).await
    }
}
