pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::{ResultListParams, SubmitMarksRequest};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 提交成绩：首次批量创建，之后按选中条目改写
    pub async fn submit_marks(
        &self,
        request: &HttpRequest,
        payload: SubmitMarksRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_marks(self, request, payload).await
    }

    pub async fn list_results(
        &self,
        request: &HttpRequest,
        params: ResultListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, request, params).await
    }
}
