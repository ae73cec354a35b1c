pub mod available;
pub mod enroll;
pub mod overview;
pub mod unenroll;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from_request(self.storage.as_ref(), request)
    }

    pub async fn get_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::get_overview(self, request).await
    }

    pub async fn list_available(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        available::list_available(self, request).await
    }

    pub async fn enroll(&self, request: &HttpRequest, subject_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, subject_id).await
    }

    pub async fn unenroll(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        unenroll::unenroll(self, request, subject_id).await
    }
}
