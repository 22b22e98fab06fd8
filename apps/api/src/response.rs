//! Success envelope.
//!
//! ```json
//! { "success": true, "message": "Gyms retrieved", "data": [...], "pagination": {...} }
//! ```

use roster_core::{PaginatedResult, Pagination};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data,
            pagination: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paged(message: impl Into<String>, page: PaginatedResult<T>) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data: page.data,
            pagination: Some(page.pagination),
        }
    }
}
