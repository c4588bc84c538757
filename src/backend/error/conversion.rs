//! Error Conversion
//!
//! Backend errors render as JSON:
//! ```json
//! { "message": "Chat not found", "status": 404 }
//! ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Server] {} ({})", self, status);
        } else {
            tracing::debug!("[Server] Request rejected: {} ({})", message, status);
        }

        let body = serde_json::json!({
            "message": message,
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
