//! Password login.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use roster_core::User;
use roster_service::rules::authenticate;
use roster_service::ServiceError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::REQUEST_ID_HEADER;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub org_id: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

/// Exchanges organization + email + password for an access token.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let debug = state.config.is_development();
    let fail = |err: ServiceError| ApiError::from_service(err, debug).with_request_id(&request_id);

    let org_active = state
        .db
        .organizations()
        .is_active(&req.org_id)
        .await
        .map_err(|e| fail(e.into()))?;
    if !org_active {
        warn!(org_id = %req.org_id, "Login against unknown or inactive organization");
        return Err(fail(ServiceError::Unauthorized("Invalid credentials".to_string())));
    }

    let user = authenticate(&state.db.unit_of_work(), &req.org_id, &req.email, &req.password)
        .await
        .map_err(fail)?;

    let access_token = state
        .jwt
        .generate_access_token(&user.base.uid, &user.base.org_id)
        .map_err(|e| e.with_request_id(&request_id))?;

    info!(user_id = %user.base.uid, org_id = %user.base.org_id, "Token issued");

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            access_token,
            token_type: "Bearer",
            expires_in: state.jwt.access_lifetime_secs(),
            user,
        },
    )))
}
