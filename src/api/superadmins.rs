//! Superadmin authentication endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        superadmin::{LoginSuperadmin, RegisterSuperadmin, SuperadminResponse},
        web::WebResponse,
    },
    AppState,
};

use super::extract::{CurrentSuperadmin, ValidatedJson};

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/superadmins/login",
    tag = "superadmins",
    request_body = LoginSuperadmin,
    responses(
        (status = 200, description = "Login successful, token issued", body = SuperadminResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginSuperadmin>,
) -> AppResult<Json<WebResponse<SuperadminResponse>>> {
    let admin = state.services.superadmins.login(request).await?;
    Ok(Json(WebResponse::data(admin)))
}

/// Register a new staff account
#[utoipa::path(
    post,
    path = "/api/superadmins",
    tag = "superadmins",
    security(("bearer_auth" = [])),
    request_body = RegisterSuperadmin,
    responses(
        (status = 200, description = "Account created", body = SuperadminResponse),
        (status = 400, description = "Invalid request body"),
        (status = 403, description = "Insufficient permissions"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterSuperadmin>,
) -> AppResult<Json<WebResponse<SuperadminResponse>>> {
    let admin = state.services.superadmins.register(request).await?;
    Ok(Json(WebResponse::data(admin)))
}

/// Log out. Tokens are not revoked and stay valid until they expire.
#[utoipa::path(
    delete,
    path = "/api/superadmins/current",
    tag = "superadmins",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = bool),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(CurrentSuperadmin(admin): CurrentSuperadmin) -> Json<WebResponse<bool>> {
    tracing::info!(username = %admin.username, "Superadmin logged out");
    Json(WebResponse::data(true))
}
