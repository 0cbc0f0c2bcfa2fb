//! Student directory endpoints (read only)

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        student::{StudentResponse, StudentSearchQuery},
        web::WebResponse,
    },
    AppState,
};

use super::extract::{IdPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/students/search",
    tag = "students",
    security(("bearer_auth" = [])),
    params(StudentSearchQuery),
    responses(
        (status = 200, description = "One page of matching students", body = Vec<StudentResponse>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn search_students(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<StudentSearchQuery>,
) -> AppResult<Json<WebResponse<Vec<StudentResponse>>>> {
    let page = state.services.students.search(&query).await?;
    Ok(Json(WebResponse::page(page)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All students by name", body = Vec<StudentResponse>)
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> AppResult<Json<WebResponse<Vec<StudentResponse>>>> {
    let students = state.services.students.list().await?;
    Ok(Json(WebResponse::data(students)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<WebResponse<StudentResponse>>> {
    let student = state.services.students.get(id).await?;
    Ok(Json(WebResponse::data(student)))
}
