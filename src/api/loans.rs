//! Loan management endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{
        loan::{CreateLoan, LoanResponse, LoanSearchQuery, UpdateLoan},
        web::WebResponse,
    },
    AppState,
};

use super::extract::{IdPath, ValidatedJson, ValidatedQuery};

/// Search loans by borrower and status
#[utoipa::path(
    get,
    path = "/api/loans/search",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(LoanSearchQuery),
    responses(
        (status = 200, description = "One page of matching loans, newest first", body = Vec<LoanResponse>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn search_loans(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LoanSearchQuery>,
) -> AppResult<Json<WebResponse<Vec<LoanResponse>>>> {
    let page = state.services.loans.search(&query).await?;
    Ok(Json(WebResponse::page(page)))
}

/// Lend a book to a student
#[utoipa::path(
    post,
    path = "/api/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanResponse),
        (status = 400, description = "Out of stock, pending loan or invalid body"),
        (status = 404, description = "Student or book not found")
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    ValidatedJson(loan): ValidatedJson<CreateLoan>,
) -> AppResult<(StatusCode, Json<WebResponse<LoanResponse>>)> {
    let created = state.services.loans.create(&loan).await?;
    Ok((StatusCode::CREATED, Json(WebResponse::data(created))))
}

#[utoipa::path(
    get,
    path = "/api/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All loans, newest first", body = Vec<LoanResponse>)
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
) -> AppResult<Json<WebResponse<Vec<LoanResponse>>>> {
    let loans = state.services.loans.list().await?;
    Ok(Json(WebResponse::data(loans)))
}

#[utoipa::path(
    get,
    path = "/api/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan details", body = LoanResponse),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<WebResponse<LoanResponse>>> {
    let loan = state.services.loans.get(id).await?;
    Ok(Json(WebResponse::data(loan)))
}

/// Change a loan's status (return a book)
#[utoipa::path(
    patch,
    path = "/api/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Loan ID")),
    request_body = UpdateLoan,
    responses(
        (status = 200, description = "Loan updated", body = LoanResponse),
        (status = 400, description = "Invalid status transition"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_loan(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(update): ValidatedJson<UpdateLoan>,
) -> AppResult<Json<WebResponse<LoanResponse>>> {
    let loan = state.services.loans.update(id, update.status).await?;
    Ok(Json(WebResponse::data(loan)))
}

/// Delete a loan, giving back its copy if still out
#[utoipa::path(
    delete,
    path = "/api/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan deleted", body = bool),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<WebResponse<bool>>> {
    state.services.loans.remove(id).await?;
    Ok(Json(WebResponse::data(true)))
}
