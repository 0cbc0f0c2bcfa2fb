//! Book catalogue endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{
        book::{BookResponse, BookSearchQuery, CreateBook, UpdateBook},
        web::WebResponse,
    },
    AppState,
};

use super::extract::{IdPath, ValidatedJson, ValidatedQuery};

/// Search books by id and title
#[utoipa::path(
    get,
    path = "/api/books/search",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookSearchQuery),
    responses(
        (status = 200, description = "One page of matching books", body = Vec<BookResponse>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BookSearchQuery>,
) -> AppResult<Json<WebResponse<Vec<BookResponse>>>> {
    let page = state.services.books.search(&query).await?;
    Ok(Json(WebResponse::page(page)))
}

/// Add a book to the catalogue
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid request body"),
        (status = 409, description = "Book title already exists")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(book): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<WebResponse<BookResponse>>)> {
    let created = state.services.books.create(&book).await?;
    Ok((StatusCode::CREATED, Json(WebResponse::data(created))))
}

/// List all books by title
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<BookResponse>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
) -> AppResult<Json<WebResponse<Vec<BookResponse>>>> {
    let books = state.services.books.list().await?;
    Ok(Json(WebResponse::data(books)))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<WebResponse<BookResponse>>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(WebResponse::data(book)))
}

/// Change the title and/or stock of a book
#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book title already exists")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(update): ValidatedJson<UpdateBook>,
) -> AppResult<Json<WebResponse<BookResponse>>> {
    let book = state.services.books.update(id, &update).await?;
    Ok(Json(WebResponse::data(book)))
}

/// Delete a book that has no loans
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = uuid::Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = bool),
        (status = 400, description = "Book has active loans"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<WebResponse<bool>>> {
    state.services.books.remove(id).await?;
    Ok(Json(WebResponse::data(true)))
}
