//! Book catalogue service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{BookResponse, BookSearchQuery, CreateBook, UpdateBook},
        web::{Page, PageRequest},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, book: &CreateBook) -> AppResult<BookResponse> {
        let created = self.repository.books.create(book).await?;
        tracing::info!(book_id = %created.id, title = %created.title, stock = created.stock, "Book created");
        Ok(created.into())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookResponse> {
        self.repository.books.get_by_id(id).await.map(Into::into)
    }

    pub async fn update(&self, id: Uuid, update: &UpdateBook) -> AppResult<BookResponse> {
        let updated = self.repository.books.update(id, update).await?;
        tracing::info!(book_id = %updated.id, stock = updated.stock, "Book updated");
        Ok(updated.into())
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<BookResponse>> {
        let books = self.repository.books.list().await?;
        Ok(books.into_iter().map(Into::into).collect())
    }

    pub async fn search(&self, query: &BookSearchQuery) -> AppResult<Page<BookResponse>> {
        let page = PageRequest::new(query.page, query.size);
        let (books, total) = self.repository.books.search(query, page).await?;
        Ok(Page {
            data: books.into_iter().map(Into::into).collect(),
            paging: page.paging(total),
        })
    }
}
