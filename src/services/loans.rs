//! Loan management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        loan::{CreateLoan, LoanResponse, LoanSearchQuery, LoanStatus},
        parse_uuid,
        web::{Page, PageRequest},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend a book to a student
    pub async fn create(&self, loan: &CreateLoan) -> AppResult<LoanResponse> {
        let book_id = parse_uuid("bookId", &loan.book_id)?;
        let created = self.repository.loans.create(&loan.nim, book_id).await?;
        tracing::info!(loan_id = %created.id, nim = %created.nim, book_id = %book_id, "Loan created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, status: LoanStatus) -> AppResult<LoanResponse> {
        let updated = self.repository.loans.update_status(id, status).await?;
        tracing::info!(loan_id = %id, status = %updated.status, "Loan updated");
        Ok(updated)
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.repository.loans.delete(id).await?;
        tracing::info!(loan_id = %id, "Loan deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<LoanResponse> {
        self.repository.loans.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<LoanResponse>> {
        self.repository.loans.list().await
    }

    pub async fn search(&self, query: &LoanSearchQuery) -> AppResult<Page<LoanResponse>> {
        let page = PageRequest::new(query.page, query.size);
        let (data, total) = self.repository.loans.search(query, page).await?;
        Ok(Page {
            data,
            paging: page.paging(total),
        })
    }
}
