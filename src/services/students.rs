//! Student directory service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        student::{CreateStudent, StudentResponse, StudentSearchQuery},
        web::{Page, PageRequest},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<StudentResponse> {
        self.repository.students.get_by_id(id).await.map(Into::into)
    }

    pub async fn list(&self) -> AppResult<Vec<StudentResponse>> {
        self.repository.students.list().await
    }

    pub async fn search(&self, query: &StudentSearchQuery) -> AppResult<Page<StudentResponse>> {
        let page = PageRequest::new(query.page, query.size);
        let (data, total) = self.repository.students.search(query, page).await?;
        Ok(Page {
            data,
            paging: page.paging(total),
        })
    }

    /// Seeder entry point; there is no HTTP route for this
    pub async fn create(&self, student: &CreateStudent) -> AppResult<StudentResponse> {
        let created = self
            .repository
            .students
            .create(&student.full_name, &student.nim)
            .await?;
        tracing::info!(nim = %created.nim, "Student created");
        Ok(created.into())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.students.count().await
    }
}
