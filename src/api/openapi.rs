//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, students, superadmins};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Library API",
        version = "1.0.0",
        description = "Student, book and loan management REST API. Every response uses the `{data, errors, paging, message}` envelope."
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Superadmins
        superadmins::login,
        superadmins::register,
        superadmins::logout,
        // Books
        books::search_books,
        books::create_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::search_loans,
        loans::create_loan,
        loans::list_loans,
        loans::get_loan,
        loans::update_loan,
        loans::delete_loan,
        // Students
        students::search_students,
        students::list_students,
        students::get_student,
    ),
    components(
        schemas(
            crate::models::superadmin::Role,
            crate::models::superadmin::LoginSuperadmin,
            crate::models::superadmin::RegisterSuperadmin,
            crate::models::superadmin::SuperadminResponse,
            crate::models::book::BookResponse,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::loan::LoanStatus,
            crate::models::loan::LoanResponse,
            crate::models::loan::CreateLoan,
            crate::models::loan::UpdateLoan,
            crate::models::student::StudentResponse,
            crate::models::web::Paging,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "superadmins", description = "Staff authentication"),
        (name = "books", description = "Book catalogue"),
        (name = "loans", description = "Loan management"),
        (name = "students", description = "Student directory")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
