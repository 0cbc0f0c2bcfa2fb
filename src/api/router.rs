//! Route declaration table and router assembly
//!
//! Every endpoint is declared once with its verb, path, access requirement and
//! handler. The same table builds the axum router and drives the guard.

use std::sync::Arc;

use axum::{
    handler::Handler,
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter, MethodRouter},
    Json, Router,
};
use serde_json::json;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::{
        ability::{Action, Subject},
        web::WebResponse,
    },
    AppState,
};

use super::{books, guard, health, loans, openapi, students, superadmins};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
        }
    }

    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

/// What a caller needs to reach a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Requires(Action, Subject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub verb: Verb,
    pub path: &'static str,
    pub access: Access,
}

pub struct RouteDecl {
    pub rule: RouteRule,
    handler: MethodRouter<AppState>,
}

fn declare<H, T>(verb: Verb, path: &'static str, access: Access, handler: H) -> RouteDecl
where
    H: Handler<T, AppState>,
    T: 'static,
{
    RouteDecl {
        rule: RouteRule { verb, path, access },
        handler: on(verb.filter(), handler),
    }
}

/// The declaration table
pub fn routes() -> Vec<RouteDecl> {
    use Access::{Public, Requires};
    use Action::{Manage, Read};
    use Verb::{Delete, Get, Patch, Post};

    let book = Requires(Manage, Subject::Book);
    let loan = Requires(Manage, Subject::Loan);
    let admin = Requires(Manage, Subject::Superadmin);
    let student = Requires(Read, Subject::Student);

    vec![
        declare(Get, "/health", Public, health::health_check),
        declare(Get, "/ready", Public, health::readiness_check),
        // Superadmins
        declare(Post, "/api/superadmins/login", Public, superadmins::login),
        declare(Post, "/api/superadmins", admin, superadmins::register),
        declare(Delete, "/api/superadmins/current", admin, superadmins::logout),
        // Books
        declare(Get, "/api/books/search", book, books::search_books),
        declare(Post, "/api/books", book, books::create_book),
        declare(Get, "/api/books", book, books::list_books),
        declare(Get, "/api/books/:id", book, books::get_book),
        declare(Patch, "/api/books/:id", book, books::update_book),
        declare(Delete, "/api/books/:id", book, books::delete_book),
        // Loans
        declare(Get, "/api/loans/search", loan, loans::search_loans),
        declare(Post, "/api/loans", loan, loans::create_loan),
        declare(Get, "/api/loans", loan, loans::list_loans),
        declare(Get, "/api/loans/:id", loan, loans::get_loan),
        declare(Patch, "/api/loans/:id", loan, loans::update_loan),
        declare(Delete, "/api/loans/:id", loan, loans::delete_loan),
        // Students
        declare(Get, "/api/students/search", student, students::search_students),
        declare(Get, "/api/students", student, students::list_students),
        declare(Get, "/api/students/:id", student, students::get_student),
    ]
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let decls = routes();
    let rules: Vec<RouteRule> = decls.iter().map(|decl| decl.rule).collect();

    let mut api = Router::new();
    for decl in decls {
        api = api.route(decl.rule.path, decl.handler);
    }

    let guard_state = guard::GuardState {
        services: state.services.clone(),
        rules: Arc::new(rules),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api
        .route_layer(middleware::from_fn_with_state(guard_state, guard::authorize))
        .fallback(not_found)
        .with_state(state.clone())
        .merge(openapi::create_openapi_router());

    let limits = &state.config.rate_limit;
    let governor = limits
        .enabled
        .then(|| {
            GovernorConfigBuilder::default()
                .per_second(limits.period_seconds)
                .burst_size(limits.burst_size)
                .key_extractor(GlobalKeyExtractor)
                .finish()
        })
        .flatten();

    let app = match governor {
        Some(governor) => app
            .layer(GovernorLayer {
                config: Box::leak(Box::new(governor)),
            })
            .layer(middleware::map_response(envelope_rate_limit)),
        None => {
            if limits.enabled {
                tracing::warn!(
                    period_seconds = limits.period_seconds,
                    burst_size = limits.burst_size,
                    "Invalid rate limit settings, throttling disabled"
                );
            }
            app
        }
    };

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Rewrite the limiter's plain-text 429 into the envelope
async fn envelope_rate_limit(response: Response) -> Response {
    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        AppError::RateLimited.into_response()
    } else {
        response
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(WebResponse::<()>::errors(json!("Not found"))),
    )
}
