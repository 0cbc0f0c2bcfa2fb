//! Authentication and per-route authorization middleware

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    models::{ability::Ability, superadmin::Principal},
    services::Services,
};

use super::router::{Access, RouteRule};

const FORBIDDEN: &str = "Forbidden: Insufficient permissions to access this resource";

/// State handed to [`authorize`]: the services plus the route declaration table
#[derive(Clone)]
pub struct GuardState {
    pub services: Arc<Services>,
    pub rules: Arc<Vec<RouteRule>>,
}

/// Look up the matched route's declared access and enforce it.
///
/// Routes absent from the table are denied.
pub async fn authorize(
    State(guard): State<GuardState>,
    matched: Option<MatchedPath>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = matched
        .as_ref()
        .and_then(|path| {
            guard
                .rules
                .iter()
                .find(|rule| rule.path == path.as_str() && rule.verb.method() == req.method())
        })
        .map(|rule| rule.access);

    let Some(access) = access else {
        tracing::warn!(path = %req.uri().path(), method = %req.method(), "Route has no access declaration");
        return Err(AppError::Authorization(FORBIDDEN.to_string()));
    };

    match access {
        Access::Public => {}
        Access::Requires(action, subject) => {
            let principal = resolve(&guard.services, req.headers()).await?;
            if !Ability::for_role(principal.role).can(action, subject) {
                tracing::warn!(
                    username = %principal.username,
                    role = %principal.role,
                    ?action,
                    ?subject,
                    "Permission denied"
                );
                return Err(AppError::Authorization(FORBIDDEN.to_string()));
            }
            req.extensions_mut().insert(principal);
        }
    }

    Ok(next.run(req).await)
}

/// Bearer token -> principal
async fn resolve(services: &Services, headers: &HeaderMap) -> AppResult<Principal> {
    let token = bearer_token(headers)?;
    services.superadmins.authenticate(token).await.map_err(|e| {
        if matches!(e, AppError::Authentication(_)) {
            tracing::warn!("Token rejected: {}", e);
        }
        e
    })
}

fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Authentication("Authentication required".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Authentication("Invalid token".to_string()))
}
