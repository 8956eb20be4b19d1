use crate::auth::strategy::AuthStrategy;
use crate::db::User;
use crate::types::{AppError, Result};
use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::Arc;

/// Request gate in front of protected routes.
///
/// Excluded paths pass through untouched. For everything else the strategy
/// must resolve an identity: 401 when the request carries no credential at
/// all, 403 when it carries one that resolves to nobody. The resolved
/// [`User`] is stored in request extensions for extractors downstream.
pub async fn gate(
    strategy: Arc<dyn AuthStrategy>,
    excluded_paths: Arc<Vec<String>>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let path = req.uri().path().to_string();

    if !strategy.require_auth(Some(&path), &excluded_paths) {
        return Ok(next.run(req).await);
    }

    let user = {
        let headers = req.headers();

        if strategy.authorization_header(Some(headers)).is_none()
            && strategy.session_cookie(Some(headers)).is_none()
        {
            return Err(AppError::InvalidCredential(
                "authentication required".to_string(),
            ));
        }

        strategy
            .current_user(Some(headers))
            .await
            .ok_or_else(|| AppError::Forbidden("not authorized".to_string()))?
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The authenticated identity the gate placed in request extensions.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Forbidden("not authorized".to_string()))
    }
}
