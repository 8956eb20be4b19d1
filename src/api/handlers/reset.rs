use crate::{
    types::{AppError, MessageResponse, ResetRequest, ResetTokenResponse, Result, UpdatePasswordRequest},
    AppState,
};
use axum::{extract::State, Form, Json};

/// Request a password-reset token
#[utoipa::path(
    post,
    path = "/reset_password",
    request_body(content = ResetRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Reset token issued", body = ResetTokenResponse),
        (status = 400, description = "Missing field"),
        (status = 403, description = "Not authorized")
    ),
    tag = "reset"
)]
pub async fn request_reset(
    State(state): State<AppState>,
    Form(payload): Form<ResetRequest>,
) -> Result<Json<ResetTokenResponse>> {
    // Validate input
    if payload.email.is_empty() {
        return Err(AppError::InvalidInput("email missing".to_string()));
    }

    // Unknown emails read as a uniform 403 rather than confirming registration
    let reset_token = match state.auth.request_password_reset(&payload.email).await {
        Ok(token) => token,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Forbidden("not authorized".to_string()));
        }
        Err(e) => return Err(e),
    };

    Ok(Json(ResetTokenResponse {
        email: payload.email,
        reset_token,
    }))
}

/// Update a password with a reset token
#[utoipa::path(
    put,
    path = "/reset_password",
    request_body(content = UpdatePasswordRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing field"),
        (status = 403, description = "Not authorized")
    ),
    tag = "reset"
)]
pub async fn update_password(
    State(state): State<AppState>,
    Form(payload): Form<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    // Validate input
    if payload.email.is_empty() {
        return Err(AppError::InvalidInput("email missing".to_string()));
    }
    if payload.reset_token.is_empty() {
        return Err(AppError::InvalidInput("reset_token missing".to_string()));
    }
    if payload.new_password.is_empty() {
        return Err(AppError::InvalidInput("new_password missing".to_string()));
    }

    // Bad and consumed tokens read identically
    match state
        .auth
        .update_password(&payload.reset_token, &payload.new_password)
        .await
    {
        Ok(()) => {}
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Forbidden("not authorized".to_string()));
        }
        Err(e) => return Err(e),
    }

    Ok(Json(MessageResponse {
        email: payload.email,
        message: "Password updated".to_string(),
    }))
}
