use crate::{
    types::{AppError, MessageResponse, RegisterRequest, Result},
    AppState,
};
use axum::{extract::State, Form, Json};

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body(content = RegisterRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing field or email already registered")
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    // Validate input
    if payload.email.is_empty() {
        return Err(AppError::InvalidInput("email missing".to_string()));
    }
    if payload.password.is_empty() {
        return Err(AppError::InvalidInput("password missing".to_string()));
    }

    let user = state.auth.register(&payload.email, &payload.password).await?;

    Ok(Json(MessageResponse {
        email: user.email,
        message: "user created".to_string(),
    }))
}
