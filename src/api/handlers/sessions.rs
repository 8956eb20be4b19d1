use crate::{
    types::{AppError, LoginRequest, MessageResponse, Result},
    AppState,
};
use axum::{extract::State, response::Redirect, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Login with email and password
#[utoipa::path(
    post,
    path = "/sessions",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful, session cookie set", body = MessageResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Session could not be created")
    ),
    tag = "sessions"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    // Validate input
    if payload.email.is_empty() {
        return Err(AppError::InvalidInput("email missing".to_string()));
    }
    if payload.password.is_empty() {
        return Err(AppError::InvalidInput("password missing".to_string()));
    }

    // Uniform failure: never reveals whether the email or the password was wrong
    if !state.auth.valid_login(&payload.email, &payload.password).await {
        return Err(AppError::InvalidCredential("invalid credentials".to_string()));
    }

    let session_id = state
        .auth
        .create_session(&payload.email)
        .await?
        .ok_or_else(|| AppError::Internal("could not create session".to_string()))?;

    let cookie_name = state.config.auth.session_cookie.clone();
    let jar = jar.add(
        Cookie::build((cookie_name, session_id))
            .path("/")
            .http_only(true),
    );

    Ok((
        jar,
        Json(MessageResponse {
            email: payload.email,
            message: "logged in".to_string(),
        }),
    ))
}

/// Logout and destroy the current session
#[utoipa::path(
    delete,
    path = "/sessions",
    responses(
        (status = 303, description = "Session destroyed, redirects to /"),
        (status = 403, description = "No session cookie presented"),
        (status = 404, description = "Cookie maps to no live session")
    ),
    tag = "sessions"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Redirect> {
    let Some(cookie) = jar.get(&state.config.auth.session_cookie) else {
        return Err(AppError::Forbidden("not authorized".to_string()));
    };

    let Some(user) = state.auth.user_from_session(cookie.value()).await else {
        return Err(AppError::NotFound("session not found".to_string()));
    };

    state.auth.destroy_session(&user.id).await?;

    Ok(Redirect::to("/"))
}
