use crate::{db::UserLookup, types::Result, AppState};
use axum::{extract::State, Json};

/// Index route
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message")
    ),
    tag = "status"
)]
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Bienvenue" }))
}

/// Service status
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Service is up and the identity store answers"),
        (status = 500, description = "Identity store unavailable")
    ),
    tag = "status"
)]
pub async fn status(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    // An OK here vouches for a working identity store, not just the process
    state
        .store
        .find_by(UserLookup::Id("00000000-0000-0000-0000-000000000000"))
        .await?;
    Ok(Json(serde_json::json!({ "status": "OK" })))
}
