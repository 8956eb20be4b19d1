use crate::{auth::middleware::CurrentUser, types::ProfileResponse};
use axum::Json;

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Authenticated user's profile", body = ProfileResponse),
        (status = 401, description = "No credential presented"),
        (status = 403, description = "Credential resolves to no identity")
    ),
    tag = "profile"
)]
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse { email: user.email })
}
