use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::domain::UserType;

#[derive(Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: String,
    pub user_type: UserType,
    pub company: Option<String>,
}

/// Get current authenticated user info
pub async fn get_me(user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        name: user.name.clone(),
        user_type: user.user_type,
        company: user.company.clone(),
    })
}
