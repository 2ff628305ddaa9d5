//! User handlers.

use actix_web::{HttpResponse, web};

use mesto_core::ports::ProfilePatch;
use mesto_shared::Data;
use mesto_shared::dto::{UpdateAvatarRequest, UpdateProfileRequest, UserResponse};

use super::parse_object_id;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::validate::ValidJson;
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// GET /users
pub async fn list_users(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(Data::new(users)))
}

/// GET /users/me
pub async fn current_user(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(Data::new(UserResponse::from(user))))
}

/// GET /users/{userId}
pub async fn user_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = parse_object_id(&path, "user")?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(Data::new(UserResponse::from(user))))
}

/// PATCH /users/me
///
/// Only ever targets the caller's own record; there is no route shape that
/// lets one user edit another's profile.
pub async fn update_profile(
    identity: Identity,
    state: web::Data<AppState>,
    body: ValidJson<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let updated = state
        .users
        .update_profile(
            identity.user_id,
            ProfilePatch::Info {
                name: req.name,
                about: req.about,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(Data::new(UserResponse::from(updated))))
}

/// PATCH /users/me/avatar
pub async fn update_avatar(
    identity: Identity,
    state: web::Data<AppState>,
    body: ValidJson<UpdateAvatarRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let updated = state
        .users
        .update_profile(identity.user_id, ProfilePatch::Avatar { avatar: req.avatar })
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(Data::new(UserResponse::from(updated))))
}
