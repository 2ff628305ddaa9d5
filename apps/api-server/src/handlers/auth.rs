//! Signup and signin handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use mesto_core::domain::User;
use mesto_core::ports::{PasswordService, TokenService};
use mesto_shared::Data;
use mesto_shared::dto::{SigninRequest, SignupRequest, TokenResponse, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::validate::ValidJson;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: ValidJson<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Fast path; the unique index still catches concurrent registrations.
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict(
            "A user with this email is already registered".to_string(),
        ));
    }

    let password_hash = password_service.hash(&req.password)?;

    let user = User::new(req.email, password_hash, req.name, req.about, req.avatar);
    let saved = state.users.insert(user).await?;

    Ok(HttpResponse::Created().json(Data::new(UserResponse::from(saved))))
}

/// POST /signin
pub async fn signin(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: ValidJson<SigninRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // The same response for an unknown email and a wrong password; the
    // caller learns nothing about which accounts exist.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    let valid = password_service.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let token = token_service.generate_token(user.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
