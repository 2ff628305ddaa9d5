//! HTTP handlers and route configuration.

mod auth;
mod cards;
mod health;
mod users;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, web};
use bson::oid::ObjectId;

use crate::middleware::error::AppError;
use mesto_shared::ErrorResponse;

/// Configure all application routes.
///
/// `/signup`, `/signin` and `/health` are public; everything else requires
/// a bearer token via the `Identity` extractor inside each handler.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/signup", web::post().to(auth::signup))
        .route("/signin", web::post().to(auth::signin))
        .service(
            web::scope("/users")
                // Literal segments before the `{userId}` catch-all.
                .route("/me", web::get().to(users::current_user))
                .route("/me", web::patch().to(users::update_profile))
                .route("/me/avatar", web::patch().to(users::update_avatar))
                .route("", web::get().to(users::list_users))
                .route("/{userId}", web::get().to(users::user_by_id)),
        )
        .service(
            web::scope("/cards")
                .route("", web::get().to(cards::list_cards))
                .route("", web::post().to(cards::create_card))
                .route("/{cardId}", web::delete().to(cards::delete_card))
                .route("/{cardId}/likes", web::put().to(cards::like_card))
                .route("/{cardId}/likes", web::delete().to(cards::unlike_card)),
        )
        .default_service(web::route().to(not_found));
}

/// Catch-all for unknown paths.
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Requested resource not found"))
}

/// Parse a path segment as a 24-char hex ObjectId; anything else is a
/// client error, not a driver error.
pub(crate) fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} id", what)))
}
