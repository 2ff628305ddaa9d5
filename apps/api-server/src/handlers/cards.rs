//! Card handlers.

use actix_web::{HttpResponse, web};

use mesto_core::domain::Card;
use mesto_shared::Data;
use mesto_shared::dto::{CardResponse, CreateCardRequest};

use super::parse_object_id;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::validate::ValidJson;
use crate::state::AppState;

const CARD_NOT_FOUND: &str = "Card not found";

/// GET /cards
pub async fn list_cards(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let cards = state.cards.find_all().await?;
    let cards: Vec<CardResponse> = cards.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(Data::new(cards)))
}

/// POST /cards
pub async fn create_card(
    identity: Identity,
    state: web::Data<AppState>,
    body: ValidJson<CreateCardRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let card = Card::new(req.name, req.link, identity.user_id);
    let saved = state.cards.insert(card).await?;

    Ok(HttpResponse::Created().json(Data::new(CardResponse::from(saved))))
}

/// DELETE /cards/{cardId}
///
/// Only the owner may delete a card; anyone else gets 403 regardless of
/// what they know about the card.
pub async fn delete_card(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let card_id = parse_object_id(&path, "card")?;

    let card = state
        .cards
        .find_by_id(card_id)
        .await?
        .ok_or_else(|| AppError::NotFound(CARD_NOT_FOUND.to_string()))?;

    if !card.is_owned_by(identity.user_id) {
        return Err(AppError::Forbidden(
            "You cannot delete another user's card".to_string(),
        ));
    }

    state.cards.delete(card_id).await?;

    Ok(HttpResponse::Ok().json(Data::new(CardResponse::from(card))))
}

/// PUT /cards/{cardId}/likes
pub async fn like_card(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let card_id = parse_object_id(&path, "card")?;

    let card = state
        .cards
        .add_like(card_id, identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(CARD_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(Data::new(CardResponse::from(card))))
}

/// DELETE /cards/{cardId}/likes
pub async fn unlike_card(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let card_id = parse_object_id(&path, "card")?;

    let card = state
        .cards
        .remove_like(card_id, identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(CARD_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(Data::new(CardResponse::from(card))))
}
