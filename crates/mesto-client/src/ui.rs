//! UI state model for a Mesto frontend.
//!
//! One explicit state machine instead of independent popup booleans: the
//! view is always in exactly one of `Idle`, `PopupOpen`, `Loading` or
//! `Error`, and transitions that would make the states disagree are
//! rejected.

use mesto_shared::dto::{CardResponse, UserResponse};

/// The popups the view can show, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupKind {
    EditProfile,
    EditAvatar,
    AddCard,
    /// Full-size preview of the card with this id.
    ImagePreview(String),
}

/// The single UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    PopupOpen(PopupKind),
    Loading,
    Error(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid transition: {0}")]
pub struct TransitionError(&'static str);

/// Application model: UI state plus the data the view renders.
#[derive(Debug)]
pub struct AppModel {
    state: UiState,
    current_user: Option<UserResponse>,
    cards: Vec<CardResponse>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            state: UiState::Idle,
            current_user: None,
            cards: Vec::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&UserResponse> {
        self.current_user.as_ref()
    }

    pub fn cards(&self) -> &[CardResponse] {
        &self.cards
    }

    /// Open a popup. Only allowed from `Idle`; a popup cannot appear over
    /// another popup or while a request is in flight.
    pub fn open_popup(&mut self, kind: PopupKind) -> Result<(), TransitionError> {
        match self.state {
            UiState::Idle => {
                self.state = UiState::PopupOpen(kind);
                Ok(())
            }
            _ => Err(TransitionError("open_popup requires Idle")),
        }
    }

    /// Close the current popup.
    pub fn close_popup(&mut self) -> Result<(), TransitionError> {
        match self.state {
            UiState::PopupOpen(_) => {
                self.state = UiState::Idle;
                Ok(())
            }
            _ => Err(TransitionError("close_popup requires an open popup")),
        }
    }

    /// Enter `Loading` when an API call starts, from `Idle` or from a popup
    /// (submitting a form).
    pub fn begin_request(&mut self) -> Result<(), TransitionError> {
        match self.state {
            UiState::Idle | UiState::PopupOpen(_) => {
                self.state = UiState::Loading;
                Ok(())
            }
            _ => Err(TransitionError("begin_request requires Idle or a popup")),
        }
    }

    /// Leave `Loading` after the call settles.
    pub fn finish_request(&mut self, outcome: Result<(), String>) -> Result<(), TransitionError> {
        match self.state {
            UiState::Loading => {
                self.state = match outcome {
                    Ok(()) => UiState::Idle,
                    Err(message) => UiState::Error(message),
                };
                Ok(())
            }
            _ => Err(TransitionError("finish_request requires Loading")),
        }
    }

    /// Acknowledge a displayed error.
    pub fn dismiss_error(&mut self) -> Result<(), TransitionError> {
        match self.state {
            UiState::Error(_) => {
                self.state = UiState::Idle;
                Ok(())
            }
            _ => Err(TransitionError("dismiss_error requires Error")),
        }
    }

    pub fn set_current_user(&mut self, user: UserResponse) {
        self.current_user = Some(user);
    }

    pub fn set_cards(&mut self, cards: Vec<CardResponse>) {
        self.cards = cards;
    }

    /// Replace a card in place (e.g. after a like toggle) or append it.
    pub fn upsert_card(&mut self, card: CardResponse) {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }

    pub fn remove_card(&mut self, card_id: &str) {
        self.cards.retain(|c| c.id != card_id);
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, likes: usize) -> CardResponse {
        CardResponse {
            id: id.to_string(),
            name: "Baikal".to_string(),
            link: "https://example.com/b.jpg".to_string(),
            owner: "507f1f77bcf86cd799439011".to_string(),
            likes: vec!["507f1f77bcf86cd799439012".to_string(); likes],
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn popup_then_submit_then_idle() {
        let mut model = AppModel::new();

        model.open_popup(PopupKind::AddCard).unwrap();
        model.begin_request().unwrap();
        model.finish_request(Ok(())).unwrap();

        assert_eq!(*model.state(), UiState::Idle);
    }

    #[test]
    fn popup_cannot_open_over_popup_or_loading() {
        let mut model = AppModel::new();
        model.open_popup(PopupKind::EditProfile).unwrap();

        assert!(model.open_popup(PopupKind::AddCard).is_err());

        model.begin_request().unwrap();
        assert!(model.open_popup(PopupKind::AddCard).is_err());
    }

    #[test]
    fn failed_request_shows_error_until_dismissed() {
        let mut model = AppModel::new();

        model.begin_request().unwrap();
        model
            .finish_request(Err("API error 500: Internal server error".to_string()))
            .unwrap();
        assert!(matches!(model.state(), UiState::Error(_)));

        model.dismiss_error().unwrap();
        assert_eq!(*model.state(), UiState::Idle);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut model = AppModel::new();
        model.set_cards(vec![card("a", 0), card("b", 0)]);

        model.upsert_card(card("a", 1));

        assert_eq!(model.cards().len(), 2);
        assert_eq!(model.cards()[0].likes.len(), 1);
    }

    #[test]
    fn remove_card_drops_it_from_the_list() {
        let mut model = AppModel::new();
        model.set_cards(vec![card("a", 0), card("b", 0)]);

        model.remove_card("a");

        assert_eq!(model.cards().len(), 1);
        assert_eq!(model.cards()[0].id, "b");
    }
}
