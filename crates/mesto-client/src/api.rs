//! The REST client.

use serde::de::DeserializeOwned;

use mesto_shared::dto::{
    CardResponse, CreateCardRequest, SigninRequest, SignupRequest, TokenResponse,
    UpdateAvatarRequest, UpdateProfileRequest, UserResponse,
};
use mesto_shared::{Data, ErrorResponse};

/// Client-side view of a failed operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Mesto API client. Holds the base URL and, after [`MestoApi::signin`] or
/// [`MestoApi::set_token`], the bearer token attached to every call.
pub struct MestoApi {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl MestoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// Install a previously obtained token (e.g. restored from storage).
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let message = resp
            .json::<ErrorResponse>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("Request failed with status {}", status));

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// POST /signup
    pub async fn signup(&self, req: &SignupRequest) -> ApiResult<UserResponse> {
        let resp = self.http.post(self.url("/signup")).json(req).send().await?;
        Ok(Self::check::<Data<UserResponse>>(resp).await?.data)
    }

    /// POST /signin - on success the token is stored on the client.
    pub async fn signin(&mut self, email: &str, password: &str) -> ApiResult<String> {
        let req = SigninRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.http.post(self.url("/signin")).json(&req).send().await?;
        let token = Self::check::<TokenResponse>(resp).await?.token;

        self.token = Some(token.clone());
        Ok(token)
    }

    /// GET /users
    pub async fn users(&self) -> ApiResult<Vec<UserResponse>> {
        let resp = self.authorized(self.http.get(self.url("/users"))).send().await?;
        Ok(Self::check::<Data<Vec<UserResponse>>>(resp).await?.data)
    }

    /// GET /users/me
    pub async fn me(&self) -> ApiResult<UserResponse> {
        let resp = self
            .authorized(self.http.get(self.url("/users/me")))
            .send()
            .await?;
        Ok(Self::check::<Data<UserResponse>>(resp).await?.data)
    }

    /// GET /users/{userId}
    pub async fn user(&self, user_id: &str) -> ApiResult<UserResponse> {
        let resp = self
            .authorized(self.http.get(self.url(&format!("/users/{}", user_id))))
            .send()
            .await?;
        Ok(Self::check::<Data<UserResponse>>(resp).await?.data)
    }

    /// PATCH /users/me
    pub async fn update_profile(&self, name: &str, about: &str) -> ApiResult<UserResponse> {
        let req = UpdateProfileRequest {
            name: name.to_string(),
            about: about.to_string(),
        };
        let resp = self
            .authorized(self.http.patch(self.url("/users/me")).json(&req))
            .send()
            .await?;
        Ok(Self::check::<Data<UserResponse>>(resp).await?.data)
    }

    /// PATCH /users/me/avatar
    pub async fn update_avatar(&self, avatar: &str) -> ApiResult<UserResponse> {
        let req = UpdateAvatarRequest {
            avatar: avatar.to_string(),
        };
        let resp = self
            .authorized(self.http.patch(self.url("/users/me/avatar")).json(&req))
            .send()
            .await?;
        Ok(Self::check::<Data<UserResponse>>(resp).await?.data)
    }

    /// GET /cards
    pub async fn cards(&self) -> ApiResult<Vec<CardResponse>> {
        let resp = self.authorized(self.http.get(self.url("/cards"))).send().await?;
        Ok(Self::check::<Data<Vec<CardResponse>>>(resp).await?.data)
    }

    /// POST /cards
    pub async fn create_card(&self, req: &CreateCardRequest) -> ApiResult<CardResponse> {
        let resp = self
            .authorized(self.http.post(self.url("/cards")).json(req))
            .send()
            .await?;
        Ok(Self::check::<Data<CardResponse>>(resp).await?.data)
    }

    /// DELETE /cards/{cardId}
    pub async fn delete_card(&self, card_id: &str) -> ApiResult<CardResponse> {
        let resp = self
            .authorized(self.http.delete(self.url(&format!("/cards/{}", card_id))))
            .send()
            .await?;
        Ok(Self::check::<Data<CardResponse>>(resp).await?.data)
    }

    /// PUT /cards/{cardId}/likes
    pub async fn like_card(&self, card_id: &str) -> ApiResult<CardResponse> {
        let resp = self
            .authorized(
                self.http
                    .put(self.url(&format!("/cards/{}/likes", card_id))),
            )
            .send()
            .await?;
        Ok(Self::check::<Data<CardResponse>>(resp).await?.data)
    }

    /// DELETE /cards/{cardId}/likes
    pub async fn unlike_card(&self, card_id: &str) -> ApiResult<CardResponse> {
        let resp = self
            .authorized(
                self.http
                    .delete(self.url(&format!("/cards/{}/likes", card_id))),
            )
            .send()
            .await?;
        Ok(Self::check::<Data<CardResponse>>(resp).await?.data)
    }

    /// Toggle a like based on the current like state.
    pub async fn change_like(&self, card_id: &str, is_liked: bool) -> ApiResult<CardResponse> {
        if is_liked {
            self.unlike_card(card_id).await
        } else {
            self.like_card(card_id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = MestoApi::new("https://api.example.com/");
        assert_eq!(api.url("/cards"), "https://api.example.com/cards");
    }

    #[test]
    fn token_is_absent_until_installed() {
        let mut api = MestoApi::new("https://api.example.com");
        assert!(api.token().is_none());

        api.set_token("abc");
        assert_eq!(api.token(), Some("abc"));
    }
}
