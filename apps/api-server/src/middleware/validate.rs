//! Request body validation - deserializes JSON into a `validator`-annotated
//! DTO and runs its schema before the handler sees the value.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::AppError;

/// A JSON body that passed schema validation.
///
/// Deserialization failure or a rule violation short-circuits the pipeline
/// with 400 and a human-readable message.
pub struct ValidJson<T>(pub T);

impl<T> ValidJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, err.code),
            })
        })
        .collect()
}

impl<T> FromRequest for ValidJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let json_fut = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let json = json_fut
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

            json.validate()
                .map_err(|e| AppError::Validation(validation_messages(&e)))?;

            Ok(ValidJson(json.into_inner()))
        })
    }
}
