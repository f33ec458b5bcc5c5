use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::HttpError;

/// JSON extractor that runs `validator` rules after deserialization.
/// Both failure modes surface as a 422 validation error.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::Validation {
                message: rejection.body_text(),
            })?;
        value.validate().map_err(|err| HttpError::Validation {
            message: err.to_string(),
        })?;
        Ok(Self(value))
    }
}
