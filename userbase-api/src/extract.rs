//! Request extractors
//!
//! `ValidatedJson<T>` decodes a JSON body and runs `validator` rules on it
//! before the handler is called. Anything wrong with the body, from a missing
//! content type to a malformed email, becomes `ApiError::ValidationError`, so a
//! bad request never reaches the database.

use crate::error::{ApiError, ValidationErrorDetail};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed validation
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");

    ApiError::ValidationError(vec![ValidationErrorDetail::new(
        "body",
        rejection.body_text(),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let ValidatedJson(probe) =
            ValidatedJson::<Probe>::from_request(json_request(r#"{"email":"a@example.com"}"#), &())
                .await
                .expect("valid body should be accepted");

        assert_eq!(probe.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_rule_failure_names_field() {
        let err = ValidatedJson::<Probe>::from_request(json_request(r#"{"email":"nope"}"#), &())
            .await
            .unwrap_err();

        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details, vec![ValidationErrorDetail::new("email", "Invalid email format")]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let err = ValidatedJson::<Probe>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();

        match err {
            ApiError::ValidationError(details) => assert_eq!(details[0].field, "body"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_validation_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"email":"a@example.com"}"#))
            .unwrap();

        let err = ValidatedJson::<Probe>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }
}
