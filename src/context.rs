use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

use crate::shared::AppError;

/// Header carrying the caller's user id, set by the auth gateway in front of this service
pub const USER_ID_HEADER: &str = "x-user-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request caller context, passed explicitly into service calls
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub user_id: Option<String>,
}

impl RequestContext {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            user_id,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn for_user(user_id: &str) -> Self {
        Self::new(Some(user_id.to_string()))
    }

    /// Returns the caller's user id, or `Unauthorized` when the request is anonymous
    pub fn require_user(&self) -> Result<&str, AppError> {
        self.user_id
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", USER_ID_HEADER)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let user_id = header(USER_ID_HEADER);
        let request_id = header(REQUEST_ID_HEADER).unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            request_id,
            user_id,
        })
    }
}
