//! Error-to-response mapping.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::directory::DirectoryError;
use crate::relationship::FollowError;

/// Body carried by every non-resource response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

pub fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(Detail::new(detail))).into_response()
}

impl IntoResponse for FollowError {
    fn into_response(self) -> Response {
        match self {
            FollowError::NotFound(_) => detail_response(StatusCode::NOT_FOUND, "User not found."),
            FollowError::InvalidOperation => {
                detail_response(StatusCode::BAD_REQUEST, "You can't follow yourself.")
            }
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        match self {
            DirectoryError::NotFound(_) | DirectoryError::UnknownId(_) => {
                detail_response(StatusCode::NOT_FOUND, "User not found.")
            }
            DirectoryError::UsernameTaken(_) => detail_response(
                StatusCode::BAD_REQUEST,
                "A user with that username already exists.",
            ),
            DirectoryError::InvalidUsername(_) => detail_response(
                StatusCode::BAD_REQUEST,
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            ),
        }
    }
}
