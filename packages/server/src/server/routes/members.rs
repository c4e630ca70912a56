//! REST endpoints for members
//!
//! Translates action outcomes into status codes and JSON bodies:
//! 201 created, 400 field errors, 409 duplicate email, 500 anything else.
//! Internal error details are logged, never returned.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::common::MemberId;
use crate::domains::member::actions::{get_member, list_members, register_member};
use crate::domains::member::{MemberData, NewMemberInput, RegistrationError};
use crate::server::app::AxumAppState;

pub const UNEXPECTED_REGISTRATION_ERROR: &str =
    "An unexpected error occurred during registration.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// `{"error": "..."}` body for conflicts and failures
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(message)),
    )
        .into_response()
}

/// Map a failed registration to its HTTP response
pub fn registration_error_response(err: RegistrationError) -> Response {
    match err {
        RegistrationError::FieldValidation(errors) => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        RegistrationError::DuplicateEmail(_) => {
            (StatusCode::CONFLICT, Json(ErrorBody::new(err.to_string()))).into_response()
        }
        RegistrationError::Unexpected(source) => {
            error!(error = %source, details = ?source, "Error registering member");
            internal_error(UNEXPECTED_REGISTRATION_ERROR)
        }
    }
}

/// GET /rest/members
pub async fn list_members_handler(Extension(state): Extension<AxumAppState>) -> Response {
    info!("GET /rest/members request received");

    match list_members(&state.deps).await {
        Ok(members) => {
            let body: Vec<MemberData> = members.into_iter().map(MemberData::from).collect();
            Json(body).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list members");
            internal_error(UNEXPECTED_ERROR)
        }
    }
}

/// GET /rest/members/:id
pub async fn get_member_handler(
    Path(id): Path<String>,
    Extension(state): Extension<AxumAppState>,
) -> Response {
    info!(id = %id, "GET /rest/members/:id request received");

    // An id that cannot exist is simply not found
    let Ok(member_id) = MemberId::parse(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match get_member(member_id, &state.deps).await {
        Ok(Some(member)) => Json(MemberData::from(member)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(error = %e, member_id = %member_id, "Failed to look up member");
            internal_error(UNEXPECTED_ERROR)
        }
    }
}

/// POST /rest/members
pub async fn create_member_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<NewMemberInput>,
) -> Response {
    info!(name = ?input.name, "POST /rest/members request received");

    match register_member(input, &state.deps).await {
        Ok(member) => (StatusCode::CREATED, Json(MemberData::from(member))).into_response(),
        Err(err) => registration_error_response(err),
    }
}
