use super::state::AppState;
use crate::embed::{extract_pet, first_embed};
use crate::store::Row;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

/// Window used by `GET /pets` when no `since` is given
pub const DEFAULT_WINDOW_SECS: i64 = 60 * 60;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListPetsResponse {
    pub pets: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub struct CreatePetResponse {
    pub message: String,
    pub pet: Row,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `since` was present but not a usable Unix timestamp
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid since")]
pub struct InvalidSince;

// ============================================================================
// Handlers
// ============================================================================

/// GET /pets?since=<unix seconds>
/// Records created after the cutoff, oldest first
pub async fn list_pets(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // axum routes HEAD to GET handlers; only GET lists
    if method != Method::GET {
        return not_found().await;
    }

    // First occurrence wins when the parameter is repeated
    let since = params
        .iter()
        .find(|(key, _)| key == "since")
        .map(|(_, value)| value.as_str());

    let cutoff = match cutoff_from(since, Utc::now()) {
        Ok(cutoff) => cutoff,
        Err(e) => {
            warn!("Rejecting pets query with since={:?}", since.unwrap_or_default());
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match state.pets.list_since(cutoff).await {
        Ok(pets) => {
            info!("Listing {} pets created after {}", pets.len(), cutoff);
            (StatusCode::OK, Json(ListPetsResponse { pets })).into_response()
        }
        Err(e) => {
            error!("Failed to query {}: {}", state.pets.table(), e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST (any path)
/// Save the pet described by the first embed of a webhook body
pub async fn create_pet(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Rejecting webhook body: {}", rejection.body_text());
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let embed = match first_embed(&body) {
        Ok(embed) => embed,
        Err(e) => {
            warn!("Rejecting webhook ({} bytes): {}", body.len(), e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let pet = extract_pet(&embed, Utc::now().trunc_subsecs(3));

    match state.pets.save(&pet).await {
        Ok(saved) => {
            info!(
                "Saved pet {} (rarity={}, owner={})",
                pet.pet_name, pet.rarity, pet.owner
            );
            (
                StatusCode::OK,
                Json(CreatePetResponse {
                    message: "Pet saved".to_string(),
                    pet: saved,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to save pet into {}: {}", state.pets.table(), e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Catch-all: POST to any other path saves a pet, everything else is 404
pub async fn fallback(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::POST {
        create_pet(State(state), body).await
    } else {
        not_found().await
    }
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the list cutoff from the raw `since` parameter
///
/// Missing or empty means one hour before `now`. Otherwise the leading
/// integer is taken as seconds since the Unix epoch and anything after it is
/// ignored (`12abc` and `12.9` both mean 12). No leading digits, or a value
/// outside the representable range, is [`InvalidSince`].
pub fn cutoff_from(since: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>, InvalidSince> {
    match since {
        None | Some("") => Ok(now - Duration::seconds(DEFAULT_WINDOW_SECS)),
        Some(raw) => {
            let seconds = leading_integer(raw).ok_or(InvalidSince)?;
            DateTime::from_timestamp(seconds, 0).ok_or(InvalidSince)
        }
    }
}

/// Optional sign followed by decimal digits, after leading whitespace
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }

    trimmed[..sign_len + digits].parse().ok()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}
