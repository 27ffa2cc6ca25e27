use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};

use super::state::AppState;
use crate::services::user_store::{AuthenticatedUser, ROLE_CARD_OWNER};

const BASIC_CHALLENGE: &str = r#"Basic realm="cashcard""#;

/// Authentication error responses
#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    Forbidden,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
            )
                .into_response(),
            AuthError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Middleware that requires valid Basic credentials for a user holding
/// the `CARD-OWNER` role. The user is stored in the request extensions.
pub async fn require_card_owner(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (username, password) =
        parse_basic_credentials(request.headers()).ok_or(AuthError::Unauthorized)?;

    // Password hashing is CPU-bound
    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || users.authenticate(&username, &password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Credential check panicked");
            AuthError::Internal
        })?
        .ok_or_else(|| {
            tracing::debug!("Rejected bad credentials");
            AuthError::Unauthorized
        })?;

    if !user.has_role(ROLE_CARD_OWNER) {
        tracing::warn!(username = %user.username, "User lacks required role");
        return Err(AuthError::Forbidden);
    }

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extracts `(username, password)` from an `Authorization: Basic ...` header
fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// The authenticated user, as attached by [`require_card_owner`]
pub type CurrentUser = axum::Extension<AuthenticatedUser>;
