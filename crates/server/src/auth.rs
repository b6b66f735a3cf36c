use axum::{
    Extension,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// The bearer token claims the server reads
#[derive(Debug, Clone, Deserialize)]
pub struct CourseClaims {
    pub sub: Option<String>,
    pub email: Option<String>,
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    /// Instructors own courses by email
    pub email: Option<String>,
}

/// Turns validated token claims into a [`CurrentUser`] extension
///
/// Runs after the OAuth2 layer has verified the token and stored its claims.
pub async fn require_user(
    Extension(claims): Extension<CourseClaims>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let id = claims.sub.ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(CurrentUser {
        id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
