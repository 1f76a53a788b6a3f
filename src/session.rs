use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Header carrying the authenticated user's id, set by the auth gateway.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's email, set by the auth gateway.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The authenticated caller. Extracted once per request and passed
/// explicitly into every workflow that acts on the caller's behalf.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_from_headers(req))
    }
}

fn session_from_headers(req: &HttpRequest) -> Result<Session, AppError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or(AppError::Unauthorized)?;
    let email = req
        .headers()
        .get(USER_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or(AppError::Unauthorized)?
        .to_string();
    Ok(Session { user_id, email })
}
