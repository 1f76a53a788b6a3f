use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(what) => AppError::NotFound(what),
            DomainError::InvalidInput(_)
            | DomainError::ReceiptRequired
            | DomainError::PaymentNotOffered(_) => AppError::BadRequest(e.to_string()),
            DomainError::NotOfficer => AppError::Forbidden(e.to_string()),
            DomainError::InvalidTransition { .. } | DomainError::AlreadyExists(_) => {
                AppError::Conflict(e.to_string())
            }
            DomainError::Storage(msg) | DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |msg: String| serde_json::json!({ "error": msg });
        match self {
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(body(self.to_string())),
            AppError::Unauthorized => HttpResponse::Unauthorized().json(body(self.to_string())),
            AppError::Forbidden(_) => HttpResponse::Forbidden().json(body(self.to_string())),
            AppError::NotFound(_) => HttpResponse::NotFound().json(body(self.to_string())),
            AppError::Conflict(_) => HttpResponse::Conflict().json(body(self.to_string())),
            AppError::Internal(_) => HttpResponse::InternalServerError()
                .json(body("Internal server error".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    use crate::domain::status::OrderState;

    #[test]
    fn bad_request_returns_400() {
        let err = AppError::BadRequest("Invalid input: quantity".to_string());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_returns_401() {
        assert_eq!(
            AppError::Unauthorized.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn forbidden_returns_403() {
        let err = AppError::Forbidden("Not an officer of this shop".to_string());
        assert_eq!(err.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order").error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_returns_409() {
        let err = AppError::Conflict("Membership already exists".to_string());
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_returns_500_and_hides_detail() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_display() {
        assert_eq!(AppError::NotFound("Order").to_string(), "Order not found");
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound("Cart line").into();
        assert!(matches!(app_err, AppError::NotFound("Cart line")));
    }

    #[test]
    fn domain_invalid_input_maps_to_bad_request() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::BadRequest(_)));
    }

    #[test]
    fn domain_receipt_required_maps_to_bad_request() {
        let app_err: AppError = DomainError::ReceiptRequired.into();
        assert!(matches!(app_err, AppError::BadRequest(_)));
    }

    #[test]
    fn domain_not_officer_maps_to_forbidden() {
        let app_err: AppError = DomainError::NotOfficer.into();
        assert!(matches!(app_err, AppError::Forbidden(_)));
    }

    #[test]
    fn domain_invalid_transition_maps_to_conflict() {
        let app_err: AppError = DomainError::InvalidTransition {
            from: OrderState::Cancelled,
            action: "receive",
        }
        .into();
        match app_err {
            AppError::Conflict(msg) => {
                assert_eq!(msg, "Cannot receive an order that is Cancelled")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
