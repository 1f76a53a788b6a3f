use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::checkout_service::CheckoutLine;
use crate::domain::checkout::LineOutcome;
use crate::errors::AppError;
use crate::session::Session;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutLineRequest {
    pub cart_order_id: Uuid,
    /// `"irl"` or `"online"`.
    pub payment_method: String,
    /// Base64-encoded receipt image, required when paying online.
    pub receipt: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub lines: Vec<CheckoutLineRequest>,
}

/// Outcome of one submitted cart line. On success the order fields are
/// set and `error` is null; on failure only `cart_order_id` and `error`
/// carry data.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutLineResponse {
    pub cart_order_id: Uuid,
    pub order_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub merch_name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<String>,
    pub error: Option<String>,
}

impl From<LineOutcome> for CheckoutLineResponse {
    fn from(outcome: LineOutcome) -> Self {
        match outcome.result {
            Ok(placed) => CheckoutLineResponse {
                cart_order_id: outcome.cart_order_id,
                order_id: Some(placed.order_id),
                status_id: Some(placed.status_id),
                payment_id: placed.payment_id,
                merch_name: Some(placed.merch_name),
                quantity: Some(placed.quantity),
                price: Some(placed.price.to_string()),
                error: None,
            },
            Err(e) => CheckoutLineResponse {
                cart_order_id: outcome.cart_order_id,
                order_id: None,
                status_id: None,
                payment_id: None,
                merch_name: None,
                quantity: None,
                price: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub results: Vec<CheckoutLineResponse>,
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// POST /checkout
///
/// Checks out a batch of cart lines. Lines are processed independently
/// and each reports its own outcome, so a rejected line never blocks the
/// rest of the batch. Online lines must carry a base64 receipt; it is
/// stored before the order is placed and deleted again if placing fails.
#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Per-line checkout outcomes", body = CheckoutResponse),
        (status = 400, description = "Empty batch"),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "checkout"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.lines.is_empty() {
        return Err(AppError::BadRequest("Nothing to check out".to_string()));
    }

    let lines: Vec<CheckoutLine> = body
        .lines
        .into_iter()
        .map(|l| CheckoutLine {
            cart_order_id: l.cart_order_id,
            payment_method: l.payment_method,
            receipt: l.receipt,
        })
        .collect();

    let outcomes = web::block(move || state.checkout.checkout(&session, lines))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let results: Vec<CheckoutLineResponse> = outcomes.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(CheckoutResponse { results }))
}
