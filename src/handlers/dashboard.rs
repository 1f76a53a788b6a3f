use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::dashboard::{CollegeTally, DashboardReport, MerchandiseTally, StatusTally};
use crate::errors::AppError;
use crate::session::Session;
use crate::AppState;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchandiseTallyResponse {
    pub merch_id: Uuid,
    pub merch_name: String,
    pub orders: i64,
    pub quantity: i64,
}

impl From<MerchandiseTally> for MerchandiseTallyResponse {
    fn from(t: MerchandiseTally) -> Self {
        MerchandiseTallyResponse {
            merch_id: t.merch_id,
            merch_name: t.merch_name,
            orders: t.orders,
            quantity: t.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusTallyResponse {
    pub status: String,
    pub orders: i64,
    pub quantity: i64,
}

impl From<StatusTally> for StatusTallyResponse {
    fn from(t: StatusTally) -> Self {
        StatusTallyResponse {
            status: t.state.to_string(),
            orders: t.orders,
            quantity: t.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollegeTallyResponse {
    /// College name, or null for buyers without one on their profile.
    pub college: Option<String>,
    pub orders: i64,
    pub quantity: i64,
}

impl From<CollegeTally> for CollegeTallyResponse {
    fn from(t: CollegeTally) -> Self {
        CollegeTallyResponse {
            college: t.college,
            orders: t.orders,
            quantity: t.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_orders: i64,
    pub by_merchandise: Vec<MerchandiseTallyResponse>,
    pub by_status: Vec<StatusTallyResponse>,
    pub by_college: Vec<CollegeTallyResponse>,
}

impl From<DashboardReport> for DashboardResponse {
    fn from(r: DashboardReport) -> Self {
        DashboardResponse {
            total_orders: r.total_orders,
            by_merchandise: r.by_merchandise.into_iter().map(Into::into).collect(),
            by_status: r.by_status.into_iter().map(Into::into).collect(),
            by_college: r.by_college.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// GET /shops/{shop_id}/dashboard
///
/// Tallies the shop's orders by merchandise, by derived status and by the
/// buyer's college. Every order lands in exactly one bucket per axis.
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/dashboard",
    params(
        ("shop_id" = Uuid, Path, description = "Shop UUID"),
    ),
    responses(
        (status = 200, description = "Fulfillment report", body = DashboardResponse),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn shop_dashboard(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let shop_id = path.into_inner();

    let report = web::block(move || state.dashboard.report(&session, shop_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(DashboardResponse::from(report)))
}
