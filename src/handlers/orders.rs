use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::orders::{
    CustomerView, MerchandiseOrders, OrderView, ShopOrderView, StatusView,
};
use crate::errors::AppError;
use crate::session::Session;
use crate::AppState;

use super::catalog::ShopResponse;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub id: Uuid,
    /// Derived state: `Pending`, `Paid`, `Received` or `Cancelled`.
    pub status: String,
    pub paid: bool,
    pub received: bool,
    pub received_at: Option<String>,
    pub cancelled: bool,
    pub cancelled_at: Option<String>,
    pub cancel_reason: Option<String>,
}

impl From<StatusView> for StatusResponse {
    fn from(s: StatusView) -> Self {
        StatusResponse {
            id: s.id,
            status: s.state.to_string(),
            paid: s.paid,
            received: s.received,
            received_at: s.received_at.map(|t| t.to_rfc3339()),
            cancelled: s.cancelled,
            cancelled_at: s.cancelled_at.map(|t| t.to_rfc3339()),
            cancel_reason: s.cancel_reason,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub quantity: i32,
    /// Decimal total as a string, e.g. "500.00".
    pub price: String,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub created_at: String,
    pub merch_name: String,
    pub picture_url: Option<String>,
    pub variant_name: String,
    pub receipt_url: Option<String>,
    pub shop: ShopResponse,
    pub status: StatusResponse,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            id: o.id,
            quantity: o.quantity,
            price: o.price.to_string(),
            online_payment: o.online_payment,
            physical_payment: o.physical_payment,
            created_at: o.created_at.to_rfc3339(),
            merch_name: o.merch_name,
            picture_url: o.picture_url,
            variant_name: o.variant_name,
            receipt_url: o.receipt_url,
            shop: o.shop.into(),
            status: o.status.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    pub email: String,
    pub contact_number: String,
    pub college: Option<String>,
    pub program: Option<String>,
    pub year: i32,
    pub section: i32,
}

impl From<CustomerView> for CustomerResponse {
    fn from(c: CustomerView) -> Self {
        CustomerResponse {
            first_name: c.first_name,
            last_name: c.last_name,
            student_number: c.student_number,
            email: c.email,
            contact_number: c.contact_number,
            college: c.college,
            program: c.program,
            year: c.year,
            section: c.section,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopOrderResponse {
    pub id: Uuid,
    pub quantity: i32,
    pub price: String,
    pub variant_name: String,
    pub created_at: String,
    pub customer: CustomerResponse,
    pub status: StatusResponse,
}

impl From<ShopOrderView> for ShopOrderResponse {
    fn from(o: ShopOrderView) -> Self {
        ShopOrderResponse {
            id: o.id,
            quantity: o.quantity,
            price: o.price.to_string(),
            variant_name: o.variant_name,
            created_at: o.created_at.to_rfc3339(),
            customer: o.customer.into(),
            status: o.status.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchandiseOrdersResponse {
    pub merch_id: Uuid,
    pub merch_name: String,
    pub picture_url: Option<String>,
    pub total_quantity: i64,
    pub total_revenue: String,
    pub orders: Vec<ShopOrderResponse>,
}

impl From<MerchandiseOrders> for MerchandiseOrdersResponse {
    fn from(g: MerchandiseOrders) -> Self {
        MerchandiseOrdersResponse {
            merch_id: g.merch_id,
            merch_name: g.merch_name,
            picture_url: g.picture_url,
            total_quantity: g.total_quantity,
            total_revenue: g.total_revenue.to_string(),
            orders: g.orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelRequest {
    /// Why the order is cancelled; blank or absent stores a default.
    pub reason: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Lists the caller's orders, newest first, each with its shop, receipt
/// URL and derived status.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders of the caller", body = Vec<OrderResponse>),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_my_orders(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.my_orders(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /shops/{shop_id}/orders
///
/// Lists a shop's orders grouped by merchandise with per-group quantity
/// and revenue totals. Only officers of the shop may call this.
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/orders",
    params(
        ("shop_id" = Uuid, Path, description = "Shop UUID"),
    ),
    responses(
        (status = 200, description = "Orders grouped by merchandise", body = Vec<MerchandiseOrdersResponse>),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_shop_orders(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let shop_id = path.into_inner();

    let groups = web::block(move || state.orders.shop_orders(&session, shop_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<MerchandiseOrdersResponse> = groups.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /order-statuses/{status_id}/pay
///
/// Marks a pending order as paid. Officers only; paying a received or
/// cancelled order is rejected.
#[utoipa::path(
    post,
    path = "/order-statuses/{status_id}/pay",
    params(
        ("status_id" = Uuid, Path, description = "Order status UUID"),
    ),
    responses(
        (status = 200, description = "Status after the transition", body = StatusResponse),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 404, description = "Order status not found"),
        (status = 409, description = "Transition not allowed from the current state"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-statuses"
)]
pub async fn pay_order(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let status_id = path.into_inner();

    let status = web::block(move || state.statuses.pay(&session, status_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(StatusResponse::from(status)))
}

/// POST /order-statuses/{status_id}/receive
///
/// Marks an order as received by the buyer. Receiving settles payment,
/// so `paid` is set even when the order was never marked paid.
#[utoipa::path(
    post,
    path = "/order-statuses/{status_id}/receive",
    params(
        ("status_id" = Uuid, Path, description = "Order status UUID"),
    ),
    responses(
        (status = 200, description = "Status after the transition", body = StatusResponse),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 404, description = "Order status not found"),
        (status = 409, description = "Transition not allowed from the current state"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-statuses"
)]
pub async fn receive_order(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let status_id = path.into_inner();

    let status = web::block(move || state.statuses.receive(&session, status_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(StatusResponse::from(status)))
}

/// POST /order-statuses/{status_id}/cancel
///
/// Cancels a pending or paid order. The body is optional; a missing or
/// blank reason stores "No reason provided".
#[utoipa::path(
    post,
    path = "/order-statuses/{status_id}/cancel",
    params(
        ("status_id" = Uuid, Path, description = "Order status UUID"),
    ),
    request_body(content = CancelRequest, description = "Optional cancellation reason"),
    responses(
        (status = 200, description = "Status after the transition", body = StatusResponse),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 404, description = "Order status not found"),
        (status = 409, description = "Transition not allowed from the current state"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "order-statuses"
)]
pub async fn cancel_order(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    body: Option<web::Json<CancelRequest>>,
) -> Result<HttpResponse, AppError> {
    let status_id = path.into_inner();
    let reason = body.and_then(|b| b.into_inner().reason);

    let status = web::block(move || state.statuses.cancel(&session, status_id, reason))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(StatusResponse::from(status)))
}
