use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{CartLineUpdate, CartLineView, CartMerchandise};
use crate::errors::AppError;
use crate::session::Session;
use crate::AppState;

use super::catalog::{ShopResponse, VariantResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartLineRequest {
    pub merch_id: Uuid,
    pub variant_id: Uuid,
    /// Requested quantity; values below 1 are stored as 1.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartLineRequest {
    pub quantity: Option<i32>,
    pub variant_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartMerchandiseResponse {
    pub id: Uuid,
    pub name: String,
    pub variant_name: String,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub receiving_information: String,
    pub picture_url: Option<String>,
    pub variants: Vec<VariantResponse>,
}

impl From<CartMerchandise> for CartMerchandiseResponse {
    fn from(m: CartMerchandise) -> Self {
        CartMerchandiseResponse {
            id: m.id,
            name: m.name,
            variant_name: m.variant_name,
            online_payment: m.online_payment,
            physical_payment: m.physical_payment,
            receiving_information: m.receiving_information,
            picture_url: m.picture_url,
            variants: m.variants.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub id: Uuid,
    pub quantity: i32,
    pub variant_id: Uuid,
    pub created_at: String,
    pub merchandise: CartMerchandiseResponse,
    pub shop: ShopResponse,
}

impl From<CartLineView> for CartLineResponse {
    fn from(line: CartLineView) -> Self {
        CartLineResponse {
            id: line.id,
            quantity: line.quantity,
            variant_id: line.variant_id,
            created_at: line.created_at.to_rfc3339(),
            merchandise: line.merchandise.into(),
            shop: line.shop.into(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /cart
///
/// Lists the caller's cart lines grouped by shop acronym, each with the
/// merchandise block and every variant so the client can switch without
/// another round trip.
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart lines of the caller", body = Vec<CartLineResponse>),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn list_cart(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let lines = web::block(move || state.cart.list(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CartLineResponse> = lines.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /cart
///
/// Adds a merchandise variant to the caller's cart and returns the stored
/// line as read back from the database.
#[utoipa::path(
    post,
    path = "/cart",
    request_body = AddCartLineRequest,
    responses(
        (status = 201, description = "Cart line created", body = CartLineResponse),
        (status = 400, description = "Variant does not belong to the merchandise"),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 404, description = "Merchandise or variant not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn add_cart_line(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<AddCartLineRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let line = web::block(move || {
        state
            .cart
            .add(&session, body.merch_id, body.variant_id, body.quantity)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CartLineResponse::from(line)))
}

/// PATCH /cart/{line_id}
///
/// Updates the quantity and/or variant of one cart line. Only the
/// caller's own lines are reachable.
#[utoipa::path(
    patch,
    path = "/cart/{line_id}",
    params(
        ("line_id" = Uuid, Path, description = "Cart line UUID"),
    ),
    request_body = UpdateCartLineRequest,
    responses(
        (status = 200, description = "Updated cart line", body = CartLineResponse),
        (status = 400, description = "Empty update or foreign variant"),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 404, description = "Cart line not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn update_cart_line(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCartLineRequest>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();
    let body = body.into_inner();

    let line = web::block(move || {
        state.cart.update(
            &session,
            line_id,
            CartLineUpdate {
                quantity: body.quantity,
                variant_id: body.variant_id,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartLineResponse::from(line)))
}

/// DELETE /cart/{line_id}
///
/// Removes one cart line belonging to the caller.
#[utoipa::path(
    delete,
    path = "/cart/{line_id}",
    params(
        ("line_id" = Uuid, Path, description = "Cart line UUID"),
    ),
    responses(
        (status = 204, description = "Cart line removed"),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 404, description = "Cart line not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn remove_cart_line(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();

    web::block(move || state.cart.remove(&session, line_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
