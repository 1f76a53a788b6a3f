use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::{
    MerchandiseDetail, MerchandiseSummary, PictureView, ShopDetail, ShopSummary, VariantView,
};
use crate::errors::AppError;
use crate::AppState;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopResponse {
    pub id: Uuid,
    pub name: String,
    pub acronym: String,
    pub logo_url: Option<String>,
}

impl From<ShopSummary> for ShopResponse {
    fn from(shop: ShopSummary) -> Self {
        ShopResponse {
            id: shop.id,
            name: shop.name,
            acronym: shop.acronym,
            logo_url: shop.logo_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub acronym: String,
    pub email: Option<String>,
    pub socmed_url: Option<String>,
    pub logo_url: Option<String>,
    pub college: Option<String>,
}

impl From<ShopDetail> for ShopDetailResponse {
    fn from(shop: ShopDetail) -> Self {
        ShopDetailResponse {
            id: shop.id,
            name: shop.name,
            acronym: shop.acronym,
            email: shop.email,
            socmed_url: shop.socmed_url,
            logo_url: shop.logo_url,
            college: shop.college,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariantResponse {
    pub id: Uuid,
    pub name: String,
    pub picture_url: Option<String>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "250.00"
    pub original_price: String,
    pub membership_price: String,
}

impl From<VariantView> for VariantResponse {
    fn from(v: VariantView) -> Self {
        VariantResponse {
            id: v.id,
            name: v.name,
            picture_url: v.picture_url,
            original_price: v.original_price.to_string(),
            membership_price: v.membership_price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PictureResponse {
    pub id: Uuid,
    pub picture_url: String,
}

impl From<PictureView> for PictureResponse {
    fn from(p: PictureView) -> Self {
        PictureResponse {
            id: p.id,
            picture_url: p.picture_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchandiseSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub picture_url: Option<String>,
    pub min_original_price: Option<String>,
    pub min_membership_price: Option<String>,
    pub created_at: String,
    pub shop: ShopResponse,
}

impl From<MerchandiseSummary> for MerchandiseSummaryResponse {
    fn from(m: MerchandiseSummary) -> Self {
        MerchandiseSummaryResponse {
            id: m.id,
            name: m.name,
            picture_url: m.picture_url,
            min_original_price: m.min_original_price.map(|p| p.to_string()),
            min_membership_price: m.min_membership_price.map(|p| p.to_string()),
            created_at: m.created_at.to_rfc3339(),
            shop: m.shop.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchandiseDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub receiving_information: String,
    pub variant_name: String,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub created_at: String,
    pub pictures: Vec<PictureResponse>,
    pub variants: Vec<VariantResponse>,
    pub categories: Vec<String>,
    pub shop: ShopResponse,
}

impl From<MerchandiseDetail> for MerchandiseDetailResponse {
    fn from(m: MerchandiseDetail) -> Self {
        MerchandiseDetailResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            receiving_information: m.receiving_information,
            variant_name: m.variant_name,
            online_payment: m.online_payment,
            physical_payment: m.physical_payment,
            created_at: m.created_at.to_rfc3339(),
            pictures: m.pictures.into_iter().map(Into::into).collect(),
            variants: m.variants.into_iter().map(Into::into).collect(),
            categories: m.categories,
            shop: m.shop.into(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /shops
///
/// Lists every shop on the platform, ordered by acronym.
#[utoipa::path(
    get,
    path = "/shops",
    responses(
        (status = 200, description = "List of shops", body = Vec<ShopResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_shops(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let shops = web::block(move || state.catalog.list_shops())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ShopResponse> = shops.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /shops/{shop_id}
///
/// Returns one shop with its contact details and college.
#[utoipa::path(
    get,
    path = "/shops/{shop_id}",
    params(
        ("shop_id" = Uuid, Path, description = "Shop UUID"),
    ),
    responses(
        (status = 200, description = "Shop found", body = ShopDetailResponse),
        (status = 404, description = "Shop not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn get_shop(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let shop_id = path.into_inner();

    let shop = web::block(move || state.catalog.get_shop(shop_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??
        .ok_or(AppError::NotFound("Shop"))?;

    Ok(HttpResponse::Ok().json(ShopDetailResponse::from(shop)))
}

/// GET /shops/{shop_id}/merchandise
///
/// Lists the shop's merchandise as storefront cards: first picture plus
/// the cheapest original and membership prices across variants, newest
/// first.
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/merchandise",
    params(
        ("shop_id" = Uuid, Path, description = "Shop UUID"),
    ),
    responses(
        (status = 200, description = "Merchandise of the shop", body = Vec<MerchandiseSummaryResponse>),
        (status = 404, description = "Shop not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_shop_merchandise(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let shop_id = path.into_inner();

    let merchandise = web::block(move || state.catalog.list_merchandise(shop_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<MerchandiseSummaryResponse> =
        merchandise.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /merchandise/{merch_id}
///
/// Returns the full merchandise page: pictures, variants with both price
/// tiers, categories and the owning shop.
#[utoipa::path(
    get,
    path = "/merchandise/{merch_id}",
    params(
        ("merch_id" = Uuid, Path, description = "Merchandise UUID"),
    ),
    responses(
        (status = 200, description = "Merchandise found", body = MerchandiseDetailResponse),
        (status = 404, description = "Merchandise not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn get_merchandise(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let merch_id = path.into_inner();

    let merch = web::block(move || state.catalog.get_merchandise(merch_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??
        .ok_or(AppError::NotFound("Merchandise"))?;

    Ok(HttpResponse::Ok().json(MerchandiseDetailResponse::from(merch)))
}
