use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ShopSummary {
    pub id: Uuid,
    pub name: String,
    pub acronym: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShopDetail {
    pub id: Uuid,
    pub name: String,
    pub acronym: String,
    pub email: Option<String>,
    pub socmed_url: Option<String>,
    pub logo_url: Option<String>,
    pub college: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VariantView {
    pub id: Uuid,
    pub name: String,
    pub picture_url: Option<String>,
    pub original_price: BigDecimal,
    pub membership_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct PictureView {
    pub id: Uuid,
    pub picture_url: String,
}

/// A merchandise card as shown on shop pages: first picture plus the
/// cheapest prices across its variants.
#[derive(Debug, Clone)]
pub struct MerchandiseSummary {
    pub id: Uuid,
    pub name: String,
    pub picture_url: Option<String>,
    pub min_original_price: Option<BigDecimal>,
    pub min_membership_price: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub shop: ShopSummary,
}

#[derive(Debug, Clone)]
pub struct MerchandiseDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub receiving_information: String,
    pub variant_name: String,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub created_at: DateTime<Utc>,
    pub pictures: Vec<PictureView>,
    pub variants: Vec<VariantView>,
    pub categories: Vec<String>,
    pub shop: ShopSummary,
}

/// Cheapest (original, membership) price pair across variants, or `None`
/// when the merchandise has no variants yet.
pub fn cheapest_prices(variants: &[VariantView]) -> Option<(BigDecimal, BigDecimal)> {
    let original = variants.iter().map(|v| &v.original_price).min()?;
    let membership = variants.iter().map(|v| &v.membership_price).min()?;
    Some((original.clone(), membership.clone()))
}
