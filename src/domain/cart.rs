use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::{ShopSummary, VariantView};

pub const MIN_QUANTITY: i32 = 1;

/// Clamp a requested quantity to the storable minimum.
pub fn clamp_quantity(requested: i32) -> i32 {
    requested.max(MIN_QUANTITY)
}

#[derive(Debug, Clone)]
pub struct NewCartLine {
    pub user_id: Uuid,
    pub merch_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i32,
}

/// Partial update of a cart line; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CartLineUpdate {
    pub quantity: Option<i32>,
    pub variant_id: Option<Uuid>,
}

impl CartLineUpdate {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.variant_id.is_none()
    }
}

/// The merchandise block embedded in a cart line, with every variant so
/// the buyer can switch without another round trip.
#[derive(Debug, Clone)]
pub struct CartMerchandise {
    pub id: Uuid,
    pub name: String,
    pub variant_name: String,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub receiving_information: String,
    pub picture_url: Option<String>,
    pub variants: Vec<VariantView>,
}

#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: Uuid,
    pub quantity: i32,
    pub variant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub merchandise: CartMerchandise,
    pub shop: ShopSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_below_one_clamp_to_one() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-5), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(7), 7);
    }
}
