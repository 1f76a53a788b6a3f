use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{
    cheapest_prices, MerchandiseDetail, MerchandiseSummary, PictureView, ShopDetail, ShopSummary,
    VariantView,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{
    categories, colleges, merchandise_categories, merchandise_pictures, merchandises, shops,
    variants,
};

use super::models::{MerchandisePictureRow, MerchandiseRow, ShopRow, VariantRow};
use super::{first_pictures, variants_by_merch};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn list_shops(&self) -> Result<Vec<ShopSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = shops::table
            .order(shops::acronym.asc())
            .select(ShopRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(ShopSummary::from).collect())
    }

    fn find_shop(&self, shop_id: Uuid) -> Result<Option<ShopDetail>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = shops::table
            .left_join(colleges::table)
            .filter(shops::id.eq(shop_id))
            .select((ShopRow::as_select(), colleges::name.nullable()))
            .first::<(ShopRow, Option<String>)>(&mut conn)
            .optional()?;

        Ok(row.map(|(shop, college)| ShopDetail {
            id: shop.id,
            name: shop.name,
            acronym: shop.acronym,
            email: shop.email,
            socmed_url: shop.socmed_url,
            logo_url: shop.logo_url,
            college,
        }))
    }

    fn list_merchandise(&self, shop_id: Uuid) -> Result<Vec<MerchandiseSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let shop: ShopRow = shops::table
            .filter(shops::id.eq(shop_id))
            .select(ShopRow::as_select())
            .first(&mut conn)
            .optional()?
            .ok_or(DomainError::NotFound("Shop"))?;
        let shop = ShopSummary::from(shop);

        let merch: Vec<MerchandiseRow> = merchandises::table
            .filter(merchandises::shop_id.eq(shop_id))
            .order(merchandises::created_at.desc())
            .select(MerchandiseRow::as_select())
            .load(&mut conn)?;

        let merch_ids: Vec<Uuid> = merch.iter().map(|m| m.id).collect();
        let mut pictures = first_pictures(&mut conn, &merch_ids)?;
        let mut variant_map = variants_by_merch(&mut conn, &merch_ids)?;

        Ok(merch
            .into_iter()
            .map(|m| {
                let variant_views: Vec<VariantView> = variant_map
                    .remove(&m.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(VariantView::from)
                    .collect();
                let (min_original_price, min_membership_price) =
                    match cheapest_prices(&variant_views) {
                        Some((original, membership)) => (Some(original), Some(membership)),
                        None => (None, None),
                    };
                MerchandiseSummary {
                    id: m.id,
                    name: m.name,
                    picture_url: pictures.remove(&m.id),
                    min_original_price,
                    min_membership_price,
                    created_at: m.created_at,
                    shop: shop.clone(),
                }
            })
            .collect())
    }

    fn find_merchandise(&self, merch_id: Uuid) -> Result<Option<MerchandiseDetail>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = merchandises::table
            .inner_join(shops::table)
            .filter(merchandises::id.eq(merch_id))
            .select((MerchandiseRow::as_select(), ShopRow::as_select()))
            .first::<(MerchandiseRow, ShopRow)>(&mut conn)
            .optional()?;

        let Some((merch, shop)) = row else {
            return Ok(None);
        };

        let pictures: Vec<MerchandisePictureRow> = merchandise_pictures::table
            .filter(merchandise_pictures::merch_id.eq(merch.id))
            .order(merchandise_pictures::id.asc())
            .select(MerchandisePictureRow::as_select())
            .load(&mut conn)?;

        let variant_rows: Vec<VariantRow> = variants::table
            .filter(variants::merch_id.eq(merch.id))
            .order(variants::name.asc())
            .select(VariantRow::as_select())
            .load(&mut conn)?;

        let category_names: Vec<String> = merchandise_categories::table
            .inner_join(categories::table)
            .filter(merchandise_categories::merch_id.eq(merch.id))
            .order(categories::name.asc())
            .select(categories::name)
            .load(&mut conn)?;

        Ok(Some(MerchandiseDetail {
            id: merch.id,
            name: merch.name,
            description: merch.description,
            receiving_information: merch.receiving_information,
            variant_name: merch.variant_name,
            online_payment: merch.online_payment,
            physical_payment: merch.physical_payment,
            created_at: merch.created_at,
            pictures: pictures.into_iter().map(PictureView::from).collect(),
            variants: variant_rows.into_iter().map(VariantView::from).collect(),
            categories: category_names,
            shop: ShopSummary::from(shop),
        }))
    }
}
