use std::collections::HashMap;

use diesel::prelude::*;
use diesel::PgConnection;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::schema::{merchandise_pictures, officers, variants};

use self::models::{MerchandisePictureRow, VariantRow};

pub mod cart_repo;
pub mod catalog_repo;
pub mod checkout_repo;
pub mod membership_repo;
pub mod models;
pub mod order_repo;
pub mod receipt_store;
pub mod status_repo;

#[cfg(test)]
pub(crate) mod test_support;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Shared guards ─────────────────────────────────────────────────────────────

/// Require `user_id` to be an officer of `shop_id`. Every shop-side
/// operation runs through this before touching shop data.
pub(crate) fn ensure_officer(
    conn: &mut PgConnection,
    user_id: Uuid,
    shop_id: Uuid,
) -> Result<(), DomainError> {
    let is_officer: bool = diesel::select(diesel::dsl::exists(
        officers::table
            .filter(officers::user_id.eq(user_id))
            .filter(officers::shop_id.eq(shop_id)),
    ))
    .get_result(conn)?;
    if is_officer {
        Ok(())
    } else {
        Err(DomainError::NotOfficer)
    }
}

// ── Shared catalog lookups ────────────────────────────────────────────────────

/// First picture of each merchandise, keyed by merchandise id.
pub(crate) fn first_pictures(
    conn: &mut PgConnection,
    merch_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, DomainError> {
    let rows: Vec<MerchandisePictureRow> = merchandise_pictures::table
        .filter(merchandise_pictures::merch_id.eq_any(merch_ids))
        .order(merchandise_pictures::id.asc())
        .select(MerchandisePictureRow::as_select())
        .load(conn)?;
    let mut first = HashMap::new();
    for row in rows {
        first.entry(row.merch_id).or_insert(row.picture_url);
    }
    Ok(first)
}

/// All variants of the given merchandises, keyed by merchandise id.
pub(crate) fn variants_by_merch(
    conn: &mut PgConnection,
    merch_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<VariantRow>>, DomainError> {
    let rows: Vec<VariantRow> = variants::table
        .filter(variants::merch_id.eq_any(merch_ids))
        .order(variants::name.asc())
        .select(VariantRow::as_select())
        .load(conn)?;
    let mut by_merch: HashMap<Uuid, Vec<VariantRow>> = HashMap::new();
    for row in rows {
        by_merch.entry(row.merch_id).or_default().push(row);
    }
    Ok(by_merch)
}
