use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::{PictureView, ShopSummary, VariantView};
use crate::domain::status::StatusFlags;
use crate::schema::{
    cart_orders, memberships, merchandise_pictures, merchandises, order_statuses, orders,
    payments, profiles, shops, variants,
};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = shops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShopRow {
    pub id: Uuid,
    pub name: String,
    pub acronym: String,
    pub email: Option<String>,
    pub socmed_url: Option<String>,
    pub logo_url: Option<String>,
    pub college_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<ShopRow> for ShopSummary {
    fn from(row: ShopRow) -> Self {
        ShopSummary {
            id: row.id,
            name: row.name,
            acronym: row.acronym,
            logo_url: row.logo_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = merchandises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MerchandiseRow {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub description: String,
    pub receiving_information: String,
    pub variant_name: String,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = variants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VariantRow {
    pub id: Uuid,
    pub merch_id: Uuid,
    pub name: String,
    pub picture_url: Option<String>,
    pub original_price: BigDecimal,
    pub membership_price: BigDecimal,
}

impl From<VariantRow> for VariantView {
    fn from(row: VariantRow) -> Self {
        VariantView {
            id: row.id,
            name: row.name,
            picture_url: row.picture_url,
            original_price: row.original_price,
            membership_price: row.membership_price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = merchandise_pictures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MerchandisePictureRow {
    pub id: Uuid,
    pub merch_id: Uuid,
    pub picture_url: String,
}

impl From<MerchandisePictureRow> for PictureView {
    fn from(row: MerchandisePictureRow) -> Self {
        PictureView {
            id: row.id,
            picture_url: row.picture_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    pub contact_number: String,
    pub college_id: Option<Uuid>,
    pub program_id: Option<Uuid>,
    pub year: i32,
    pub section: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartOrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub merch_id: Uuid,
    pub variant_id: Uuid,
    pub shop_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_orders)]
pub struct NewCartOrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub merch_id: Uuid,
    pub variant_id: Uuid,
    pub shop_id: Uuid,
    pub quantity: i32,
}

/// Partial cart line update; `None` fields stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = cart_orders)]
pub struct CartOrderChangeset {
    pub quantity: Option<i32>,
    pub variant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = order_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderStatusRow {
    pub id: Uuid,
    pub paid: bool,
    pub received: bool,
    pub received_at: Option<DateTime<Utc>>,
    pub cancelled: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OrderStatusRow {
    pub fn flags(&self) -> StatusFlags {
        StatusFlags {
            paid: self.paid,
            received: self.received,
            received_at: self.received_at,
            cancelled: self.cancelled,
            cancelled_at: self.cancelled_at,
            cancel_reason: self.cancel_reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub merch_id: Uuid,
    pub variant_id: Uuid,
    pub shop_id: Uuid,
    pub status_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub merch_id: Uuid,
    pub variant_id: Uuid,
    pub shop_id: Uuid,
    pub status_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub online_payment: bool,
    pub physical_payment: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payments)]
pub struct NewPaymentRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub picture_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = memberships)]
pub struct NewMembershipRow {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
}
