use uuid::Uuid;

use super::cart::{CartLineUpdate, CartLineView, NewCartLine};
use super::catalog::{MerchandiseDetail, MerchandiseSummary, ShopDetail, ShopSummary};
use super::checkout::{LineQuote, PlaceOrder, PlacedOrder};
use super::dashboard::OrderFacts;
use super::errors::DomainError;
use super::membership::{MemberRoster, MembershipView};
use super::orders::{MerchandiseOrders, OrderView, StatusView};
use super::status::StatusAction;

pub trait CatalogRepository: Send + Sync + 'static {
    fn list_shops(&self) -> Result<Vec<ShopSummary>, DomainError>;
    fn find_shop(&self, shop_id: Uuid) -> Result<Option<ShopDetail>, DomainError>;
    fn list_merchandise(&self, shop_id: Uuid) -> Result<Vec<MerchandiseSummary>, DomainError>;
    fn find_merchandise(&self, merch_id: Uuid) -> Result<Option<MerchandiseDetail>, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn list_lines(&self, user_id: Uuid) -> Result<Vec<CartLineView>, DomainError>;
    fn add_line(&self, line: NewCartLine) -> Result<CartLineView, DomainError>;
    fn update_line(
        &self,
        user_id: Uuid,
        line_id: Uuid,
        changes: CartLineUpdate,
    ) -> Result<CartLineView, DomainError>;
    fn remove_line(&self, user_id: Uuid, line_id: Uuid) -> Result<(), DomainError>;
}

pub trait CheckoutRepository: Send + Sync + 'static {
    /// Price one cart line for the buyer without locking it.
    fn quote_line(&self, user_id: Uuid, email: &str, line_id: Uuid)
        -> Result<LineQuote, DomainError>;
    /// Convert one cart line into an order, atomically: re-quote under a
    /// row lock, insert status/order/payment rows and delete the line.
    fn place_order(&self, cmd: &PlaceOrder) -> Result<PlacedOrder, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderView>, DomainError>;
    /// Shop-side order listing, grouped by merchandise. `actor` must be an
    /// officer of the shop.
    fn orders_for_shop(
        &self,
        actor: Uuid,
        shop_id: Uuid,
    ) -> Result<Vec<MerchandiseOrders>, DomainError>;
    /// Flat per-order facts for the shop dashboard. `actor` must be an
    /// officer of the shop.
    fn order_facts(&self, actor: Uuid, shop_id: Uuid) -> Result<Vec<OrderFacts>, DomainError>;
}

pub trait StatusRepository: Send + Sync + 'static {
    /// Apply a lifecycle action to an order status under a row lock and
    /// return the stored result. `actor` must be an officer of the shop
    /// that owns the order.
    fn apply(
        &self,
        actor: Uuid,
        status_id: Uuid,
        action: StatusAction,
    ) -> Result<StatusView, DomainError>;
}

pub trait MembershipRepository: Send + Sync + 'static {
    /// Shops in which the given email holds a membership.
    fn shops_for_member(&self, user_id: Uuid, email: &str) -> Result<Vec<ShopSummary>, DomainError>;
    /// Shops the user manages as an officer.
    fn managed_shops(&self, user_id: Uuid) -> Result<Vec<ShopSummary>, DomainError>;
    fn roster(&self, actor: Uuid, shop_id: Uuid) -> Result<MemberRoster, DomainError>;
    fn add_member(
        &self,
        actor: Uuid,
        shop_id: Uuid,
        email: &str,
    ) -> Result<MembershipView, DomainError>;
}

/// Storage bucket for uploaded pictures. Mirrors the object-storage layout
/// the public URLs are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    PaymentPicture,
    MerchPicture,
    ShopPicture,
    CategoryPicture,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::PaymentPicture => "payment-picture",
            Bucket::MerchPicture => "merch-picture",
            Bucket::ShopPicture => "shop-picture",
            Bucket::CategoryPicture => "category-picture",
        }
    }
}

pub trait ReceiptStore: Send + Sync + 'static {
    /// Store `bytes` under `bucket/key` and return the public URL.
    fn store(&self, bucket: Bucket, key: &str, bytes: &[u8]) -> Result<String, DomainError>;
    /// Remove a stored object. Used to compensate when order creation
    /// fails after the receipt was written.
    fn remove(&self, bucket: Bucket, key: &str) -> Result<(), DomainError>;
}
