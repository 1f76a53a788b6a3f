use uuid::Uuid;

use crate::domain::catalog::{MerchandiseDetail, MerchandiseSummary, ShopDetail, ShopSummary};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_shops(&self) -> Result<Vec<ShopSummary>, DomainError> {
        self.repo.list_shops()
    }

    pub fn get_shop(&self, shop_id: Uuid) -> Result<Option<ShopDetail>, DomainError> {
        self.repo.find_shop(shop_id)
    }

    pub fn list_merchandise(&self, shop_id: Uuid) -> Result<Vec<MerchandiseSummary>, DomainError> {
        self.repo.list_merchandise(shop_id)
    }

    pub fn get_merchandise(&self, merch_id: Uuid) -> Result<Option<MerchandiseDetail>, DomainError> {
        self.repo.find_merchandise(merch_id)
    }
}
