use uuid::Uuid;

use crate::domain::catalog::ShopSummary;
use crate::domain::errors::DomainError;
use crate::domain::membership::{MemberRoster, MembershipView};
use crate::domain::ports::MembershipRepository;
use crate::session::Session;

pub struct MembershipService<R> {
    repo: R,
}

impl<R: MembershipRepository> MembershipService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn my_memberships(&self, session: &Session) -> Result<Vec<ShopSummary>, DomainError> {
        self.repo
            .shops_for_member(session.user_id, &session.email)
    }

    pub fn managed_shops(&self, session: &Session) -> Result<Vec<ShopSummary>, DomainError> {
        self.repo.managed_shops(session.user_id)
    }

    pub fn roster(&self, session: &Session, shop_id: Uuid) -> Result<MemberRoster, DomainError> {
        self.repo.roster(session.user_id, shop_id)
    }

    pub fn add_member(
        &self,
        session: &Session,
        shop_id: Uuid,
        email: &str,
    ) -> Result<MembershipView, DomainError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::InvalidInput("Email is required".to_string()));
        }
        self.repo.add_member(session.user_id, shop_id, email)
    }
}
