use uuid::Uuid;

use crate::domain::dashboard::{aggregate, DashboardReport};
use crate::domain::errors::DomainError;
use crate::domain::ports::OrderRepository;
use crate::session::Session;

pub struct DashboardService<R> {
    repo: R,
}

impl<R: OrderRepository> DashboardService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn report(&self, session: &Session, shop_id: Uuid) -> Result<DashboardReport, DomainError> {
        let facts = self.repo.order_facts(session.user_id, shop_id)?;
        Ok(aggregate(&facts))
    }
}
