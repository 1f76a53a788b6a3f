use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::orders::{MerchandiseOrders, OrderView};
use crate::domain::ports::OrderRepository;
use crate::session::Session;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn my_orders(&self, session: &Session) -> Result<Vec<OrderView>, DomainError> {
        self.repo.orders_for_user(session.user_id)
    }

    pub fn shop_orders(
        &self,
        session: &Session,
        shop_id: Uuid,
    ) -> Result<Vec<MerchandiseOrders>, DomainError> {
        self.repo.orders_for_shop(session.user_id, shop_id)
    }
}
