use uuid::Uuid;

use crate::domain::cart::{clamp_quantity, CartLineUpdate, CartLineView, NewCartLine};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::session::Session;

pub struct CartService<R> {
    repo: R,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self, session: &Session) -> Result<Vec<CartLineView>, DomainError> {
        self.repo.list_lines(session.user_id)
    }

    pub fn add(
        &self,
        session: &Session,
        merch_id: Uuid,
        variant_id: Uuid,
        quantity: i32,
    ) -> Result<CartLineView, DomainError> {
        self.repo.add_line(NewCartLine {
            user_id: session.user_id,
            merch_id,
            variant_id,
            quantity: clamp_quantity(quantity),
        })
    }

    pub fn update(
        &self,
        session: &Session,
        line_id: Uuid,
        mut changes: CartLineUpdate,
    ) -> Result<CartLineView, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::InvalidInput(
                "Nothing to update".to_string(),
            ));
        }
        changes.quantity = changes.quantity.map(clamp_quantity);
        self.repo.update_line(session.user_id, line_id, changes)
    }

    pub fn remove(&self, session: &Session, line_id: Uuid) -> Result<(), DomainError> {
        self.repo.remove_line(session.user_id, line_id)
    }
}
