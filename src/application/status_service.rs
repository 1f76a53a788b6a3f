use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::orders::StatusView;
use crate::domain::ports::StatusRepository;
use crate::domain::status::StatusAction;
use crate::session::Session;

pub struct StatusService<R> {
    repo: R,
}

impl<R: StatusRepository> StatusService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn pay(&self, session: &Session, status_id: Uuid) -> Result<StatusView, DomainError> {
        self.repo.apply(session.user_id, status_id, StatusAction::Pay)
    }

    pub fn receive(&self, session: &Session, status_id: Uuid) -> Result<StatusView, DomainError> {
        self.repo
            .apply(session.user_id, status_id, StatusAction::Receive)
    }

    pub fn cancel(
        &self,
        session: &Session,
        status_id: Uuid,
        reason: Option<String>,
    ) -> Result<StatusView, DomainError> {
        self.repo
            .apply(session.user_id, status_id, StatusAction::Cancel { reason })
    }
}
