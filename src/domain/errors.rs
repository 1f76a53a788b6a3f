use thiserror::Error;

use super::status::OrderState;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not an officer of this shop")]
    NotOfficer,
    #[error("A payment receipt is required for online payment")]
    ReceiptRequired,
    #[error("Merchandise does not accept {0} payment")]
    PaymentNotOffered(&'static str),
    #[error("Cannot {action} an order that is {from}")]
    InvalidTransition {
        from: OrderState,
        action: &'static str,
    },
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("Receipt storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
