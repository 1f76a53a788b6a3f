use std::fmt;

use chrono::{DateTime, Utc};

use super::errors::DomainError;

/// Reason recorded when an order is cancelled without one.
pub const DEFAULT_CANCEL_REASON: &str = "No reason provided";

/// Lifecycle state of an order, derived from its status flags.
///
/// `Received` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderState {
    Pending,
    Paid,
    Received,
    Cancelled,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "Pending",
            OrderState::Paid => "Paid",
            OrderState::Received => "Received",
            OrderState::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw flags persisted for an order status row.
///
/// The flags are not mutually exclusive on disk; [`StatusFlags::state`]
/// collapses them with cancelled taking precedence over received, and
/// received over paid.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFlags {
    pub paid: bool,
    pub received: bool,
    pub received_at: Option<DateTime<Utc>>,
    pub cancelled: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

impl StatusFlags {
    /// Flags of a freshly created order.
    pub fn new() -> Self {
        StatusFlags {
            paid: false,
            received: false,
            received_at: None,
            cancelled: false,
            cancelled_at: None,
            cancel_reason: None,
        }
    }

    pub fn state(&self) -> OrderState {
        if self.cancelled {
            OrderState::Cancelled
        } else if self.received {
            OrderState::Received
        } else if self.paid {
            OrderState::Paid
        } else {
            OrderState::Pending
        }
    }
}

impl Default for StatusFlags {
    fn default() -> Self {
        StatusFlags::new()
    }
}

/// An action an officer can apply to an order status.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusAction {
    Pay,
    Receive,
    Cancel { reason: Option<String> },
}

impl StatusAction {
    pub fn verb(&self) -> &'static str {
        match self {
            StatusAction::Pay => "pay",
            StatusAction::Receive => "receive",
            StatusAction::Cancel { .. } => "cancel",
        }
    }
}

/// Apply `action` to `flags`, returning the updated flags.
///
/// Receiving implies payment: an order handed over in person is marked
/// paid at the same time. Terminal states reject every action.
pub fn transition(
    flags: &StatusFlags,
    action: StatusAction,
    now: DateTime<Utc>,
) -> Result<StatusFlags, DomainError> {
    let from = flags.state();
    let verb = action.verb();
    match action {
        StatusAction::Pay => match from {
            OrderState::Pending => Ok(StatusFlags {
                paid: true,
                ..flags.clone()
            }),
            _ => Err(DomainError::InvalidTransition { from, action: verb }),
        },
        StatusAction::Receive => match from {
            OrderState::Pending | OrderState::Paid => Ok(StatusFlags {
                paid: true,
                received: true,
                received_at: Some(now),
                ..flags.clone()
            }),
            _ => Err(DomainError::InvalidTransition { from, action: verb }),
        },
        StatusAction::Cancel { reason } => match from {
            OrderState::Pending | OrderState::Paid => {
                let reason = reason
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());
                Ok(StatusFlags {
                    cancelled: true,
                    cancelled_at: Some(now),
                    cancel_reason: Some(reason),
                    ..flags.clone()
                })
            }
            _ => Err(DomainError::InvalidTransition { from, action: verb }),
        },
    }
}
