use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::orders::StatusView;
use crate::domain::ports::StatusRepository;
use crate::domain::status::{transition, StatusAction};
use crate::schema::{order_statuses, orders};

use super::ensure_officer;
use super::models::OrderStatusRow;

pub struct DieselStatusRepository {
    pool: DbPool,
}

impl DieselStatusRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StatusRepository for DieselStatusRepository {
    fn apply(
        &self,
        actor: Uuid,
        status_id: Uuid,
        action: StatusAction,
    ) -> Result<StatusView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let status: OrderStatusRow = order_statuses::table
                .filter(order_statuses::id.eq(status_id))
                .select(OrderStatusRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Order status"))?;

            let shop_id: Uuid = orders::table
                .filter(orders::status_id.eq(status_id))
                .select(orders::shop_id)
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Order"))?;
            ensure_officer(conn, actor, shop_id)?;

            let updated = transition(&status.flags(), action, Utc::now())?;
            let row: OrderStatusRow =
                diesel::update(order_statuses::table.filter(order_statuses::id.eq(status_id)))
                    .set((
                        order_statuses::paid.eq(updated.paid),
                        order_statuses::received.eq(updated.received),
                        order_statuses::received_at.eq(updated.received_at),
                        order_statuses::cancelled.eq(updated.cancelled),
                        order_statuses::cancelled_at.eq(updated.cancelled_at),
                        order_statuses::cancel_reason.eq(updated.cancel_reason),
                    ))
                    .get_result(conn)?;

            Ok(StatusView::from_flags(row.id, row.flags()))
        })
    }
}
