use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::checkout::{line_total, resolve_unit_price, LineQuote, PlaceOrder, PlacedOrder};
use crate::domain::errors::DomainError;
use crate::domain::ports::CheckoutRepository;
use crate::schema::{cart_orders, memberships, merchandises, order_statuses, orders, payments, variants};

use super::models::{CartOrderRow, MerchandiseRow, NewOrderRow, NewPaymentRow, VariantRow};

pub struct DieselCheckoutRepository {
    pool: DbPool,
}

impl DieselCheckoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn load_cart_row(
    conn: &mut PgConnection,
    user_id: Uuid,
    line_id: Uuid,
    lock: bool,
) -> Result<CartOrderRow, DomainError> {
    let row: Option<CartOrderRow> = if lock {
        cart_orders::table
            .filter(cart_orders::id.eq(line_id))
            .filter(cart_orders::user_id.eq(user_id))
            .select(CartOrderRow::as_select())
            .for_update()
            .first(conn)
            .optional()?
    } else {
        cart_orders::table
            .filter(cart_orders::id.eq(line_id))
            .filter(cart_orders::user_id.eq(user_id))
            .select(CartOrderRow::as_select())
            .first(conn)
            .optional()?
    };
    row.ok_or(DomainError::NotFound("Cart line"))
}

/// Price the cart line for this buyer. A membership matches on the linked
/// user id or on the invited email, whichever registered first.
fn quote_from_row(
    conn: &mut PgConnection,
    row: &CartOrderRow,
    user_id: Uuid,
    email: &str,
) -> Result<LineQuote, DomainError> {
    let merch: MerchandiseRow = merchandises::table
        .filter(merchandises::id.eq(row.merch_id))
        .select(MerchandiseRow::as_select())
        .first(conn)?;
    let variant: VariantRow = variants::table
        .filter(variants::id.eq(row.variant_id))
        .select(VariantRow::as_select())
        .first(conn)?;

    let is_member: bool = diesel::select(diesel::dsl::exists(
        memberships::table
            .filter(memberships::shop_id.eq(row.shop_id))
            .filter(
                memberships::user_id
                    .eq(user_id)
                    .or(memberships::email.eq(email)),
            ),
    ))
    .get_result(conn)?;

    let unit_price = resolve_unit_price(
        &variant.original_price,
        &variant.membership_price,
        is_member,
    );
    let total_price = line_total(&unit_price, row.quantity);

    Ok(LineQuote {
        cart_order_id: row.id,
        shop_id: row.shop_id,
        merch_id: merch.id,
        merch_name: merch.name,
        variant_id: variant.id,
        quantity: row.quantity,
        online_payment: merch.online_payment,
        physical_payment: merch.physical_payment,
        is_member,
        unit_price,
        total_price,
    })
}

impl CheckoutRepository for DieselCheckoutRepository {
    fn quote_line(
        &self,
        user_id: Uuid,
        email: &str,
        line_id: Uuid,
    ) -> Result<LineQuote, DomainError> {
        let mut conn = self.pool.get()?;
        let row = load_cart_row(&mut conn, user_id, line_id, false)?;
        quote_from_row(&mut conn, &row, user_id, email)
    }

    fn place_order(&self, cmd: &PlaceOrder) -> Result<PlacedOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // The row lock serializes competing checkouts of the same line;
            // the loser sees the deleted row and stops with NotFound.
            let row = load_cart_row(conn, cmd.user_id, cmd.cart_order_id, true)?;
            let quote = quote_from_row(conn, &row, cmd.user_id, &cmd.email)?;
            quote.ensure_method_offered(cmd.method)?;
            if cmd.method.is_online() && cmd.receipt_url.is_none() {
                return Err(DomainError::ReceiptRequired);
            }

            let status_id = Uuid::new_v4();
            diesel::insert_into(order_statuses::table)
                .values(order_statuses::id.eq(status_id))
                .execute(conn)?;

            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: cmd.order_id,
                    user_id: cmd.user_id,
                    merch_id: row.merch_id,
                    variant_id: row.variant_id,
                    shop_id: row.shop_id,
                    status_id,
                    quantity: row.quantity,
                    price: quote.total_price.clone(),
                    online_payment: cmd.method.is_online(),
                    physical_payment: !cmd.method.is_online(),
                })
                .execute(conn)?;

            let payment_id = match (cmd.method.is_online(), &cmd.receipt_url) {
                (true, Some(url)) => {
                    let id = Uuid::new_v4();
                    diesel::insert_into(payments::table)
                        .values(&NewPaymentRow {
                            id,
                            order_id: cmd.order_id,
                            picture_url: url.clone(),
                        })
                        .execute(conn)?;
                    Some(id)
                }
                _ => None,
            };

            let deleted = diesel::delete(
                cart_orders::table.filter(cart_orders::id.eq(cmd.cart_order_id)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(DomainError::Internal(
                    "Cart line vanished during checkout".to_string(),
                ));
            }

            Ok(PlacedOrder {
                order_id: cmd.order_id,
                status_id,
                payment_id,
                merch_name: quote.merch_name,
                quantity: quote.quantity,
                price: quote.total_price,
            })
        })
    }
}
