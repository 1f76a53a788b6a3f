use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::dashboard::OrderFacts;
use crate::domain::errors::DomainError;
use crate::domain::orders::{
    group_by_merchandise, CustomerView, MerchandiseOrders, MerchandiseRef, OrderView,
    ShopOrderView, StatusView,
};
use crate::domain::ports::OrderRepository;
use crate::domain::status::StatusFlags;
use crate::schema::{colleges, merchandises, order_statuses, orders, payments, profiles, programs, shops, variants};

use super::models::{MerchandiseRow, OrderRow, OrderStatusRow, ProfileRow, ShopRow, VariantRow};
use super::{ensure_officer, first_pictures};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Receipt picture of each order, keyed by order id.
fn receipt_urls(
    conn: &mut PgConnection,
    order_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, DomainError> {
    let rows: Vec<(Uuid, String)> = payments::table
        .filter(payments::order_id.eq_any(order_ids))
        .select((payments::order_id, payments::picture_url))
        .load(conn)?;
    Ok(rows.into_iter().collect())
}

fn status_view(row: OrderStatusRow) -> StatusView {
    let flags = row.flags();
    StatusView::from_flags(row.id, flags)
}

impl OrderRepository for DieselOrderRepository {
    fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<(OrderRow, OrderStatusRow, MerchandiseRow, VariantRow, ShopRow)> =
            orders::table
                .inner_join(order_statuses::table)
                .inner_join(merchandises::table)
                .inner_join(variants::table)
                .inner_join(shops::table)
                .filter(orders::user_id.eq(user_id))
                .order(orders::created_at.desc())
                .select((
                    OrderRow::as_select(),
                    OrderStatusRow::as_select(),
                    MerchandiseRow::as_select(),
                    VariantRow::as_select(),
                    ShopRow::as_select(),
                ))
                .load(&mut conn)?;

        let merch_ids: Vec<Uuid> = rows.iter().map(|(_, _, m, _, _)| m.id).collect();
        let order_ids: Vec<Uuid> = rows.iter().map(|(o, _, _, _, _)| o.id).collect();
        let pictures = first_pictures(&mut conn, &merch_ids)?;
        let receipts = receipt_urls(&mut conn, &order_ids)?;

        Ok(rows
            .into_iter()
            .map(|(order, status, merch, variant, shop)| OrderView {
                id: order.id,
                quantity: order.quantity,
                price: order.price,
                online_payment: order.online_payment,
                physical_payment: order.physical_payment,
                created_at: order.created_at,
                merch_name: merch.name,
                picture_url: pictures.get(&merch.id).cloned(),
                variant_name: variant.name,
                receipt_url: receipts.get(&order.id).cloned(),
                shop: shop.into(),
                status: status_view(status),
            })
            .collect())
    }

    fn orders_for_shop(
        &self,
        actor: Uuid,
        shop_id: Uuid,
    ) -> Result<Vec<MerchandiseOrders>, DomainError> {
        let mut conn = self.pool.get()?;
        ensure_officer(&mut conn, actor, shop_id)?;

        let rows: Vec<(
            OrderRow,
            OrderStatusRow,
            MerchandiseRow,
            VariantRow,
            ProfileRow,
            Option<String>,
            Option<String>,
        )> = orders::table
            .inner_join(order_statuses::table)
            .inner_join(merchandises::table)
            .inner_join(variants::table)
            .inner_join(
                profiles::table
                    .left_join(colleges::table)
                    .left_join(programs::table),
            )
            .filter(orders::shop_id.eq(shop_id))
            .order(orders::created_at.desc())
            .select((
                OrderRow::as_select(),
                OrderStatusRow::as_select(),
                MerchandiseRow::as_select(),
                VariantRow::as_select(),
                ProfileRow::as_select(),
                colleges::name.nullable(),
                programs::name.nullable(),
            ))
            .load(&mut conn)?;

        let merch_ids: Vec<Uuid> = rows.iter().map(|(_, _, m, _, _, _, _)| m.id).collect();
        let pictures = first_pictures(&mut conn, &merch_ids)?;

        let entries: Vec<(MerchandiseRef, ShopOrderView)> = rows
            .into_iter()
            .map(
                |(order, status, merch, variant, profile, college, program)| {
                    let merch_ref = MerchandiseRef {
                        id: merch.id,
                        name: merch.name,
                        picture_url: pictures.get(&merch.id).cloned(),
                    };
                    let view = ShopOrderView {
                        id: order.id,
                        quantity: order.quantity,
                        price: order.price,
                        variant_name: variant.name,
                        created_at: order.created_at,
                        customer: CustomerView {
                            first_name: profile.first_name,
                            last_name: profile.last_name,
                            student_number: profile.student_number,
                            email: profile.email,
                            contact_number: profile.contact_number,
                            college,
                            program,
                            year: profile.year,
                            section: profile.section,
                        },
                        status: status_view(status),
                    };
                    (merch_ref, view)
                },
            )
            .collect();

        Ok(group_by_merchandise(entries))
    }

    fn order_facts(&self, actor: Uuid, shop_id: Uuid) -> Result<Vec<OrderFacts>, DomainError> {
        let mut conn = self.pool.get()?;
        ensure_officer(&mut conn, actor, shop_id)?;

        let rows: Vec<(Uuid, i32, Uuid, String, bool, bool, bool, Option<String>)> =
            orders::table
                .inner_join(order_statuses::table)
                .inner_join(merchandises::table)
                .inner_join(profiles::table.left_join(colleges::table))
                .filter(orders::shop_id.eq(shop_id))
                .select((
                    orders::id,
                    orders::quantity,
                    merchandises::id,
                    merchandises::name,
                    order_statuses::paid,
                    order_statuses::received,
                    order_statuses::cancelled,
                    colleges::name.nullable(),
                ))
                .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(order_id, quantity, merch_id, merch_name, paid, received, cancelled, college)| {
                    let state = StatusFlags {
                        paid,
                        received,
                        cancelled,
                        ..StatusFlags::new()
                    }
                    .state();
                    OrderFacts {
                        order_id,
                        quantity,
                        merch_id,
                        merch_name,
                        state,
                        college,
                    }
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DieselOrderRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::OrderRepository;
    use crate::domain::status::OrderState;
    use crate::infrastructure::test_support::{
        mark_status, money, seed_college, seed_merchandise, seed_officer, seed_order,
        seed_payment, seed_picture, seed_profile, seed_profile_in_college, seed_shop,
        seed_variant, setup_db,
    };

    #[tokio::test]
    async fn buyers_see_their_own_orders_with_receipts() {
        let (_container, pool) = setup_db().await;
        let (buyer_id, other_id) = {
            let mut conn = pool.get().unwrap();
            let buyer_id = seed_profile(&mut conn, "buyer@cvsu.edu.ph");
            let other_id = seed_profile(&mut conn, "other@cvsu.edu.ph");
            let shop_id = seed_shop(&mut conn, "ACES");
            let merch_id = seed_merchandise(&mut conn, shop_id, "Org Shirt", true, true);
            seed_picture(&mut conn, merch_id, "http://storage.local/merch-picture/shirt.png");
            let variant_id = seed_variant(&mut conn, merch_id, "Small", "250.00", "200.00");
            let (order_id, _) = seed_order(
                &mut conn, buyer_id, merch_id, variant_id, shop_id, 2, "500.00",
            );
            seed_payment(
                &mut conn,
                order_id,
                "http://storage.local/payment-picture/payment_1",
            );
            seed_order(
                &mut conn, other_id, merch_id, variant_id, shop_id, 1, "250.00",
            );
            (buyer_id, other_id)
        };
        let repo = DieselOrderRepository::new(pool);

        let mine = repo.orders_for_user(buyer_id).expect("list failed");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].quantity, 2);
        assert_eq!(mine[0].price, money("500.00"));
        assert_eq!(mine[0].merch_name, "Org Shirt");
        assert_eq!(mine[0].variant_name, "Small");
        assert_eq!(
            mine[0].receipt_url.as_deref(),
            Some("http://storage.local/payment-picture/payment_1")
        );
        assert_eq!(mine[0].status.state, OrderState::Pending);

        let theirs = repo.orders_for_user(other_id).expect("list failed");
        assert_eq!(theirs.len(), 1);
        assert!(theirs[0].receipt_url.is_none());
    }

    #[tokio::test]
    async fn shop_orders_group_by_merchandise_with_totals() {
        let (_container, pool) = setup_db().await;
        let (officer_id, shop_id) = {
            let mut conn = pool.get().unwrap();
            let buyer_id = seed_profile(&mut conn, "buyer@cvsu.edu.ph");
            let officer_id = seed_profile(&mut conn, "officer@cvsu.edu.ph");
            let shop_id = seed_shop(&mut conn, "ACES");
            seed_officer(&mut conn, officer_id, shop_id);
            let shirt = seed_merchandise(&mut conn, shop_id, "Shirt", false, true);
            let shirt_variant = seed_variant(&mut conn, shirt, "Small", "250.00", "200.00");
            let pin = seed_merchandise(&mut conn, shop_id, "Pin", false, true);
            let pin_variant = seed_variant(&mut conn, pin, "Standard", "50.00", "40.00");
            seed_order(&mut conn, buyer_id, shirt, shirt_variant, shop_id, 2, "500.00");
            seed_order(&mut conn, buyer_id, shirt, shirt_variant, shop_id, 1, "250.00");
            seed_order(&mut conn, buyer_id, pin, pin_variant, shop_id, 3, "150.00");
            (officer_id, shop_id)
        };
        let repo = DieselOrderRepository::new(pool);

        let groups = repo
            .orders_for_shop(officer_id, shop_id)
            .expect("list failed");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].merch_name, "Pin");
        assert_eq!(groups[0].total_quantity, 3);
        assert_eq!(groups[0].total_revenue, money("150.00"));
        assert_eq!(groups[1].merch_name, "Shirt");
        assert_eq!(groups[1].orders.len(), 2);
        assert_eq!(groups[1].total_quantity, 3);
        assert_eq!(groups[1].total_revenue, money("750.00"));
        assert_eq!(groups[1].orders[0].customer.first_name, "Juan");
    }

    #[tokio::test]
    async fn shop_orders_require_an_officer() {
        let (_container, pool) = setup_db().await;
        let (stranger, shop_id) = {
            let mut conn = pool.get().unwrap();
            let stranger = seed_profile(&mut conn, "stranger@cvsu.edu.ph");
            let shop_id = seed_shop(&mut conn, "ACES");
            (stranger, shop_id)
        };
        let repo = DieselOrderRepository::new(pool);

        assert!(matches!(
            repo.orders_for_shop(stranger, shop_id),
            Err(DomainError::NotOfficer)
        ));
        assert!(matches!(
            repo.order_facts(stranger, shop_id),
            Err(DomainError::NotOfficer)
        ));
    }

    #[tokio::test]
    async fn order_facts_are_scoped_to_the_shop() {
        let (_container, pool) = setup_db().await;
        let (officer_id, shop_a) = {
            let mut conn = pool.get().unwrap();
            let buyer_id = seed_profile(&mut conn, "buyer@cvsu.edu.ph");
            let officer_id = seed_profile(&mut conn, "officer@cvsu.edu.ph");

            let shop_a = seed_shop(&mut conn, "ACES");
            seed_officer(&mut conn, officer_id, shop_a);
            let merch_a = seed_merchandise(&mut conn, shop_a, "Shirt", false, true);
            let variant_a = seed_variant(&mut conn, merch_a, "Small", "250.00", "200.00");
            seed_order(&mut conn, buyer_id, merch_a, variant_a, shop_a, 1, "250.00");

            let shop_b = seed_shop(&mut conn, "ZSO");
            let merch_b = seed_merchandise(&mut conn, shop_b, "Mug", false, true);
            let variant_b = seed_variant(&mut conn, merch_b, "Standard", "150.00", "120.00");
            seed_order(&mut conn, buyer_id, merch_b, variant_b, shop_b, 5, "750.00");

            (officer_id, shop_a)
        };
        let repo = DieselOrderRepository::new(pool);

        let facts = repo.order_facts(officer_id, shop_a).expect("facts failed");

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].merch_name, "Shirt");
        assert_eq!(facts[0].quantity, 1);
    }

    #[tokio::test]
    async fn order_facts_collapse_flags_into_states() {
        let (_container, pool) = setup_db().await;
        let (officer_id, shop_id) = {
            let mut conn = pool.get().unwrap();
            let college_id = seed_college(&mut conn, "College of Engineering");
            let buyer_id =
                seed_profile_in_college(&mut conn, "buyer@cvsu.edu.ph", Some(college_id));
            let officer_id = seed_profile(&mut conn, "officer@cvsu.edu.ph");
            let shop_id = seed_shop(&mut conn, "ACES");
            seed_officer(&mut conn, officer_id, shop_id);
            let merch_id = seed_merchandise(&mut conn, shop_id, "Shirt", false, true);
            let variant_id = seed_variant(&mut conn, merch_id, "Small", "250.00", "200.00");

            seed_order(
                &mut conn, buyer_id, merch_id, variant_id, shop_id, 1, "250.00",
            );
            let (_, paid) = seed_order(
                &mut conn, buyer_id, merch_id, variant_id, shop_id, 1, "250.00",
            );
            mark_status(&mut conn, paid, true, false, false);
            let (_, done) = seed_order(
                &mut conn, buyer_id, merch_id, variant_id, shop_id, 1, "250.00",
            );
            // Cancelled after being received; cancelled wins.
            mark_status(&mut conn, done, true, true, true);
            (officer_id, shop_id)
        };
        let repo = DieselOrderRepository::new(pool);

        let facts = repo.order_facts(officer_id, shop_id).expect("facts failed");

        let mut states: Vec<OrderState> = facts.iter().map(|f| f.state).collect();
        states.sort();
        assert_eq!(
            states,
            vec![OrderState::Pending, OrderState::Paid, OrderState::Cancelled]
        );
        assert!(facts
            .iter()
            .all(|f| f.college.as_deref() == Some("College of Engineering")));
    }
}
