use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::ShopSummary;
use super::status::{OrderState, StatusFlags};

#[derive(Debug, Clone)]
pub struct StatusView {
    pub id: Uuid,
    pub state: OrderState,
    pub paid: bool,
    pub received: bool,
    pub received_at: Option<DateTime<Utc>>,
    pub cancelled: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

impl StatusView {
    pub fn from_flags(id: Uuid, flags: StatusFlags) -> Self {
        StatusView {
            id,
            state: flags.state(),
            paid: flags.paid,
            received: flags.received,
            received_at: flags.received_at,
            cancelled: flags.cancelled,
            cancelled_at: flags.cancelled_at,
            cancel_reason: flags.cancel_reason,
        }
    }
}

/// One order as the buyer sees it on their order history page.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub created_at: DateTime<Utc>,
    pub merch_name: String,
    pub picture_url: Option<String>,
    pub variant_name: String,
    pub receipt_url: Option<String>,
    pub shop: ShopSummary,
    pub status: StatusView,
}

/// Buyer identity shown to shop officers alongside an order.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    pub email: String,
    pub contact_number: String,
    pub college: Option<String>,
    pub program: Option<String>,
    pub year: i32,
    pub section: i32,
}

/// One order row on the shop's order management page.
#[derive(Debug, Clone)]
pub struct ShopOrderView {
    pub id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub variant_name: String,
    pub created_at: DateTime<Utc>,
    pub customer: CustomerView,
    pub status: StatusView,
}

#[derive(Debug, Clone)]
pub struct MerchandiseRef {
    pub id: Uuid,
    pub name: String,
    pub picture_url: Option<String>,
}

/// Orders of one merchandise, with quantity and revenue totals.
#[derive(Debug, Clone)]
pub struct MerchandiseOrders {
    pub merch_id: Uuid,
    pub merch_name: String,
    pub picture_url: Option<String>,
    pub total_quantity: i64,
    pub total_revenue: BigDecimal,
    pub orders: Vec<ShopOrderView>,
}

/// Group shop orders by merchandise, preserving the order rows' relative
/// order within each group. Groups are sorted by merchandise name.
pub fn group_by_merchandise(rows: Vec<(MerchandiseRef, ShopOrderView)>) -> Vec<MerchandiseOrders> {
    let mut groups: Vec<MerchandiseOrders> = Vec::new();
    for (merch, order) in rows {
        let idx = match groups.iter().position(|g| g.merch_id == merch.id) {
            Some(idx) => idx,
            None => {
                groups.push(MerchandiseOrders {
                    merch_id: merch.id,
                    merch_name: merch.name,
                    picture_url: merch.picture_url,
                    total_quantity: 0,
                    total_revenue: BigDecimal::from(0),
                    orders: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.total_quantity += i64::from(order.quantity);
        group.total_revenue += &order.price;
        group.orders.push(order);
    }
    groups.sort_by(|a, b| a.merch_name.cmp(&b.merch_name));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merch(id: Uuid, name: &str) -> MerchandiseRef {
        MerchandiseRef {
            id,
            name: name.to_string(),
            picture_url: None,
        }
    }

    fn order(quantity: i32, price: i32) -> ShopOrderView {
        ShopOrderView {
            id: Uuid::new_v4(),
            quantity,
            price: BigDecimal::from(price),
            variant_name: "Variant".to_string(),
            created_at: Utc::now(),
            customer: CustomerView {
                first_name: "Juan".to_string(),
                last_name: "Dela Cruz".to_string(),
                student_number: "202200001".to_string(),
                email: "juan@example.com".to_string(),
                contact_number: "09170000000".to_string(),
                college: None,
                program: None,
                year: 2,
                section: 1,
            },
            status: StatusView::from_flags(Uuid::new_v4(), StatusFlags::new()),
        }
    }

    #[test]
    fn grouping_totals_quantity_and_revenue_per_merchandise() {
        let shirt = Uuid::new_v4();
        let pin = Uuid::new_v4();
        let rows = vec![
            (merch(shirt, "Shirt"), order(2, 500)),
            (merch(pin, "Pin"), order(1, 50)),
            (merch(shirt, "Shirt"), order(1, 250)),
        ];

        let groups = group_by_merchandise(rows);
        assert_eq!(groups.len(), 2);

        // Sorted by name: Pin before Shirt.
        assert_eq!(groups[0].merch_name, "Pin");
        assert_eq!(groups[0].total_quantity, 1);
        assert_eq!(groups[0].total_revenue, BigDecimal::from(50));

        assert_eq!(groups[1].merch_name, "Shirt");
        assert_eq!(groups[1].orders.len(), 2);
        assert_eq!(groups[1].total_quantity, 3);
        assert_eq!(groups[1].total_revenue, BigDecimal::from(750));
    }

    #[test]
    fn grouping_empty_input_yields_no_groups() {
        assert!(group_by_merchandise(Vec::new()).is_empty());
    }
}
