use std::collections::BTreeMap;

use uuid::Uuid;

use super::status::OrderState;

/// The facts the dashboard needs about one order.
#[derive(Debug, Clone)]
pub struct OrderFacts {
    pub order_id: Uuid,
    pub quantity: i32,
    pub merch_id: Uuid,
    pub merch_name: String,
    pub state: OrderState,
    pub college: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchandiseTally {
    pub merch_id: Uuid,
    pub merch_name: String,
    pub orders: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTally {
    pub state: OrderState,
    pub orders: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollegeTally {
    /// College name, or `None` for buyers without one on their profile.
    pub college: Option<String>,
    pub orders: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardReport {
    pub total_orders: i64,
    pub by_merchandise: Vec<MerchandiseTally>,
    pub by_status: Vec<StatusTally>,
    pub by_college: Vec<CollegeTally>,
}

/// Fold order facts into the dashboard tallies.
///
/// Every order contributes to exactly one bucket per axis, so each axis
/// sums back to the input size. Buckets are sorted (merchandise by name,
/// status by lifecycle order, college by name with `None` last) so the
/// report does not depend on input order.
pub fn aggregate(facts: &[OrderFacts]) -> DashboardReport {
    let mut by_merch: BTreeMap<(String, Uuid), (i64, i64)> = BTreeMap::new();
    let mut by_status: BTreeMap<OrderState, (i64, i64)> = BTreeMap::new();
    let mut by_college: BTreeMap<Option<String>, (i64, i64)> = BTreeMap::new();

    for fact in facts {
        let quantity = i64::from(fact.quantity);
        let merch = by_merch
            .entry((fact.merch_name.clone(), fact.merch_id))
            .or_default();
        merch.0 += 1;
        merch.1 += quantity;

        let status = by_status.entry(fact.state).or_default();
        status.0 += 1;
        status.1 += quantity;

        let college = by_college.entry(fact.college.clone()).or_default();
        college.0 += 1;
        college.1 += quantity;
    }

    let by_merchandise = by_merch
        .into_iter()
        .map(|((merch_name, merch_id), (orders, quantity))| MerchandiseTally {
            merch_id,
            merch_name,
            orders,
            quantity,
        })
        .collect();
    let by_status = by_status
        .into_iter()
        .map(|(state, (orders, quantity))| StatusTally {
            state,
            orders,
            quantity,
        })
        .collect();
    // BTreeMap orders None first; the report wants unknown colleges last.
    let mut by_college: Vec<CollegeTally> = by_college
        .into_iter()
        .map(|(college, (orders, quantity))| CollegeTally {
            college,
            orders,
            quantity,
        })
        .collect();
    by_college.sort_by(|a, b| match (&a.college, &b.college) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    DashboardReport {
        total_orders: facts.len() as i64,
        by_merchandise,
        by_status,
        by_college,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(merch: (Uuid, &str), quantity: i32, state: OrderState, college: Option<&str>) -> OrderFacts {
        OrderFacts {
            order_id: Uuid::new_v4(),
            quantity,
            merch_id: merch.0,
            merch_name: merch.1.to_string(),
            state,
            college: college.map(str::to_string),
        }
    }

    #[test]
    fn every_axis_sums_back_to_the_order_count() {
        let shirt = (Uuid::new_v4(), "Shirt");
        let pin = (Uuid::new_v4(), "Pin");
        let facts = vec![
            fact(shirt, 2, OrderState::Pending, Some("Engineering")),
            fact(shirt, 1, OrderState::Paid, None),
            fact(pin, 3, OrderState::Received, Some("Engineering")),
            fact(pin, 1, OrderState::Cancelled, Some("Arts")),
        ];

        let report = aggregate(&facts);
        assert_eq!(report.total_orders, 4);
        for (axis, tallies) in [
            ("merch", report.by_merchandise.iter().map(|t| t.orders).sum::<i64>()),
            ("status", report.by_status.iter().map(|t| t.orders).sum::<i64>()),
            ("college", report.by_college.iter().map(|t| t.orders).sum::<i64>()),
        ] {
            assert_eq!(tallies, 4, "axis {axis} lost or duplicated orders");
        }
    }

    #[test]
    fn report_is_independent_of_input_order() {
        let shirt = (Uuid::new_v4(), "Shirt");
        let pin = (Uuid::new_v4(), "Pin");
        let mut facts = vec![
            fact(shirt, 2, OrderState::Pending, Some("Engineering")),
            fact(pin, 5, OrderState::Paid, Some("Arts")),
            fact(shirt, 1, OrderState::Pending, None),
        ];

        let forward = aggregate(&facts);
        facts.reverse();
        let backward = aggregate(&facts);
        assert_eq!(forward, backward);
    }

    #[test]
    fn tallies_count_orders_and_sum_quantities() {
        let shirt = (Uuid::new_v4(), "Shirt");
        let facts = vec![
            fact(shirt, 2, OrderState::Pending, Some("Engineering")),
            fact(shirt, 3, OrderState::Pending, Some("Engineering")),
        ];

        let report = aggregate(&facts);
        assert_eq!(
            report.by_merchandise,
            vec![MerchandiseTally {
                merch_id: shirt.0,
                merch_name: "Shirt".to_string(),
                orders: 2,
                quantity: 5,
            }]
        );
        assert_eq!(
            report.by_status,
            vec![StatusTally {
                state: OrderState::Pending,
                orders: 2,
                quantity: 5,
            }]
        );
    }

    #[test]
    fn unknown_college_buckets_sort_last() {
        let pin = (Uuid::new_v4(), "Pin");
        let facts = vec![
            fact(pin, 1, OrderState::Pending, None),
            fact(pin, 1, OrderState::Pending, Some("Zoology")),
            fact(pin, 1, OrderState::Pending, Some("Arts")),
        ];

        let report = aggregate(&facts);
        let names: Vec<Option<&str>> = report
            .by_college
            .iter()
            .map(|t| t.college.as_deref())
            .collect();
        assert_eq!(names, vec![Some("Arts"), Some("Zoology"), None]);
    }

    #[test]
    fn empty_input_yields_an_empty_report() {
        let report = aggregate(&[]);
        assert_eq!(report.total_orders, 0);
        assert!(report.by_merchandise.is_empty());
        assert!(report.by_status.is_empty());
        assert!(report.by_college.is_empty());
    }
}
