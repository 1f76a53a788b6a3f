use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

/// How the buyer pays: over the counter or by uploading a transfer receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Irl,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Irl => "irl",
            PaymentMethod::Online => "online",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, PaymentMethod::Online)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "irl" => Ok(PaymentMethod::Irl),
            "online" => Ok(PaymentMethod::Online),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown payment method: {other}"
            ))),
        }
    }
}

/// Everything needed to price and validate one cart line at checkout,
/// resolved in a single read.
#[derive(Debug, Clone)]
pub struct LineQuote {
    pub cart_order_id: Uuid,
    pub shop_id: Uuid,
    pub merch_id: Uuid,
    pub merch_name: String,
    pub variant_id: Uuid,
    pub quantity: i32,
    pub online_payment: bool,
    pub physical_payment: bool,
    pub is_member: bool,
    pub unit_price: BigDecimal,
    pub total_price: BigDecimal,
}

impl LineQuote {
    /// Reject methods the merchandise does not offer.
    pub fn ensure_method_offered(&self, method: PaymentMethod) -> Result<(), DomainError> {
        let offered = match method {
            PaymentMethod::Irl => self.physical_payment,
            PaymentMethod::Online => self.online_payment,
        };
        if offered {
            Ok(())
        } else {
            Err(DomainError::PaymentNotOffered(method.as_str()))
        }
    }
}

/// Pick the unit price a buyer pays for a variant.
pub fn resolve_unit_price(
    original_price: &BigDecimal,
    membership_price: &BigDecimal,
    is_member: bool,
) -> BigDecimal {
    if is_member {
        membership_price.clone()
    } else {
        original_price.clone()
    }
}

pub fn line_total(unit_price: &BigDecimal, quantity: i32) -> BigDecimal {
    unit_price * BigDecimal::from(quantity)
}

/// Object key for an uploaded payment receipt. The order id is generated
/// before the order row exists so the key can embed it.
pub fn receipt_object_key(order_id: Uuid, now: DateTime<Utc>) -> String {
    format!("payment_{}_{}", order_id, now.timestamp_millis())
}

/// Command to turn one locked cart line into an order.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub cart_order_id: Uuid,
    pub method: PaymentMethod,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: Uuid,
    pub status_id: Uuid,
    pub payment_id: Option<Uuid>,
    pub merch_name: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// Per-line checkout result; one failed line never blocks the others.
#[derive(Debug)]
pub struct LineOutcome {
    pub cart_order_id: Uuid,
    pub result: Result<PlacedOrder, DomainError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(online: bool, physical: bool) -> LineQuote {
        LineQuote {
            cart_order_id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            merch_id: Uuid::new_v4(),
            merch_name: "Lanyard".to_string(),
            variant_id: Uuid::new_v4(),
            quantity: 2,
            online_payment: online,
            physical_payment: physical,
            is_member: false,
            unit_price: BigDecimal::from(120),
            total_price: BigDecimal::from(240),
        }
    }

    #[test]
    fn members_pay_the_membership_price() {
        let original = BigDecimal::from(250);
        let membership = BigDecimal::from(200);
        assert_eq!(
            resolve_unit_price(&original, &membership, true),
            membership
        );
        assert_eq!(
            resolve_unit_price(&original, &membership, false),
            original
        );
    }

    #[test]
    fn line_total_multiplies_by_quantity() {
        let unit = BigDecimal::new(12550.into(), 2); // 125.50
        assert_eq!(line_total(&unit, 3), BigDecimal::new(37650.into(), 2));
    }

    #[test]
    fn method_must_be_offered_by_the_merchandise() {
        assert!(quote(true, false)
            .ensure_method_offered(PaymentMethod::Online)
            .is_ok());
        assert!(matches!(
            quote(true, false).ensure_method_offered(PaymentMethod::Irl),
            Err(DomainError::PaymentNotOffered("irl"))
        ));
        assert!(matches!(
            quote(false, true).ensure_method_offered(PaymentMethod::Online),
            Err(DomainError::PaymentNotOffered("online"))
        ));
    }

    #[test]
    fn payment_method_parses_wire_names_only() {
        assert_eq!("irl".parse::<PaymentMethod>().unwrap(), PaymentMethod::Irl);
        assert_eq!(
            "online".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Online
        );
        assert!("card".parse::<PaymentMethod>().is_err());
        assert!("Online".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn receipt_keys_embed_order_id_and_timestamp() {
        let order_id = Uuid::new_v4();
        let now = Utc::now();
        let key = receipt_object_key(order_id, now);
        assert_eq!(
            key,
            format!("payment_{}_{}", order_id, now.timestamp_millis())
        );
    }
}
