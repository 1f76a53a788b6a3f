use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::checkout::{
    receipt_object_key, LineOutcome, PaymentMethod, PlaceOrder, PlacedOrder,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{Bucket, CheckoutRepository, ReceiptStore};
use crate::session::Session;

/// One cart line submitted for checkout, as it comes off the wire.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub cart_order_id: Uuid,
    pub payment_method: String,
    /// Base64-encoded receipt image, required for online payment.
    pub receipt: Option<String>,
}

pub struct CheckoutService<R, S> {
    repo: R,
    receipts: S,
}

impl<R: CheckoutRepository, S: ReceiptStore> CheckoutService<R, S> {
    pub fn new(repo: R, receipts: S) -> Self {
        Self { repo, receipts }
    }

    /// Check out a batch of cart lines. Lines are processed independently:
    /// each gets its own outcome and a failure never touches the others.
    pub fn checkout(&self, session: &Session, lines: Vec<CheckoutLine>) -> Vec<LineOutcome> {
        lines
            .into_iter()
            .map(|line| LineOutcome {
                cart_order_id: line.cart_order_id,
                result: self.checkout_line(session, line),
            })
            .collect()
    }

    fn checkout_line(
        &self,
        session: &Session,
        line: CheckoutLine,
    ) -> Result<PlacedOrder, DomainError> {
        let method: PaymentMethod = line.payment_method.parse()?;
        let quote = self
            .repo
            .quote_line(session.user_id, &session.email, line.cart_order_id)?;
        quote.ensure_method_offered(method)?;

        // The order id is generated up front so the receipt key can embed
        // it before the order row exists.
        let order_id = Uuid::new_v4();
        let receipt = match method {
            PaymentMethod::Online => {
                let encoded = line.receipt.ok_or(DomainError::ReceiptRequired)?;
                let bytes = BASE64.decode(encoded.as_bytes()).map_err(|e| {
                    DomainError::InvalidInput(format!("Receipt is not valid base64: {e}"))
                })?;
                if bytes.is_empty() {
                    return Err(DomainError::ReceiptRequired);
                }
                let key = receipt_object_key(order_id, Utc::now());
                let url = self.receipts.store(Bucket::PaymentPicture, &key, &bytes)?;
                Some((key, url))
            }
            PaymentMethod::Irl => None,
        };

        let cmd = PlaceOrder {
            order_id,
            user_id: session.user_id,
            email: session.email.clone(),
            cart_order_id: line.cart_order_id,
            method,
            receipt_url: receipt.as_ref().map(|(_, url)| url.clone()),
        };
        match self.repo.place_order(&cmd) {
            Ok(placed) => Ok(placed),
            Err(e) => {
                // The receipt was written before the transaction; take it
                // back out so no orphan blob survives a failed order.
                if let Some((key, _)) = receipt {
                    if let Err(cleanup) = self.receipts.remove(Bucket::PaymentPicture, &key) {
                        log::warn!(
                            "failed to remove receipt {key} after aborted checkout: {cleanup}"
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::checkout::LineQuote;

    struct FakeRepo {
        fail_place: bool,
        placed: Mutex<Vec<Uuid>>,
    }

    impl FakeRepo {
        fn new(fail_place: bool) -> Self {
            Self {
                fail_place,
                placed: Mutex::new(Vec::new()),
            }
        }
    }

    impl CheckoutRepository for FakeRepo {
        fn quote_line(
            &self,
            _user_id: Uuid,
            _email: &str,
            line_id: Uuid,
        ) -> Result<LineQuote, DomainError> {
            Ok(LineQuote {
                cart_order_id: line_id,
                shop_id: Uuid::new_v4(),
                merch_id: Uuid::new_v4(),
                merch_name: "Shirt".to_string(),
                variant_id: Uuid::new_v4(),
                quantity: 1,
                online_payment: true,
                physical_payment: false,
                is_member: false,
                unit_price: BigDecimal::from(100),
                total_price: BigDecimal::from(100),
            })
        }

        fn place_order(&self, cmd: &PlaceOrder) -> Result<PlacedOrder, DomainError> {
            if self.fail_place {
                return Err(DomainError::NotFound("Cart line"));
            }
            self.placed.lock().unwrap().push(cmd.order_id);
            Ok(PlacedOrder {
                order_id: cmd.order_id,
                status_id: Uuid::new_v4(),
                payment_id: Some(Uuid::new_v4()),
                merch_name: "Shirt".to_string(),
                quantity: 1,
                price: BigDecimal::from(100),
            })
        }
    }

    #[derive(Default)]
    struct FakeStore {
        stored: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
    }

    impl ReceiptStore for FakeStore {
        fn store(&self, _bucket: Bucket, key: &str, _bytes: &[u8]) -> Result<String, DomainError> {
            self.stored.lock().unwrap().push(key.to_string());
            Ok(format!("http://storage.local/payment-picture/{key}"))
        }

        fn remove(&self, _bucket: Bucket, key: &str) -> Result<(), DomainError> {
            self.removed.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    fn session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "buyer@cvsu.edu.ph".to_string(),
        }
    }

    fn online_line(receipt: Option<&str>) -> CheckoutLine {
        CheckoutLine {
            cart_order_id: Uuid::new_v4(),
            payment_method: "online".to_string(),
            receipt: receipt.map(str::to_string),
        }
    }

    #[test]
    fn online_checkout_stores_a_receipt_then_places_the_order() {
        let service = CheckoutService::new(FakeRepo::new(false), FakeStore::default());
        let encoded = BASE64.encode(b"receipt bytes");

        let outcomes = service.checkout(&session(), vec![online_line(Some(&encoded))]);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_ok());
        assert_eq!(service.receipts.stored.lock().unwrap().len(), 1);
        assert!(service.receipts.removed.lock().unwrap().is_empty());
    }

    #[test]
    fn online_checkout_without_receipt_is_rejected() {
        let service = CheckoutService::new(FakeRepo::new(false), FakeStore::default());

        let outcomes = service.checkout(&session(), vec![online_line(None)]);
        assert!(matches!(
            outcomes[0].result,
            Err(DomainError::ReceiptRequired)
        ));
        assert!(service.receipts.stored.lock().unwrap().is_empty());
    }

    #[test]
    fn garbage_base64_is_an_invalid_input_for_that_line_only() {
        let service = CheckoutService::new(FakeRepo::new(false), FakeStore::default());
        let good = BASE64.encode(b"receipt");
        let lines = vec![online_line(Some("not base64!!!")), online_line(Some(&good))];

        let outcomes = service.checkout(&session(), lines);
        assert!(matches!(
            outcomes[0].result,
            Err(DomainError::InvalidInput(_))
        ));
        assert!(outcomes[1].result.is_ok());
    }

    #[test]
    fn failed_order_placement_removes_the_stored_receipt() {
        let service = CheckoutService::new(FakeRepo::new(true), FakeStore::default());
        let encoded = BASE64.encode(b"receipt bytes");

        let outcomes = service.checkout(&session(), vec![online_line(Some(&encoded))]);
        assert!(outcomes[0].result.is_err());

        let stored = service.receipts.stored.lock().unwrap();
        let removed = service.receipts.removed.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(*removed, *stored);
    }

    #[test]
    fn irl_checkout_never_touches_receipt_storage() {
        let service = CheckoutService::new(FakeRepo::new(false), FakeStore::default());
        let line = CheckoutLine {
            cart_order_id: Uuid::new_v4(),
            payment_method: "irl".to_string(),
            receipt: None,
        };

        let outcomes = service.checkout(&session(), vec![line]);
        assert!(outcomes[0].result.is_err()); // physical payment not offered
        assert!(service.receipts.stored.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_payment_method_fails_that_line() {
        let service = CheckoutService::new(FakeRepo::new(false), FakeStore::default());
        let line = CheckoutLine {
            cart_order_id: Uuid::new_v4(),
            payment_method: "cheque".to_string(),
            receipt: None,
        };

        let outcomes = service.checkout(&session(), vec![line]);
        assert!(matches!(
            outcomes[0].result,
            Err(DomainError::InvalidInput(_))
        ));
    }
}
