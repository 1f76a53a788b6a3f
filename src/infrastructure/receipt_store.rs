use std::fs;
use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::ports::{Bucket, ReceiptStore};

/// Object storage backed by a local directory, one subdirectory per
/// bucket. Files are served publicly under `public_base_url` by the
/// static-file gateway.
pub struct FsReceiptStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsReceiptStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Keys are generated internally, but refuse anything that could leave
/// the bucket directory.
fn validate_key(key: &str) -> Result<(), DomainError> {
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(DomainError::Storage(format!("Invalid object key: {key}")));
    }
    Ok(())
}

impl ReceiptStore for FsReceiptStore {
    fn store(&self, bucket: Bucket, key: &str, bytes: &[u8]) -> Result<String, DomainError> {
        validate_key(key)?;
        let dir = self.root.join(bucket.as_str());
        fs::create_dir_all(&dir).map_err(|e| DomainError::Storage(e.to_string()))?;
        fs::write(dir.join(key), bytes).map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(format!(
            "{}/{}/{}",
            self.public_base_url,
            bucket.as_str(),
            key
        ))
    }

    fn remove(&self, bucket: Bucket, key: &str) -> Result<(), DomainError> {
        validate_key(key)?;
        fs::remove_file(self.root.join(bucket.as_str()).join(key))
            .map_err(|e| DomainError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_writes_the_bytes_and_returns_the_public_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsReceiptStore::new(dir.path(), "http://storage.local/");

        let url = store
            .store(Bucket::PaymentPicture, "payment_1_2", b"receipt")
            .expect("store failed");

        assert_eq!(url, "http://storage.local/payment-picture/payment_1_2");
        let written = std::fs::read(dir.path().join("payment-picture/payment_1_2")).unwrap();
        assert_eq!(written, b"receipt");
    }

    #[test]
    fn remove_deletes_the_object() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsReceiptStore::new(dir.path(), "http://storage.local");
        store
            .store(Bucket::PaymentPicture, "payment_1_2", b"receipt")
            .expect("store failed");

        store
            .remove(Bucket::PaymentPicture, "payment_1_2")
            .expect("remove failed");

        assert!(!dir.path().join("payment-picture/payment_1_2").exists());
    }

    #[test]
    fn removing_a_missing_object_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsReceiptStore::new(dir.path(), "http://storage.local");

        assert!(store.remove(Bucket::PaymentPicture, "nope").is_err());
    }

    #[test]
    fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsReceiptStore::new(dir.path(), "http://storage.local");

        for key in ["../escape", "a/b", "a\\b", ""] {
            assert!(
                store.store(Bucket::PaymentPicture, key, b"x").is_err(),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn buckets_are_kept_apart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsReceiptStore::new(dir.path(), "http://storage.local");

        store
            .store(Bucket::PaymentPicture, "k", b"payment")
            .expect("store failed");
        store
            .store(Bucket::MerchPicture, "k", b"merch")
            .expect("store failed");

        assert_eq!(
            std::fs::read(dir.path().join("payment-picture/k")).unwrap(),
            b"payment"
        );
        assert_eq!(
            std::fs::read(dir.path().join("merch-picture/k")).unwrap(),
            b"merch"
        );
    }
}
