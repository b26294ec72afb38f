//! Macro-generated test suite for `BillRepository` contract validation.
//!
//! The `bill_repository_tests!` macro generates a test module that validates
//! any `BillRepository` implementation: receipt creation, update with and
//! without a selector, deletion and concurrent uploads.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//!
//! use harness::*;
//!
//! bill_repository_tests!(InMemoryBillRepository::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_list_empty`: a fresh repository lists nothing
//! - `test_create_returns_key_and_url`: the URL ends with the receipt name
//! - `test_create_then_update`: the provisional record is completed in place
//! - `test_update_without_selector`: a new record is created under a new key
//! - `test_update_unknown_selector`: rejected as not found
//! - `test_update_invalid_payload`: malformed JSON is rejected
//! - `test_delete_existing`: the record disappears from the listing
//! - `test_delete_unknown`: rejected as not found
//! - `test_concurrent_creates`: parallel uploads get distinct keys

/// Generate a `BillRepository` conformance test suite.
///
/// `$factory` is re-evaluated for each test. The concurrent test also needs
/// the repository to be `Clone + 'static` with shared state.
#[macro_export]
macro_rules! bill_repository_tests {
    ($factory:expr) => {
        mod bill_repository_contract_tests {
            use super::*;
            use billed::prelude::*;
            use std::collections::HashSet;

            fn upload(name: &str) -> ReceiptUpload {
                ReceiptUpload {
                    file: ReceiptFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF]),
                    email: "employee@test.tld".to_string(),
                }
            }

            fn completed(email: &str) -> String {
                serde_json::json!({
                    "email": email,
                    "type": "Transports",
                    "name": "Vol Paris Londres",
                    "amount": 348,
                    "date": "2022-04-22",
                    "vat": "70",
                    "pct": 20,
                    "commentary": "",
                    "status": "pending",
                })
                .to_string()
            }

            #[tokio::test]
            async fn test_list_empty() {
                let repository = $factory;
                assert!(repository.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_create_returns_key_and_url() {
                let repository = $factory;

                let created = repository.create(upload("ticket.jpg")).await.unwrap();

                assert!(!created.key.is_empty());
                assert!(created.file_url.ends_with("ticket.jpg"));
            }

            #[tokio::test]
            async fn test_create_then_update() {
                let repository = $factory;
                let created = repository.create(upload("ticket.jpg")).await.unwrap();

                let saved = repository
                    .update(Some(&created.key), &completed("employee@test.tld"))
                    .await
                    .unwrap();

                assert_eq!(saved.id, created.key);
                assert_eq!(saved.name, "Vol Paris Londres");

                let bills = repository.list().await.unwrap();
                assert_eq!(bills.len(), 1);
                assert_eq!(bills[0].id, created.key);
                assert_eq!(bills[0].amount, 348);
            }

            #[tokio::test]
            async fn test_update_without_selector() {
                let repository = $factory;

                let saved = repository
                    .update(None, &completed("employee@test.tld"))
                    .await
                    .unwrap();

                assert!(!saved.id.is_empty());
                let bills = repository.list().await.unwrap();
                assert_eq!(bills.len(), 1);
                assert_eq!(bills[0].id, saved.id);
            }

            #[tokio::test]
            async fn test_update_unknown_selector() {
                let repository = $factory;

                let err = repository
                    .update(Some("missing"), &completed("employee@test.tld"))
                    .await
                    .unwrap_err();

                assert_eq!(err.error_code(), "BILL_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_update_invalid_payload() {
                let repository = $factory;
                let created = repository.create(upload("ticket.jpg")).await.unwrap();

                let err = repository
                    .update(Some(&created.key), "{not json")
                    .await
                    .unwrap_err();

                assert_eq!(err.error_code(), "INVALID_PAYLOAD");
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repository = $factory;
                let created = repository.create(upload("ticket.jpg")).await.unwrap();

                repository.delete(&created.key).await.unwrap();

                assert!(repository.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_unknown() {
                let repository = $factory;

                let err = repository.delete("missing").await.unwrap_err();

                assert_eq!(err.error_code(), "BILL_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_concurrent_creates() {
                let repository = $factory;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let repository = repository.clone();
                    handles.push(tokio::spawn(async move {
                        repository
                            .create(upload(&format!("ticket-{}.jpg", i)))
                            .await
                            .unwrap()
                            .key
                    }));
                }

                let mut keys = HashSet::new();
                for handle in handles {
                    keys.insert(handle.await.unwrap());
                }

                assert_eq!(keys.len(), 10);
                assert_eq!(repository.list().await.unwrap().len(), 10);
            }
        }
    };
}
