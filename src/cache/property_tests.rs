//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify storage and codec behavior across generated
//! inputs: header serialization survives a round trip, the TTL store keeps
//! the latest complete value, and the disk backend returns entries exactly
//! as stored.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use tempfile::TempDir;

use super::disk::{decode_headers, encode_headers};
use super::{cache_key, DiskStore, ResponseEntry, TtlStore};

// == Test Configuration ==
/// TTL long enough that nothing expires mid-test
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates valid HTTP status codes
fn status_strategy() -> impl Strategy<Value = StatusCode> {
    (100u16..600).prop_map(|code| StatusCode::from_u16(code).unwrap())
}

/// Generates lowercase header names
fn header_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

/// Generates printable ASCII header values, commas and quotes included
fn header_value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

/// Generates header maps, with repeated names becoming multi-value headers
fn headers_strategy() -> impl Strategy<Value = HeaderMap> {
    prop::collection::vec((header_name_strategy(), header_value_strategy()), 0..8).prop_map(
        |pairs| {
            let mut headers = HeaderMap::new();
            for (name, value) in pairs {
                let name: HeaderName = name.parse().unwrap();
                let value = HeaderValue::from_str(&value).unwrap();
                headers.append(name, value);
            }
            headers
        },
    )
}

/// Generates arbitrary binary bodies
fn body_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

/// Generates complete response entries
fn entry_strategy() -> impl Strategy<Value = ResponseEntry> {
    (status_strategy(), headers_strategy(), body_strategy())
        .prop_map(|(status, headers, body)| ResponseEntry::new(status, headers, body))
}

/// Generates cache keys that map to well-formed entry directories
fn disk_key_strategy() -> impl Strategy<Value = String> {
    "GET-/[a-z0-9]{1,12}(/[a-z0-9]{1,8}){0,2}"
}

/// Concurrent operations exercised against a shared store
#[derive(Debug, Clone)]
enum StoreOp {
    Put { key: String },
    Get { key: String },
    Clear,
    Sweep,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    // A five-key space keeps the operations colliding
    let key = "key_[a-e]";
    prop_oneof![
        key.prop_map(|key| StoreOp::Put { key }),
        key.prop_map(|key| StoreOp::Get { key }),
        Just(StoreOp::Clear),
        Just(StoreOp::Sweep),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_headers_codec_roundtrip(headers in headers_strategy()) {
        let encoded = encode_headers(&headers);
        let decoded = decode_headers(&encoded);
        prop_assert_eq!(decoded, headers, "Decoded map should match the original");
    }

    #[test]
    fn prop_cache_key_deterministic(
        method_idx in 0usize..4,
        path in "/[a-zA-Z0-9/_-]{0,30}"
    ) {
        let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
        let method = &methods[method_idx];
        prop_assert_eq!(cache_key(method, &path), cache_key(method, &path));
    }

    #[test]
    fn prop_cache_key_separates_methods(path in "/[a-zA-Z0-9/_-]{0,30}") {
        prop_assert_ne!(
            cache_key(&Method::GET, &path),
            cache_key(&Method::POST, &path)
        );
    }

    #[test]
    fn prop_ttl_store_roundtrip(key in "[a-zA-Z0-9_-]{1,32}", value in "[ -~]{0,64}") {
        tokio_test::block_on(async {
            let store = TtlStore::new(TEST_TTL);
            store.put(key.clone(), value.clone()).await;
            prop_assert_eq!(store.get(&key).await, Some(value));
            Ok(())
        })?;
    }

    #[test]
    fn prop_ttl_store_overwrite_keeps_latest(
        key in "[a-zA-Z0-9_-]{1,32}",
        first in "[ -~]{0,64}",
        second in "[ -~]{0,64}"
    ) {
        tokio_test::block_on(async {
            let store = TtlStore::new(TEST_TTL);
            store.put(key.clone(), first).await;
            store.put(key.clone(), second.clone()).await;
            prop_assert_eq!(store.get(&key).await, Some(second));
            prop_assert_eq!(store.len().await, 1, "Overwrite must not add a record");
            Ok(())
        })?;
    }

    #[test]
    fn prop_zero_ttl_never_served(key in "[a-zA-Z0-9_-]{1,32}", value in "[ -~]{0,64}") {
        tokio_test::block_on(async {
            let store = TtlStore::new(Duration::ZERO);
            store.put(key.clone(), value).await;
            prop_assert_eq!(store.get(&key).await, None);
            Ok(())
        })?;
    }
}

// Fewer cases here; every one of these touches the filesystem
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_disk_roundtrip(key in disk_key_strategy(), entry in entry_strategy()) {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());
        tokio_test::block_on(async {
            store.set(&key, &entry).await.unwrap();
            prop_assert_eq!(store.get(&key).await, Some(entry));
            Ok(())
        })?;
    }

    #[test]
    fn prop_disk_clear_empties(key in disk_key_strategy(), entry in entry_strategy()) {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());
        tokio_test::block_on(async {
            store.set(&key, &entry).await.unwrap();
            store.clear().await.unwrap();
            prop_assert_eq!(store.get(&key).await, None);
            Ok(())
        })?;
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    #[test]
    fn prop_ttl_expiry(key in "[a-zA-Z0-9_-]{1,32}", value in "[ -~]{0,64}") {
        tokio_test::block_on(async {
            let store = TtlStore::new(Duration::from_millis(150));
            store.put(key.clone(), value.clone()).await;
            prop_assert_eq!(store.get(&key).await, Some(value));

            tokio::time::sleep(Duration::from_millis(200)).await;
            prop_assert_eq!(store.get(&key).await, None);
            Ok(())
        })?;
    }
}

// == Property Test for Concurrent Operation Correctness ==
// Reads racing writes, clears and sweeps must only ever observe complete values

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_concurrent_store_consistency(
        operations in prop::collection::vec(store_op_strategy(), 10..50)
    ) {
        // Create a runtime for async operations
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let store = Arc::new(TtlStore::new(TEST_TTL));

            let mut handles = vec![];
            for op in operations {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    match op {
                        StoreOp::Put { key } => {
                            let value = format!("value_{}", key);
                            store.put(key, value).await;
                        }
                        StoreOp::Get { key } => {
                            if let Some(value) = store.get(&key).await {
                                // A read must observe a complete stored value
                                assert_eq!(value, format!("value_{}", key));
                            }
                        }
                        StoreOp::Clear => {
                            store.clear().await;
                        }
                        StoreOp::Sweep => {
                            store.sweep().await;
                        }
                    }
                }));
            }

            for handle in handles {
                handle.await.expect("Task should not panic");
            }

            // Every surviving record is still the complete value for its key
            prop_assert!(
                store.len().await <= 5,
                "More records than distinct keys"
            );
            for key in ["key_a", "key_b", "key_c", "key_d", "key_e"] {
                if let Some(value) = store.get(key).await {
                    prop_assert_eq!(value, format!("value_{}", key));
                }
            }

            Ok(())
        })?;
    }
}
