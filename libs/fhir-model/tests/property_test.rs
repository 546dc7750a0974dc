//! Property-based tests using QuickCheck

use ferrum_model::{AnyResource, Basic, Code, DataValue, FhirString, Identifier, Observation, Parameters, Uri};
use quickcheck::{QuickCheck, TestResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

mod test_support;
use test_support::*;

const STATUSES: [&str; 4] = ["registered", "preliminary", "final", "amended"];

fn identifiers(values: &[String]) -> Option<Vec<Identifier>> {
    values
        .iter()
        .map(|v| {
            let value = FhirString::new(v.as_str()).ok()?;
            Identifier::builder()
                .system(Uri::new("urn:sys").ok()?)
                .value(value)
                .build()
                .ok()
        })
        .collect()
}

fn observation(status: u8, values: &[String], rate: i64) -> Option<Observation> {
    let status = STATUSES[status as usize % STATUSES.len()];
    Observation::builder()
        .status(Code::new(status).ok()?)
        .code(loinc("8867-4"))
        .identifier(identifiers(values)?)
        .value(quantity(rate, "beats/minute"))
        .build()
        .ok()
}

fn std_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Property: equal inputs build equal instances with equal hashes
#[test]
fn prop_equal_inputs_hash_equal() {
    fn prop(status: u8, values: Vec<String>, rate: i64) -> TestResult {
        let (Some(a), Some(b)) = (
            observation(status, &values, rate),
            observation(status, &values, rate),
        ) else {
            return TestResult::discard();
        };
        TestResult::from_bool(a == b && a.hash_code() == b.hash_code() && std_hash(&a) == std_hash(&b))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(u8, Vec<String>, i64) -> TestResult);
}

/// Property: to_builder().build() reproduces the instance
#[test]
fn prop_round_trip_preserves_equality() {
    fn prop(status: u8, values: Vec<String>, rate: i64) -> TestResult {
        let Some(original) = observation(status, &values, rate) else {
            return TestResult::discard();
        };
        let rebuilt = match original.to_builder().build() {
            Ok(rebuilt) => rebuilt,
            Err(_) => return TestResult::failed(),
        };
        TestResult::from_bool(rebuilt == original && rebuilt.hash_code() == original.hash_code())
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(u8, Vec<String>, i64) -> TestResult);
}

/// Property: instances that differ in one declared element are unequal
#[test]
fn prop_differing_values_are_unequal() {
    fn prop(rate: i64, other: i64) -> TestResult {
        if rate == other {
            return TestResult::discard();
        }
        let (Some(a), Some(b)) = (
            observation(2, &[], rate),
            observation(2, &[], other),
        ) else {
            return TestResult::discard();
        };
        TestResult::from_bool(a != b)
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(i64, i64) -> TestResult);
}

/// Property: identifier order is significant
#[test]
fn prop_identifier_order_matters() {
    fn prop(first: String, second: String) -> TestResult {
        if first == second {
            return TestResult::discard();
        }
        let build = |values: [&String; 2]| -> Option<Basic> {
            Basic::builder()
                .identifier(identifiers(&[values[0].clone(), values[1].clone()])?)
                .code(loinc("8867-4"))
                .build()
                .ok()
        };
        let (Some(a), Some(b)) = (build([&first, &second]), build([&second, &first])) else {
            return TestResult::discard();
        };
        TestResult::from_bool(a != b && a.identifier()[0] == b.identifier()[1])
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(String, String) -> TestResult);
}

/// Property: the cached hash is stable across repeated calls and clones
#[test]
fn prop_cached_hash_is_stable() {
    fn prop(values: Vec<String>) -> TestResult {
        let Some(a) = observation(0, &values, 60) else {
            return TestResult::discard();
        };
        let first = a.hash_code();
        let clone = a.clone();
        TestResult::from_bool(first == a.hash_code() && first == clone.hash_code())
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn model_values_are_send_and_sync() {
    assert_send_sync::<Observation>();
    assert_send_sync::<Parameters>();
    assert_send_sync::<AnyResource>();
    assert_send_sync::<DataValue>();
}

/// Property: concurrent first calls to hash_code agree with an independently built value
#[test]
fn prop_concurrent_hashing_agrees() {
    fn prop(status: u8, values: Vec<String>, rate: i64) -> TestResult {
        let (Some(shared), Some(reference)) = (
            observation(status, &values, rate),
            observation(status, &values, rate),
        ) else {
            return TestResult::discard();
        };
        let expected = reference.hash_code();
        let hashes: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| shared.hash_code())).collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_default())
                .collect()
        });
        TestResult::from_bool(
            hashes.iter().all(|hash| *hash == expected) && shared.hash_code() == expected,
        )
    }

    QuickCheck::new()
        .tests(20)
        .quickcheck(prop as fn(u8, Vec<String>, i64) -> TestResult);
}
