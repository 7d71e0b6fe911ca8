//! Tests for validator composition.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assay::validator::{invalid, numbers, strings, valid};
use assay::{DefaultErrorBuilders, JsError, JsValidator, Location, ReaderEnv, ValidationResult};
use stillwater::Validation;

type EB = DefaultErrorBuilders;

fn rejecting(code: &'static str) -> JsValidator<EB, String> {
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, _: &String| {
        invalid(location, JsError::custom(code, format!("rejected by {}", code)))
    })
}

fn counting(calls: &Arc<AtomicUsize>, result: fn(&Location) -> ValidationResult) -> JsValidator<EB, String> {
    let calls = Arc::clone(calls);
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, _: &String| {
        calls.fetch_add(1, Ordering::SeqCst);
        result(location)
    })
}

fn codes(result: ValidationResult) -> Vec<String> {
    match result {
        Validation::Success(()) => Vec::new(),
        Validation::Failure(failure) => failure
            .iter()
            .flat_map(|cause| cause.iter().map(|e| e.code().to_string()).collect::<Vec<_>>())
            .collect(),
    }
}

fn run(validator: &JsValidator<EB, String>, value: &str) -> ValidationResult {
    validator.validate(&ReaderEnv::default(), &Location::root().key("field"), &value.to_string())
}

#[test]
fn test_and_short_circuit_never_runs_right() {
    let calls = Arc::new(AtomicUsize::new(0));
    let right = counting(&calls, |location| invalid(location, JsError::custom("e2", "e2")));

    let result = run(&rejecting("e1").and(right), "x");

    assert_eq!(codes(result), vec!["e1"]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_and_runs_right_after_valid_left() {
    let calls = Arc::new(AtomicUsize::new(0));
    let left = counting(&calls, |_| valid());

    let result = run(&left.and(rejecting("e2")), "x");
    assert_eq!(codes(result), vec!["e2"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_or_merges_failures_left_then_right() {
    let result = run(&rejecting("e1").or(rejecting("e2")), "x");
    assert_eq!(codes(result), vec!["e1", "e2"]);
}

#[test]
fn test_or_short_circuit_never_runs_right() {
    let calls = Arc::new(AtomicUsize::new(0));
    let left = JsValidator::from_fn(|_: &ReaderEnv<EB>, _: &Location, _: &String| valid());
    let right = counting(&calls, |_| valid());

    assert!(run(&left.or(right), "x").is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_or_discards_left_failure_when_right_valid() {
    let accepting = JsValidator::from_fn(|_: &ReaderEnv<EB>, _: &Location, _: &String| valid());
    assert!(run(&rejecting("e1").or(accepting), "x").is_success());
}

#[test]
fn test_union_of_shapes_reports_both_reasons() {
    let code = strings::pattern::<EB>(r"^[A-Z]{3}$").unwrap();
    let number = strings::pattern::<EB>(r"^\d+$").unwrap();
    let either = code.or(number);

    assert!(run(&either, "ABC").is_success());
    assert!(run(&either, "123").is_success());
    assert_eq!(codes(run(&either, "ab1")), vec!["pattern", "pattern"]);
}

#[test]
fn test_string_validators_compose() {
    let name = strings::is_not_blank::<EB>()
        .and(strings::min_length(2))
        .and(strings::max_length(5));

    assert!(run(&name, "Ada").is_success());
    assert_eq!(codes(run(&name, " ")), vec!["blank"]);
    assert_eq!(codes(run(&name, "A")), vec!["min_length"]);
    assert_eq!(codes(run(&name, "Adaline")), vec!["max_length"]);
}

#[test]
fn test_number_range() {
    let env = ReaderEnv::default();
    let percent = numbers::minimum::<EB, i64>(0).and(numbers::maximum(100));
    assert!(percent.validate(&env, &Location::root(), &0).is_success());
    assert!(percent.validate(&env, &Location::root(), &100).is_success());
    assert_eq!(
        codes(percent.validate(&env, &Location::root(), &-1)),
        vec!["minimum"]
    );
    assert_eq!(
        codes(percent.validate(&env, &Location::root(), &101)),
        vec!["maximum"]
    );
}
