//! Number validators. Bounds are inclusive.

use std::fmt::Display;

use super::{invalid, valid, JsValidator};
use crate::env::ReaderEnv;
use crate::error::JsError;
use crate::location::Location;

/// Requires the value to be at least `min`.
pub fn minimum<EB, T>(min: T) -> JsValidator<EB, T>
where
    EB: 'static,
    T: PartialOrd + Display + Send + Sync + 'static,
{
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, value: &T| {
        if *value < min {
            invalid(
                location,
                JsError::Minimum {
                    expected: min.to_string(),
                    actual: value.to_string(),
                },
            )
        } else {
            valid()
        }
    })
}

/// Requires the value to be at most `max`.
pub fn maximum<EB, T>(max: T) -> JsValidator<EB, T>
where
    EB: 'static,
    T: PartialOrd + Display + Send + Sync + 'static,
{
    JsValidator::from_fn(move |_: &ReaderEnv<EB>, location: &Location, value: &T| {
        if *value > max {
            invalid(
                location,
                JsError::Maximum {
                    expected: max.to_string(),
                    actual: value.to_string(),
                },
            )
        } else {
            valid()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DefaultErrorBuilders;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_minimum_inclusive() {
        let env = ReaderEnv::default();
        let validator = minimum::<DefaultErrorBuilders, i32>(18);
        assert!(validator.validate(&env, &Location::root(), &18).is_success());
        assert!(validator.validate(&env, &Location::root(), &17).is_failure());
    }

    #[test]
    fn test_maximum_inclusive() {
        let env = ReaderEnv::default();
        let validator = maximum::<DefaultErrorBuilders, i64>(100);
        assert!(validator.validate(&env, &Location::root(), &100).is_success());
        assert!(validator.validate(&env, &Location::root(), &101).is_failure());
    }

    #[test]
    fn test_range_on_decimal() {
        let env = ReaderEnv::default();
        let price = minimum::<DefaultErrorBuilders, Decimal>(Decimal::ZERO)
            .and(maximum(Decimal::from_str("99.99").unwrap()));

        assert!(price
            .validate(&env, &Location::root(), &Decimal::from_str("12.50").unwrap())
            .is_success());

        let result = price
            .validate(&env, &Location::root(), &Decimal::from_str("100").unwrap())
            .into_result();
        let failure = result.unwrap_err();
        assert_eq!(
            failure.first().error(),
            &JsError::Maximum {
                expected: "99.99".to_string(),
                actual: "100".to_string()
            }
        );
    }
}
