//! Integration tests for usecases_decimal_rounding crate
//!
//! These tests round parsed decimal values through the named presets and
//! derived contexts, checking values, signaled conditions and traps.

use entities_arithmetic_context::{ArithmeticContext, ContextError, Flags, Rounding};
use entities_utilities::BigDecimal;
use malachite::{Integer, Natural};
use quickcheck_macros::quickcheck;
use usecases_decimal_rounding::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn dec(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

#[test]
fn test_cli_decimal_saturates_to_infinity() {
    init_tracing();
    let mut ctx = ArithmeticContext::cli_decimal().with_blank_flags();
    let value = round_with_flags(&dec("-9.3168444507547E+28"), &mut ctx).unwrap();
    assert_eq!(value, BigDecimal::infinity(true));
    assert!(ctx.flags().contains(Flags::OVERFLOW));
}

#[test]
fn test_cli_decimal_rounds_to_integer_part() {
    init_tracing();
    let value = dec("-9344285899206687626894794544.04982268810272216796875");
    let rounded = round_to_context(&value, ArithmeticContext::cli_decimal());
    assert_eq!(rounded.value, dec("-9344285899206687626894794544"));
}

#[test]
fn test_cli_decimal_largest_value_is_exact() {
    let max = dec("79228162514264337593543950335");
    let rounded = round_to_context(&max, ArithmeticContext::cli_decimal());
    assert_eq!(rounded.value, max);
    assert!(rounded.conditions.is_empty());

    let over = dec("79228162514264337593543950336");
    let rounded = round_to_context(&over, ArithmeticContext::cli_decimal());
    assert!(rounded.value.is_infinite());
}

#[test]
fn test_rounding_modes_on_ties() {
    // (mode, 2.5, -2.5, 2.4)
    let cases = [
        (Rounding::Up, "3", "-3", "3"),
        (Rounding::Down, "2", "-2", "2"),
        (Rounding::Ceiling, "3", "-2", "3"),
        (Rounding::Floor, "2", "-3", "2"),
        (Rounding::HalfUp, "3", "-3", "2"),
        (Rounding::HalfDown, "2", "-2", "2"),
        (Rounding::HalfEven, "2", "-2", "2"),
        (Rounding::Odd, "3", "-3", "3"),
        (Rounding::ZeroFiveUp, "2", "-2", "2"),
        (Rounding::OddOrZeroFiveUp, "2", "-2", "2"),
    ];
    for (mode, pos, neg, below) in cases {
        let ctx = ArithmeticContext::for_precision_and_rounding(1, mode).unwrap();
        assert_eq!(round_to_context(&dec("2.5"), &ctx).value.to_string(), pos, "{}", mode);
        assert_eq!(round_to_context(&dec("-2.5"), &ctx).value.to_string(), neg, "{}", mode);
        assert_eq!(round_to_context(&dec("2.4"), &ctx).value.to_string(), below, "{}", mode);
    }
}

#[test]
fn test_zero_five_up_on_zero_digit() {
    let ctx = ArithmeticContext::for_precision_and_rounding(2, Rounding::ZeroFiveUp).unwrap();
    assert_eq!(round_to_context(&dec("1.01"), &ctx).value.to_string(), "1.1");
    assert_eq!(round_to_context(&dec("1.51"), &ctx).value.to_string(), "1.6");
}

#[test]
fn test_traps_on_derived_context() {
    let mut ctx = ArithmeticContext::decimal64()
        .with_traps(Flags::INEXACT)
        .with_blank_flags();
    assert!(round_with_flags(&dec("1.5"), &mut ctx).is_ok());

    let err = round_with_flags(&dec("1.00000000000000001"), &mut ctx).unwrap_err();
    assert_eq!(
        err,
        RoundingError::Context(ContextError::Trapped {
            conditions: Flags::INEXACT
        })
    );
    assert!(err.to_string().contains("INEXACT"));
    assert_eq!(ctx.flags(), Flags::INEXACT | Flags::ROUNDED);
}

#[test]
fn test_flags_not_recorded_without_support() {
    let mut ctx = ArithmeticContext::decimal64().clone();
    let value = round_with_flags(&dec("1.00000000000000001"), &mut ctx).unwrap();
    assert_eq!(value.to_string(), "1.000000000000000");
    assert!(ctx.flags().is_empty());
}

#[test]
fn test_unlimited_context_keeps_value() {
    let value = dec("123456789012345678901234567890.123456789E-999999");
    let rounded = round_to_context(&value, ArithmeticContext::unlimited());
    assert_eq!(rounded.value, value);
    assert!(rounded.conditions.is_empty());
}

#[test]
fn test_bounded_unlimited_precision_overflows() {
    let ctx = ArithmeticContext::unlimited().with_exponent_range(-5, 5).unwrap();
    let rounded = round_to_context(&dec("1E+6"), &ctx);
    assert_eq!(rounded.value, BigDecimal::infinity(false));
    let rounded = round_to_context(&dec("123456E-5"), &ctx);
    assert_eq!(rounded.value.to_string(), "1.23456");
}

#[test]
fn test_huge_precisions_return() {
    init_tracing();
    let base = ArithmeticContext::for_precision_and_rounding(i64::MAX, Rounding::HalfEven).unwrap();
    let contexts = [
        base.clone(),
        base.with_precision_in_bits(true),
        base.with_exponent_range(-10, 10).unwrap(),
        base.with_precision_in_bits(true).with_exponent_range(-10, 10).unwrap(),
        base.with_exponent_range(-10, 10)
            .unwrap()
            .with_adjust_exponent(false)
            .with_exponent_clamp(true),
    ];
    for ctx in &contexts {
        for text in ["1", "-1E+1000", "1E-1000", "0E+1000"] {
            let rounded = round_to_context(&dec(text), ctx);
            assert!(!rounded.value.is_nan(), "{} in {}", text, ctx);
        }
    }

    // raw exponents pad into the coefficient while the padding stays small
    let raw = &contexts[4];
    let rounded = round_to_context(&dec("1E+50"), raw);
    assert_eq!(rounded.value.exponent(), Some(&Integer::from(10)));
    assert_eq!(rounded.conditions, Flags::CLAMPED);
    let rounded = round_to_context(&dec("1E+100000000000"), raw);
    assert_eq!(rounded.value, BigDecimal::infinity(false));
}

#[quickcheck]
fn prop_large_precision_keeps_value(
    shift: u8,
    in_bits: bool,
    ranged: bool,
    mode: u8,
    coefficient: u64,
    exponent: i16,
) -> bool {
    let precision = i64::MAX >> (shift % 40);
    let rounding = Rounding::ALL[mode as usize % Rounding::ALL.len()];
    let mut ctx = ArithmeticContext::for_precision_and_rounding(precision, rounding)
        .unwrap()
        .with_precision_in_bits(in_bits);
    if ranged {
        ctx = ctx.with_exponent_range(-1000, 1000).unwrap();
    }
    let value = BigDecimal::finite(false, Natural::from(coefficient), Integer::from(exponent));
    let rounded = round_to_context(&value, &ctx);
    let adjusted = value.adjusted_exponent().unwrap();
    if !ranged || adjusted <= 1000 {
        rounded.value == value
    } else if coefficient == 0 {
        rounded.value.is_zero()
    } else {
        !rounded.value.is_finite()
    }
}

#[quickcheck]
fn prop_unlimited_is_identity(coefficient: i64, exponent: i32) -> bool {
    let value = BigDecimal::from_integer(&Integer::from(coefficient), exponent as i64);
    let rounded = round_to_context(&value, ArithmeticContext::unlimited());
    rounded.value == value && rounded.conditions.is_empty()
}

#[quickcheck]
fn prop_result_fits_precision(coefficient: u64, exponent: i16, precision: u8) -> bool {
    let precision = (precision % 20) as i64 + 1;
    let ctx = ArithmeticContext::for_precision_and_rounding(precision, Rounding::HalfEven).unwrap();
    let value = BigDecimal::finite(false, Natural::from(coefficient), Integer::from(exponent));
    let rounded = round_to_context(&value, &ctx);
    match rounded.value.digit_count() {
        Some(digits) => digits <= precision as u64,
        None => false,
    }
}

#[quickcheck]
fn prop_inexact_implies_rounded(coefficient: u64, precision: u8) -> bool {
    let precision = (precision % 10) as i64 + 1;
    let ctx = ArithmeticContext::for_precision(precision).unwrap();
    let value = BigDecimal::finite(true, Natural::from(coefficient), Integer::from(-3));
    let conditions = round_to_context(&value, &ctx).conditions;
    !conditions.contains(Flags::INEXACT) || conditions.contains(Flags::ROUNDED)
}
