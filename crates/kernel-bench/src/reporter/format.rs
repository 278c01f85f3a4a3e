//! Numeric display forms
//!
//! Two renderers: a bounded form for compact chart labels and tables, and a
//! full-decimal form for comparing near-equal values digit by digit.

/// Magnitudes outside `[1e-4, 1e4]` switch to scientific notation.
const SCIENTIFIC_BELOW: f64 = 1e-4;
const SCIENTIFIC_ABOVE: f64 = 1e4;
const BOUNDED_DIGITS: usize = 4;
/// Longer than the exact decimal expansion of any finite `f64`.
const EXACT_DIGITS: usize = 1100;

/// Compact display form.
///
/// `0` renders as `"0"`. Magnitudes below `1e-4` or above `1e4` use
/// scientific notation with four fractional digits, and everything else uses
/// fixed-point with four fractional digits.
///
/// Rounding works on the exact binary value, with exact halves going away
/// from zero: `0.03125` becomes `0.0313`, while `2.00005` (stored slightly
/// below the half) becomes `2.0000`.
///
/// ```
/// use kernel_bench::reporter::format::format_bounded;
///
/// assert_eq!(format_bounded(0.0), "0");
/// assert_eq!(format_bounded(3.14159), "3.1416");
/// assert_eq!(format_bounded(0.0000123456), "1.2346e-5");
/// assert_eq!(format_bounded(123456.0), "1.2346e+5");
/// assert_eq!(format_bounded(12344.5), "1.2345e+4");
/// ```
pub fn format_bounded(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return non_finite_text(value);
    }

    let magnitude = value.abs();
    if magnitude < SCIENTIFIC_BELOW || magnitude > SCIENTIFIC_ABOVE {
        scientific(value, BOUNDED_DIGITS)
    } else {
        round_decimal(&format!("{:.*}", EXACT_DIGITS, value), BOUNDED_DIGITS)
    }
}

/// Lossless plain-decimal form.
///
/// `0` renders as `"0"` and non-finite values as `NaN`, `Infinity` or
/// `-Infinity`. Otherwise the shortest round-trip digits are written out
/// without an exponent and trailing fractional zeros are removed, so parsing
/// the output gives back exactly `value`.
///
/// ```
/// use kernel_bench::reporter::format::format_full_decimal;
///
/// assert_eq!(format_full_decimal(1.23e-7), "0.000000123");
/// assert_eq!(format_full_decimal(0.0), "0");
/// assert_eq!(format_full_decimal(2.5e21), "2500000000000000000000");
/// ```
pub fn format_full_decimal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return non_finite_text(value);
    }
    expand_scientific(&format!("{:e}", value))
}

/// Rewrite `<mantissa>e<exponent>` as a plain decimal.
fn expand_scientific(text: &str) -> String {
    let Some((mantissa, exponent)) = text.split_once(|c| c == 'e' || c == 'E') else {
        return strip_fraction_zeros(text).to_string();
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        return text.to_string();
    };

    let (sign, mantissa) = split_sign(mantissa);
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{}{}", whole, fraction);

    // Position of the decimal point within `digits` after shifting.
    let point = whole.len() as i64 + exponent;
    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    };

    format!("{}{}", sign, strip_fraction_zeros(&body))
}

fn strip_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn scientific(value: f64, digits: usize) -> String {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return exact;
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return exact;
    };

    let mut mantissa = round_decimal(mantissa, digits);
    // 9.99995 rounds up to 10.0000
    let (sign, unsigned) = split_sign(&mantissa);
    if unsigned.starts_with("10") {
        mantissa = format!("{}1.{}", sign, "0".repeat(digits));
        exponent += 1;
    }

    if exponent < 0 {
        format!("{}e{}", mantissa, exponent)
    } else {
        format!("{}e+{}", mantissa, exponent)
    }
}

/// Round a plain decimal to `digits` fractional digits, halves away from
/// zero.
///
/// `text` must carry the exact digits of the value; only the first dropped
/// digit is inspected.
fn round_decimal(text: &str, digits: usize) -> String {
    let (sign, unsigned) = split_sign(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let round_up = fraction
        .as_bytes()
        .get(digits)
        .is_some_and(|&digit| digit >= b'5');

    let padded_fraction = fraction.bytes().chain(std::iter::repeat(b'0'));
    let mut kept: Vec<u8> = whole.bytes().chain(padded_fraction.take(digits)).collect();
    if round_up {
        increment_digits(&mut kept);
    }

    let split = kept.len() - digits;
    let int_part: String = kept[..split].iter().map(|&d| char::from(d)).collect();
    let frac_part: String = kept[split..].iter().map(|&d| char::from(d)).collect();
    if frac_part.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}

/// Add one to an ASCII digit string, growing it on overflow.
fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn split_sign(text: &str) -> (&str, &str) {
    match text.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", text),
    }
}

fn non_finite_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_positive() {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounded_fixed_range() {
        assert_eq!(format_bounded(1.0), "1.0000");
        assert_eq!(format_bounded(-2.5), "-2.5000");
        assert_eq!(format_bounded(0.0001), "0.0001");
        assert_eq!(format_bounded(10000.0), "10000.0000");
    }

    #[test]
    fn test_bounded_scientific_range() {
        assert_eq!(format_bounded(0.00009), "9.0000e-5");
        assert_eq!(format_bounded(-1.5e-9), "-1.5000e-9");
        assert_eq!(format_bounded(10001.0), "1.0001e+4");
        assert_eq!(format_bounded(6.02e23), "6.0200e+23");
    }

    #[test]
    fn test_bounded_halves_round_away_from_zero() {
        assert_eq!(format_bounded(0.03125), "0.0313");
        assert_eq!(format_bounded(-0.03125), "-0.0313");
        assert_eq!(format_bounded(12344.5), "1.2345e+4");
        assert_eq!(format_bounded(-12344.5), "-1.2345e+4");
        assert_eq!(format_bounded(99999.5), "1.0000e+5");
        // Stored just below and just above the half respectively.
        assert_eq!(format_bounded(2.00005), "2.0000");
        assert_eq!(format_bounded(1.00005), "1.0001");
    }

    #[test]
    fn test_round_decimal_carries() {
        assert_eq!(round_decimal("9.99995", 4), "10.0000");
        assert_eq!(round_decimal("-0.123449999", 4), "-0.1234");
        assert_eq!(round_decimal("7", 2), "7.00");
        assert_eq!(round_decimal("2.5", 0), "3");
    }

    #[test]
    fn test_bounded_special_values() {
        assert_eq!(format_bounded(-0.0), "0");
        assert_eq!(format_bounded(f64::NAN), "NaN");
        assert_eq!(format_bounded(f64::INFINITY), "Infinity");
        assert_eq!(format_bounded(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_full_decimal_small_and_large() {
        assert_eq!(format_full_decimal(1.23e-7), "0.000000123");
        assert_eq!(format_full_decimal(-4.5e-3), "-0.0045");
        assert_eq!(format_full_decimal(1e21), "1000000000000000000000");
        assert_eq!(format_full_decimal(123.45), "123.45");
        assert_eq!(format_full_decimal(100.0), "100");
        assert_eq!(format_full_decimal(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_full_decimal_special_values() {
        assert_eq!(format_full_decimal(0.0), "0");
        assert_eq!(format_full_decimal(-0.0), "0");
        assert_eq!(format_full_decimal(f64::NAN), "NaN");
        assert_eq!(format_full_decimal(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_expand_scientific_edge_forms() {
        assert_eq!(expand_scientific("1.2340e+3"), "1234");
        assert_eq!(expand_scientific("5e-1"), "0.5");
        assert_eq!(expand_scientific("2.50"), "2.5");
    }

    proptest! {
        #[test]
        fn full_decimal_is_lossless(value in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL) {
            let text = format_full_decimal(value);
            prop_assert!(!text.contains('e'));
            prop_assert_eq!(text.parse::<f64>().unwrap(), value);
        }

        #[test]
        fn bounded_never_panics(value in any::<f64>()) {
            let text = format_bounded(value);
            prop_assert!(!text.is_empty());
        }
    }
}
