//! Fixed-point number formatting for table cells.
//!
//! `format!("{:.1}", x)` rounds exact ties to even, so `100.25` prints as
//! `100.2`. Table cells instead pick the larger magnitude on a tie
//! (`100.25` → `100.3`), decided on the exact binary value: `1.005` is really
//! `1.00499999...` and still prints as `1.00`.

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Format `value` with exactly `digits` fractional digits.
///
/// Non-finite values print as `NaN`, `Infinity` and `-Infinity`. Negative
/// values that round to zero keep their sign (`-0.001` → `-0.00`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let negative = value < 0.0;
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let frac_bytes = frac_part.as_bytes();
    let kept_frac = &frac_bytes[..digits.min(frac_bytes.len())];
    let mut kept: Vec<u8> = int_part.bytes().chain(kept_frac.iter().copied()).collect();
    // Pad if more digits were requested than the exact expansion carries.
    kept.resize(int_part.len() + digits, b'0');

    let mut int_len = int_part.len();
    let round_up = frac_bytes.get(digits).is_some_and(|&d| d >= b'5');
    if round_up && increment(&mut kept) {
        kept.insert(0, b'1');
        int_len += 1;
    }

    let mut out = String::with_capacity(kept.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(kept[..int_len].iter().map(|&b| b as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[int_len..].iter().map(|&b| b as char));
    }
    out
}

/// Add one to a run of ASCII digits. Returns true on carry out of the top digit.
fn increment(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(to_fixed(100.25, 1), "100.3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
    }

    #[test]
    fn near_ties_use_the_exact_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(8.456, 1), "8.5");
    }

    #[test]
    fn pads_with_zeros() {
        assert_eq!(to_fixed(1.2, 2), "1.20");
        assert_eq!(to_fixed(30.0, 1), "30.0");
        assert_eq!(to_fixed(45.0, 0), "45");
    }

    #[test]
    fn carry_propagates_into_integer_part() {
        assert_eq!(to_fixed(9.96, 1), "10.0");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.999, 2), "1.00");
    }

    #[test]
    fn sign_handling() {
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(-12.345, 1), "-12.3");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 0), "-Infinity");
    }

    proptest! {
        #[test]
        fn result_is_within_half_an_ulp_of_the_last_digit(x in -1.0e9f64..1.0e9, digits in 0usize..5) {
            let s = to_fixed(x, digits);
            let parsed: f64 = s.parse().unwrap();
            let half_step = 0.5 * 10f64.powi(-(digits as i32));
            prop_assert!((parsed - x).abs() <= half_step * (1.0 + 1e-9) + 1e-9 * x.abs().max(1.0));
        }

        #[test]
        fn fractional_width_is_exact(x in -1.0e6f64..1.0e6, digits in 0usize..6) {
            let s = to_fixed(x, digits);
            match s.split_once('.') {
                Some((_, frac)) => prop_assert_eq!(frac.len(), digits),
                None => prop_assert_eq!(digits, 0),
            }
        }
    }
}
