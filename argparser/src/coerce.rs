//! Text to typed value conversion for option arguments.
//!
//! Every conversion must consume the whole token. Range failures are kept
//! apart from syntax failures so the diagnostics can tell them apart.

/// Why a raw token could not become a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceError {
    /// No inline value and no following argument.
    Missing,
    /// Not a number at all, or trailing characters left over.
    Malformed,
    /// Syntactically a number, but not representable.
    OutOfRange,
}

/// Parse an integer the way `strtol(text, &end, 0)` would, but insisting
/// that `end` lands on the end of the token.
///
/// Accepts an optional sign, then `0x`/`0X` hex, a leading `0` for octal,
/// or plain decimal.
///
/// ```
/// use argparser::{parse_integer, CoerceError};
///
/// assert_eq!(parse_integer("-0x1f"), Ok(-31));
/// assert_eq!(parse_integer("010"), Ok(8));
/// assert_eq!(parse_integer("12px"), Err(CoerceError::Malformed));
/// ```
pub fn parse_integer(text: &str) -> Result<i64, CoerceError> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(CoerceError::Malformed);
    }

    // Digits are validated, so the only possible failure is overflow.
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| CoerceError::OutOfRange)?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).map_err(|_| CoerceError::OutOfRange)
}

/// Parse a decimal/exponent floating point literal (`inf` and `nan`
/// spellings included).
pub fn parse_float(text: &str) -> Result<f64, CoerceError> {
    let value: f64 = text.parse().map_err(|_| CoerceError::Malformed)?;

    if value.is_infinite() && !spells_infinity(text) {
        return Err(CoerceError::OutOfRange);
    }
    if value == 0.0 && has_nonzero_mantissa(text) {
        return Err(CoerceError::OutOfRange);
    }
    Ok(value)
}

/// Explicit boolean value given as `--flag=1` or `--flag=0`.
pub fn parse_flag(text: &str) -> Result<bool, CoerceError> {
    match text {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(CoerceError::Malformed),
    }
}

fn spells_infinity(text: &str) -> bool {
    text.trim_start_matches(['+', '-'])
        .get(..3)
        .is_some_and(|s| s.eq_ignore_ascii_case("inf"))
}

fn has_nonzero_mantissa(text: &str) -> bool {
    text.split(['e', 'E'])
        .next()
        .is_some_and(|m| m.bytes().any(|b| (b'1'..=b'9').contains(&b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_integers() {
        assert_eq!(parse_integer("5"), Ok(5));
        assert_eq!(parse_integer("0"), Ok(0));
        assert_eq!(parse_integer("-42"), Ok(-42));
        assert_eq!(parse_integer("+7"), Ok(7));
    }

    #[test]
    fn prefixed_integers() {
        assert_eq!(parse_integer("0x1f"), Ok(31));
        assert_eq!(parse_integer("0XFF"), Ok(255));
        assert_eq!(parse_integer("-0x10"), Ok(-16));
        assert_eq!(parse_integer("010"), Ok(8));
        assert_eq!(parse_integer("-017"), Ok(-15));
    }

    #[test]
    fn integer_trailing_garbage_is_malformed() {
        assert_eq!(parse_integer("abc"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("12abc"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("1.5"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("09"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("0x"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("0xg"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("=5"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer(" 5"), Err(CoerceError::Malformed));
        assert_eq!(parse_integer(""), Err(CoerceError::Malformed));
        assert_eq!(parse_integer("-"), Err(CoerceError::Malformed));
    }

    #[test]
    fn integer_range_limits() {
        assert_eq!(parse_integer("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_integer("-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            parse_integer("9223372036854775808"),
            Err(CoerceError::OutOfRange)
        );
        assert_eq!(
            parse_integer("-9223372036854775809"),
            Err(CoerceError::OutOfRange)
        );
        assert_eq!(
            parse_integer("99999999999999999999999"),
            Err(CoerceError::OutOfRange)
        );
        assert_eq!(
            parse_integer("0x10000000000000000"),
            Err(CoerceError::OutOfRange)
        );
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float("1.5"), Ok(1.5));
        assert_eq!(parse_float("-2"), Ok(-2.0));
        assert_eq!(parse_float("1e3"), Ok(1000.0));
        assert_eq!(parse_float(".25"), Ok(0.25));
        assert_eq!(parse_float("0"), Ok(0.0));
        assert_eq!(parse_float("0.000e5"), Ok(0.0));
        assert_eq!(parse_float("inf"), Ok(f64::INFINITY));
        assert_eq!(parse_float("-Infinity"), Ok(f64::NEG_INFINITY));
        assert!(parse_float("nan").is_ok_and(|v| v.is_nan()));
    }

    #[test]
    fn float_errors() {
        assert_eq!(parse_float("abc"), Err(CoerceError::Malformed));
        assert_eq!(parse_float("1.5x"), Err(CoerceError::Malformed));
        assert_eq!(parse_float(""), Err(CoerceError::Malformed));
        assert_eq!(parse_float("1e999"), Err(CoerceError::OutOfRange));
        assert_eq!(parse_float("-1e999"), Err(CoerceError::OutOfRange));
        assert_eq!(parse_float("1e-999"), Err(CoerceError::OutOfRange));
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("1"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert_eq!(parse_flag("yes"), Err(CoerceError::Malformed));
        assert_eq!(parse_flag(""), Err(CoerceError::Malformed));
    }
}
