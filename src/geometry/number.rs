//! Decimal rounding and compact number formatting
//!
//! Rounding works on the decimal text rather than on binary floats, so
//! `2.675` at two places is `2.68` and never `2.67`.

/// Round a plain decimal literal (`-12.3456`, `.5`, `7`) to `precision`
/// fractional digits, half-up on the magnitude.
///
/// Literals without a fractional part, or with no more digits than
/// `precision`, come back unchanged. Returns `None` for text that is not a
/// plain decimal literal (exponents included).
pub fn round_literal(literal: &str, precision: u32) -> Option<String> {
    let (negative, unsigned) = match literal.as_bytes().first()? {
        b'-' => (true, &literal[1..]),
        b'+' => (false, &literal[1..]),
        _ => (false, literal),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let precision = precision as usize;
    if frac_part.len() <= precision {
        return Some(literal.to_string());
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(precision))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes()[precision] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - precision;
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    if split == 0 {
        out.push('0');
    }
    out.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    if precision > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    }
    Some(out)
}

/// Round a computed value to `precision` fractional digits, half-up on its
/// shortest decimal representation.
pub fn round_value(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // `Display` for f64 never uses exponent notation
    let text = value.to_string();
    let rounded = round_literal(&text, precision)
        .and_then(|rounded| rounded.parse().ok())
        .unwrap_or(value);
    // no negative zero in the output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a value with at most `precision` fractional digits, dropping
/// trailing zeros, the leading zero of pure fractions, and the sign of zero.
pub fn format_number(value: f64, precision: u32) -> String {
    let mut text = format!("{:.*}", precision as usize, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" || text.is_empty() {
        return "0".to_string();
    }
    if let Some(rest) = text.strip_prefix("0.") {
        return format!(".{rest}");
    }
    if let Some(rest) = text.strip_prefix("-0.") {
        return format!("-.{rest}");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_literal("2.675", 2).as_deref(), Some("2.68"));
        assert_eq!(round_literal("2.674", 2).as_deref(), Some("2.67"));
        assert_eq!(round_literal("-2.675", 2).as_deref(), Some("-2.68"));
    }

    #[test]
    fn test_round_carries_into_integer_part() {
        assert_eq!(round_literal("9.996", 2).as_deref(), Some("10.00"));
        assert_eq!(round_literal("99.5", 0).as_deref(), Some("100"));
        assert_eq!(round_literal(".96", 1).as_deref(), Some("1.0"));
    }

    #[test]
    fn test_round_short_literals_unchanged() {
        assert_eq!(round_literal("10", 2).as_deref(), Some("10"));
        assert_eq!(round_literal("1.5", 2).as_deref(), Some("1.5"));
        assert_eq!(round_literal(".25", 1).as_deref(), Some("0.3"));
    }

    #[test]
    fn test_round_rejects_non_decimal() {
        assert_eq!(round_literal("1e5", 2), None);
        assert_eq!(round_literal("abc", 2), None);
        assert_eq!(round_literal("-", 2), None);
        assert_eq!(round_literal("", 2), None);
    }

    #[test]
    fn test_round_value() {
        assert_eq!(round_value(50.125, 2), 50.13);
        assert_eq!(round_value(-0.004, 2), 0.0);
        assert_eq!(round_value(40.0, 2), 40.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0, 2), "10");
        assert_eq!(format_number(0.5, 2), ".5");
        assert_eq!(format_number(-0.25, 2), "-.25");
        assert_eq!(format_number(-0.0, 2), "0");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(12.30, 2), "12.3");
        assert_eq!(format_number(7.0, 0), "7");
    }
}
