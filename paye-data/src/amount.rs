use paye_core::calculations::common::MAX_INPUT_AMOUNT;
use rust_decimal::Decimal;
use tracing::warn;

/// Strips whitespace, a leading currency marker and thousands separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = trimmed
        .strip_prefix('₦')
        .or_else(|| trimmed.strip_prefix("NGN"))
        .unwrap_or(trimmed);
    unprefixed.trim().replace(',', "")
}

/// A number at the start of a string: optional sign, digits with an
/// optional fractional part, and an optional exponent.
struct LeadingNumber<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
    len: usize,
}

fn digits_from(
    s: &str,
    start: usize,
) -> usize {
    s[start..].bytes().take_while(u8::is_ascii_digit).count()
}

fn scan_leading_number(s: &str) -> Option<LeadingNumber<'_>> {
    let bytes = s.as_bytes();
    let (negative, mut pos) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let integer_len = digits_from(s, pos);
    let integer = &s[pos..pos + integer_len];
    pos += integer_len;

    let mut fraction = "";
    if bytes.get(pos) == Some(&b'.') {
        let fraction_len = digits_from(s, pos + 1);
        fraction = &s[pos + 1..pos + 1 + fraction_len];
        pos += 1 + fraction_len;
    }
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut exponent = None;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let sign_len = usize::from(matches!(bytes.get(pos + 1), Some(b'+' | b'-')));
        let exponent_len = digits_from(s, pos + 1 + sign_len);
        if exponent_len > 0 {
            let end = pos + 1 + sign_len + exponent_len;
            exponent = Some(&s[pos + 1..end]);
            pos = end;
        }
    }

    Some(LeadingNumber {
        negative,
        integer,
        fraction,
        exponent,
        len: pos,
    })
}

impl LeadingNumber<'_> {
    /// `None` when the magnitude does not fit in a `Decimal`.
    fn value(&self) -> Option<Decimal> {
        let integer = if self.integer.is_empty() { "0" } else { self.integer };
        let mantissa = if self.fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{}", self.fraction)
        };
        let mut value: Decimal = mantissa.parse().ok()?;

        if let Some(exponent) = self.exponent {
            let exponent: i64 = exponent.parse().unwrap_or(if exponent.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            });
            // 64 steps move any non-zero Decimal out of range or down to zero.
            for _ in 0..exponent.unsigned_abs().min(64) {
                if value.is_zero() {
                    break;
                }
                value = if exponent > 0 {
                    value.checked_mul(Decimal::TEN)?
                } else {
                    value.checked_div(Decimal::TEN).unwrap_or(Decimal::ZERO)
                };
            }
        }

        Some(if self.negative { -value } else { value })
    }
}

/// Parses a user-entered amount, falling back to zero.
///
/// Accepts `"1,234.56"`, `"₦253,680"`, `"NGN 500000"` and scientific
/// notation such as `"1e6"`. Like a browser's `parseFloat`, only the leading
/// number is read, so `"12abc"` is 12. Empty input is zero. Text with no
/// leading number, and any amount whose magnitude exceeds
/// [`MAX_INPUT_AMOUNT`], is also zero and logged at `warn`. Negative amounts
/// are passed through unchanged.
pub fn coerce_amount(s: &str) -> Decimal {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }

    let Some(number) = scan_leading_number(&normalized) else {
        warn!(input = %s, "unparseable amount treated as 0");
        return Decimal::ZERO;
    };
    if number.len < normalized.len() {
        warn!(input = %s, "trailing text after amount ignored");
    }

    match number.value() {
        Some(value) if value.abs() <= MAX_INPUT_AMOUNT => value,
        _ => {
            warn!(input = %s, "amount outside the supported range treated as 0");
            Decimal::ZERO
        }
    }
}
