//! SI-prefixed quantities as they appear in vendor listings.
//!
//! Values are carried as normalized [`Decimal`]s with no prefix; a prefix is
//! only chosen again when a value is rendered for display.

use rust_decimal::Decimal;

use crate::error::UnsupportedListing;

/// Prefix letters accepted after a number. Vendors spell kilo both ways.
const PARSE_PREFIXES: [(char, i32); 9] = [
    ('p', -12),
    ('n', -9),
    ('u', -6),
    ('m', -3),
    ('k', 3),
    ('K', 3),
    ('M', 6),
    ('G', 9),
    ('T', 12),
];

/// Display buckets, largest first.
const DISPLAY_PREFIXES: [(i32, &str); 9] = [
    (12, "T"),
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (0, ""),
    (-3, "m"),
    (-6, "u"),
    (-9, "n"),
    (-12, "p"),
];

#[inline]
fn pow10(exp: i32) -> Decimal {
    if exp >= 0 {
        Decimal::from_i128_with_scale(10i128.pow(exp as u32), 0)
    } else {
        Decimal::new(1, (-exp) as u32)
    }
}

/// `number * 10^exp` without rounding, or `None` when the exact result does
/// not fit a `Decimal`.
fn shift(number: Decimal, exp: i32) -> Option<Decimal> {
    let number = number.normalize();
    let scale = i64::from(number.scale()) - i64::from(exp);
    if scale >= 0 {
        Decimal::try_from_i128_with_scale(number.mantissa(), u32::try_from(scale).ok()?).ok()
    } else {
        let factor = 10i128.checked_pow(u32::try_from(-scale).ok()?)?;
        Decimal::try_from_i128_with_scale(number.mantissa().checked_mul(factor)?, 0).ok()
    }
}

fn is_plain_number(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}

/// Parse a plain decimal exactly. Well-formed numbers with more digits than
/// a `Decimal` holds are out of range rather than rounded.
fn parse_exact(text: &str) -> Result<Decimal, UnsupportedListing> {
    Decimal::from_str_exact(text).map_err(|_| {
        if is_plain_number(text) {
            UnsupportedListing::OutOfRange(text.to_string())
        } else {
            UnsupportedListing::InvalidNumber(text.to_string())
        }
    })
}

/// Split `4.7E-6` into its mantissa and power of ten.
fn parse_decimal(body: &str) -> Result<(Decimal, i32), UnsupportedListing> {
    match body.split_once(['e', 'E']) {
        Some((mantissa, exp)) => {
            let exp = exp
                .parse::<i32>()
                .map_err(|_| UnsupportedListing::InvalidNumber(body.to_string()))?;
            Ok((parse_exact(mantissa)?, exp))
        }
        None => Ok((parse_exact(body)?, 0)),
    }
}

/// Parse a listing value such as `"4.7k"`, `"100nF"` or `"N/A"`.
///
/// Trailing whitespace and any trailing characters of `suffix` are stripped
/// first, so `parse_si("100 nF", "F")` sees `"100 n"`. A single trailing
/// letter is then read as an SI prefix. `"N/A"` in any case reads as zero.
///
/// The result is normalized: `parse_si("4.70k", "")` is `4700`, not `4700.0`.
/// Nothing is rounded. A value whose exact digits do not fit a [`Decimal`]
/// is [`UnsupportedListing::OutOfRange`].
pub fn parse_si(raw: &str, suffix: &str) -> Result<Decimal, UnsupportedListing> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("n/a") {
        return Ok(Decimal::ZERO);
    }

    let stripped = trimmed.trim_end_matches(|c: char| c.is_whitespace() || suffix.contains(c));

    let (body, exp) = match stripped.chars().next_back() {
        None => (stripped, 0),
        Some(c) if c.is_numeric() => (stripped, 0),
        Some(c) => {
            let exp = PARSE_PREFIXES
                .iter()
                .find(|(prefix, _)| *prefix == c)
                .map(|(_, exp)| *exp)
                .ok_or(UnsupportedListing::SiPrefix(c))?;
            (&stripped[..stripped.len() - c.len_utf8()], exp)
        }
    };

    let (number, sci_exp) = parse_decimal(body.trim())?;
    exp.checked_add(sci_exp)
        .and_then(|exp| shift(number, exp))
        .map(|v| v.normalize())
        .ok_or_else(|| UnsupportedListing::OutOfRange(trimmed.to_string()))
}

/// Render a value with the largest SI prefix that keeps the number >= 1.
///
/// `format_si(dec!(4700), "Ω")` is `"4.7 kΩ"`. Zero renders as `"0"` plus the
/// unit. Magnitudes below one pico stay in the pico bucket, so `1e-15` F
/// renders as `"0.001 pF"`.
pub fn format_si(value: Decimal, suffix: &str) -> String {
    if value.is_zero() {
        return format!("0 {suffix}").trim_end().to_string();
    }

    let magnitude = value.abs();
    let (exp, prefix) = DISPLAY_PREFIXES
        .iter()
        .copied()
        .find(|&(exp, _)| magnitude >= pow10(exp))
        .unwrap_or(DISPLAY_PREFIXES[DISPLAY_PREFIXES.len() - 1]);

    let scaled = shift(value, -exp)
        .unwrap_or_else(|| value / pow10(exp))
        .normalize();
    format!("{scaled} {prefix}{suffix}").trim_end().to_string()
}
