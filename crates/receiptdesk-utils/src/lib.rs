//! Input formatters and display helpers
//!
//! Every function here is a pure string transform. The masking formatters
//! strip everything but digits, truncate to the format's digit budget and
//! re-insert separators at fixed offsets.

use rust_decimal::Decimal;

/// Digits in a US phone number
pub const PHONE_DIGITS: usize = 10;
/// Digits in an Employer Identification Number
pub const EIN_DIGITS: usize = 9;
/// Digits in a ZIP+4 code
pub const ZIP_DIGITS: usize = 9;

/// Remove every character that is not an ASCII digit
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_up_to(input: &str, max: usize) -> String {
    strip_non_digits(input).chars().take(max).collect()
}

/// Format a phone number as `(555) 123-4567`, masking partial input as it grows
pub fn format_phone_number(input: &str) -> String {
    let digits = digits_up_to(input, PHONE_DIGITS);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Format an EIN as `12-3456789`
pub fn format_ein(input: &str) -> String {
    let digits = digits_up_to(input, EIN_DIGITS);
    if digits.len() > 2 {
        format!("{}-{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Format a ZIP code as `12345` or `12345-6789`
pub fn format_zip(input: &str) -> String {
    let digits = digits_up_to(input, ZIP_DIGITS);
    if digits.len() > 5 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

/// Apply a formatter to a field being typed into.
///
/// Returns `None` when the formatted text equals the current text, so the
/// caller leaves the field (and its cursor) untouched.
pub fn mask_input(current: &str, formatter: fn(&str) -> String) -> Option<String> {
    let formatted = formatter(current);
    if formatted == current {
        None
    } else {
        Some(formatted)
    }
}

/// Human-readable file size, base 1024: `0 Bytes`, `512 Bytes`, `1.5 KB`, `5 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, UNITS[unit])
}

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a dollar amount as `$1,200.00`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, format_number(whole), cents)
}
