//! Number formatting for displayed cell values and areas.
//!
//! Single-precision values are first rounded to 7 significant digits, the
//! precision f32 values are displayed with in the panels.

const SIGNIFICANT_DIGITS: usize = 7;

/// Insert `,` thousands separators into a plain decimal string such as
/// `-1234567.25`.
pub fn group_thousands(plain: &str) -> String {
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Scientific form with 7 significant digits, split into mantissa and
/// decimal exponent: `123456.789` → `("1.234568", 5)`.
fn significant_parts(value: f32) -> (String, i32) {
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value as f64);
    match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

/// `value` rounded to 7 significant digits. Non-finite values pass through.
pub fn round_significant(value: f32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value as f64;
    }
    let (mantissa, exp) = significant_parts(value);
    format!("{mantissa}e{exp}").parse().unwrap_or(value as f64)
}

/// General format: 7 significant digits, fixed notation for exponents in
/// `-5..7`, otherwise `1.5E+08` style.
pub fn format_general(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let (mantissa, exp) = significant_parts(value);
    if !(-5..7).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}E{}{:02}", trim_fraction(&mantissa), sign, exp.abs());
    }
    let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exp).max(0) as usize;
    let fixed = format!("{:.*}", decimals, round_significant(value));
    trim_fraction(&fixed).to_string()
}

/// Cell value pattern `#,##0.####`: grouped integer part, at most four
/// decimals, trailing zeros dropped.
pub fn format_cell_value(value: f32) -> String {
    let fixed = format!("{:.4}", round_significant(value));
    let trimmed = trim_fraction(&fixed);
    // "-0" after rounding away the decimals
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    group_thousands(trimmed)
}

/// Two decimals with group separators (the "N" pattern).
pub fn format_grouped(value: f32) -> String {
    let fixed = format!("{:.2}", round_significant(value));
    let fixed = if fixed == "-0.00" { "0.00".to_string() } else { fixed };
    group_thousands(&fixed)
}
