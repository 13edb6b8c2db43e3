//! Display formatting for calculator responses. The core returns raw
//! decimals; everything the page shows is rendered here.

use rust_decimal::Decimal;

/// Format a monetary amount with two decimals and thousands separators.
pub fn currency(amount: Decimal) -> String {
    grouped(amount, 2)
}

/// Format a monetary amount rounded to whole dollars.
pub fn whole_dollars(amount: Decimal) -> String {
    grouped(amount, 0)
}

/// Render a count that may be fractional (months) without trailing zeros.
pub fn count(value: Decimal) -> String {
    value.normalize().to_string()
}

fn grouped(amount: Decimal, dp: u32) -> String {
    let text = format!("{:.*}", dp as usize, amount.round_dp(dp));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
