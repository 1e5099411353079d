//! Locale-free number formatting shared by the renderers.

/// `1234567.891` with 2 decimals → `"1,234,567.89"`.
pub fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    // Rounding can turn -0.004 into "0.00"; no sign then.
    if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `$1,234.50`; negative amounts as `-$1,234.50`.
pub fn currency(value: f64) -> String {
    let body = grouped(value, 2);
    match body.strip_prefix('-') {
        Some(positive) => format!("-${}", positive),
        None => format!("${}", body),
    }
}

/// Integer count with thousands separators.
pub fn count(value: i64) -> String {
    grouped(value as f64, 0)
}
