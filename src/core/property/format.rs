//! Display formatting for prices and counts (en-US grouping).

/// Price in whole US dollars, e.g. `$1,250,000`. Missing or zero prices read
/// "Price not available".
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 && p.is_finite() => dollars(p),
        _ => "Price not available".to_string(),
    }
}

/// Compact price for map markers and list rows: `N/A` when missing or zero.
pub fn price_label(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 && p.is_finite() => dollars(p),
        _ => "N/A".to_string(),
    }
}

/// Integer with thousands separators, e.g. `12,500`.
pub fn format_count(n: i64) -> String {
    let grouped = group_thousands(n.unsigned_abs());
    if n < 0 { format!("-{}", grouped) } else { grouped }
}

/// Drop a trailing `.0` so whole numbers print as integers (2.0 -> "2", 2.5 -> "2.5").
pub(crate) fn format_decimal(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

fn dollars(p: f64) -> String {
    let rounded = p.round();
    let grouped = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
