//! Monetary string rendering

/// Renders `"{currency} {amount}"` with thousands separators and two decimal
/// places. Never panics: non-finite input degrades to a plain unseparated
/// rendering with the currency code prefixed.
pub fn format_money(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return format!("{currency} {amount}");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => return format!("{currency} {amount}"),
    };

    let sign = if amount < 0.0 { "-" } else { "" };
    format!(
        "{currency} {sign}{}.{frac_part}",
        group_thousands(int_part)
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
