//! Price display math shared by the catalog and broadcast layers.

/// Rounded discount percentage between an original and a current price.
///
/// Returns `0` when `original_price` is not positive or when there is no
/// actual discount (`current_price >= original_price`), so callers can
/// render the result unconditionally.
#[must_use]
pub fn calculate_discount(original_price: f64, current_price: f64) -> u8 {
    if original_price <= 0.0 || current_price >= original_price {
        return 0;
    }
    let percent = (original_price - current_price) / original_price * 100.0;
    percent.round() as u8
}

/// Formats a price the Brazilian way: `.` for thousands, `,` for decimals,
/// always two decimal places. `1234.5` → `"1.234,50"`.
///
/// The currency symbol is left to the caller; broadcast messages prefix
/// `"R$ "` themselves.
#[must_use]
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let total_cents = (value.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{cents:02}")
}
