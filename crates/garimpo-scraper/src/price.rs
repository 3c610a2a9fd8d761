//! Free-text price parsing.
//!
//! Storefront pages in scope print prices in Brazilian (`1.234,56`) or US
//! (`1,234.56`) convention, with or without currency markers, and Mercado
//! Livre additionally exposes a verbal accessibility form
//! (`"78 reais com 90 centavos"`). Everything here is total: unparseable
//! input yields `None`, never a panic or a zero.

use regex::Regex;

/// Parses a price out of arbitrary display text.
///
/// Currency markers (`R$`, `BRL`) and every other non-digit character fall
/// away first, keeping only digits and the two separator characters. Then:
///
/// - both `.` and `,` present: the rightmost one is the decimal separator,
///   its counterpart is thousands;
/// - only `,` present: decimal iff exactly two digits follow it, thousands
///   otherwise;
/// - only `.` or no separator: standard decimal parse.
///
/// Returns `None` for empty/garbage input and non-finite results.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');

    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                // Brazilian: 1.234,56
                cleaned.replace('.', "").replace(',', ".")
            } else {
                // US: 1,234.56
                cleaned.replace(',', "")
            }
        }
        (None, Some(comma)) => {
            let after = &cleaned[comma + 1..];
            if after.len() == 2 && after.bytes().all(|b| b.is_ascii_digit()) {
                // Decimal comma: 123,45
                cleaned.replace(',', ".")
            } else {
                // Thousands comma(s): 1,234 or 1,234,567
                cleaned.replace(',', "")
            }
        }
        _ => cleaned,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses the Mercado Livre accessibility-label price form.
///
/// Accepts `"Agora: 78 reais com 90 centavos"`, `"Antes: 175 reais"` or the
/// bare phrase without a prefix, returning `reais + centavos/100`.
#[must_use]
pub fn parse_reais_label(label: &str) -> Option<f64> {
    let prefix = Regex::new(r"(?i)^\s*(?:agora|antes):\s*").expect("valid regex");
    let cleaned = prefix.replace(label, "");

    let re = Regex::new(r"(?i)(\d+)\s*reais(?:\s+com\s+(\d+)\s+centavos)?").expect("valid regex");
    let caps = re.captures(&cleaned)?;

    let reais: f64 = caps.get(1)?.as_str().parse().ok()?;
    let centavos: f64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);

    Some(reais + centavos / 100.0)
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
