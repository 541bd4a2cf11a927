//! Number formatting for KPI cards, chart labels and tables

/// Format with a fixed number of decimals and comma thousands separators
#[must_use]
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // "-0.00" reads as a loss where there is none
    let is_zero = grouped.chars().all(|c| matches!(c, '0' | ',' | '.'));
    if value.is_sign_negative() && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `£1,234` / `£1,234.57`; negative values as `-£12`
#[must_use]
pub fn format_currency(value: f64, symbol: &str, decimals: usize) -> String {
    let body = format_thousands(value, decimals);
    match body.strip_prefix('-') {
        Some(positive) => format!("-{symbol}{positive}"),
        None => format!("{symbol}{body}"),
    }
}

/// Currency, or `N/A` when the value is undefined
#[must_use]
pub fn format_optional_currency(value: Option<f64>, symbol: &str, decimals: usize) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format_currency(v, symbol, decimals))
}

#[must_use]
pub fn format_count(count: usize) -> String {
    format_thousands(count as f64, 0)
}

#[must_use]
pub fn format_decimal(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// A fraction as a percentage with one decimal: `0.125` → `12.5%`
#[must_use]
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// A 0-5 score as `3.5 / 5`
#[must_use]
pub fn format_score(value: f64) -> String {
    format!("{value:.1} / 5")
}
