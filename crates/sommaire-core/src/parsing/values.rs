use rust_decimal::Decimal;
use std::str::FromStr;

/// Phrases printed in amount columns instead of a number.
const PLACEHOLDERS: &[&str] = &[
    "voir la description",
    "voirladescription",
    "incluse",
    "inclus",
    "incluses",
    "n/a",
    "-",
];

/// Parse a locale-formatted currency amount.
///
/// Handles formats like:
/// - "50 000 $" -> 50000
/// - "556,50 $" -> 556.50
/// - "25 000,00 $" -> 25000.00
/// - "1000$" -> 1000
///
/// Spaces (including no-break spaces) are thousands separators and a comma is
/// the decimal separator. Placeholders and anything else that is not a number
/// give `None`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() || is_placeholder(trimmed) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = cleaned.replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// True if the string holds a numeric amount (see [`parse_amount`]).
pub fn is_numeric_amount(s: &str) -> bool {
    parse_amount(s).is_some()
}

fn is_placeholder(s: &str) -> bool {
    let lower = s.to_lowercase();
    PLACEHOLDERS.contains(&lower.as_str())
}

/// Tidy an amount cell the way it is printed on UV summaries.
///
/// - "Voirladescription" -> "Voir la description"
/// - "50000$" -> "50 000 $"
///
/// Anything else is returned trimmed.
pub fn tidy_amount_text(s: &str) -> String {
    let compact: String = s.chars().filter(|c| *c != ' ').collect();
    if compact.is_empty() {
        return String::new();
    }

    if compact == "Voirladescription" {
        return "Voir la description".to_string();
    }

    if let Some(digits) = compact.strip_suffix('$') {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u128>() {
                return format!("{} $", group_thousands(n));
            }
        }
    }

    s.trim().to_string()
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
