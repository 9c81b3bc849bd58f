use std::collections::HashMap;
use std::sync::LazyLock;

static FRENCH_MONTHS: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("janvier", 1);
    m.insert("février", 2);
    m.insert("fevrier", 2);
    m.insert("mars", 3);
    m.insert("avril", 4);
    m.insert("mai", 5);
    m.insert("juin", 6);
    m.insert("juillet", 7);
    m.insert("août", 8);
    m.insert("aout", 8);
    m.insert("septembre", 9);
    m.insert("octobre", 10);
    m.insert("novembre", 11);
    m.insert("décembre", 12);
    m.insert("decembre", 12);
    m
});

const FRENCH_WEEKDAYS: &[&str] = &[
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// Parse a French long-form date into `YYYY-MM-DD`.
///
/// Accepts "17 novembre 2025", "lundi 17 novembre 2025" and
/// "17 novembre, 2025", case-insensitively. Returns None for anything else.
pub fn parse_french_date(s: &str) -> Option<String> {
    let mut cleaned = s.trim().to_lowercase();

    if let Some(day) = FRENCH_WEEKDAYS.iter().find(|d| cleaned.starts_with(*d)) {
        cleaned = cleaned[day.len()..].to_string();
    }

    let cleaned = cleaned.replace(',', "");
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month = *FRENCH_MONTHS.get(parts[1])?;
    let year: u32 = parts[2].parse().ok()?;

    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Normalize a document date: ISO when recognized, otherwise unchanged.
pub fn normalize_date(s: &str) -> String {
    parse_french_date(s).unwrap_or_else(|| s.to_string())
}

/// True if the text names a French month (used to spot date lines).
pub fn contains_french_month(s: &str) -> bool {
    let lower = s.to_lowercase();
    FRENCH_MONTHS.keys().any(|m| lower.contains(m))
}

/// Smoker status from a phrase like "Non-fumeur" or "Fumeur".
pub fn is_smoker(phrase: &str) -> bool {
    let lower = phrase.to_lowercase();
    lower.contains("fumeur") && !lower.contains("non")
}

/// Split a printed full name into (first, last).
///
/// The last whitespace-separated token is the family name; a single token is
/// taken as the family name with an empty first name.
pub fn split_full_name(full: &str) -> (String, String) {
    let parts: Vec<&str> = full.split_whitespace().collect();
    match parts.split_last() {
        Some((last, rest)) if !rest.is_empty() => (rest.join(" "), last.to_string()),
        _ => (String::new(), full.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_french_date("17 novembre 2025").as_deref(), Some("2025-11-17"));
    }

    #[test]
    fn test_weekday_prefix() {
        assert_eq!(
            parse_french_date("lundi 17 novembre 2025").as_deref(),
            Some("2025-11-17")
        );
    }

    #[test]
    fn test_comma_before_year() {
        assert_eq!(
            parse_french_date("17 novembre, 2025").as_deref(),
            Some("2025-11-17")
        );
    }

    #[test]
    fn test_case_and_accents() {
        assert_eq!(parse_french_date("Mardi 2 Décembre 2025").as_deref(), Some("2025-12-02"));
        assert_eq!(parse_french_date("1 aout 2024").as_deref(), Some("2024-08-01"));
        assert_eq!(parse_french_date("29 FÉVRIER 2028").as_deref(), Some("2028-02-29"));
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(parse_french_date("2025-11-17"), None);
        assert_eq!(parse_french_date("17 brumaire 2025"), None);
        assert_eq!(normalize_date("Novembre 2025"), "Novembre 2025");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_contains_french_month() {
        assert!(contains_french_month("lundi 17 novembre 2025"));
        assert!(!contains_french_month("Sommaire des garanties"));
    }

    #[test]
    fn test_smoker_phrases() {
        assert!(is_smoker("Fumeur"));
        assert!(is_smoker("fumeur"));
        assert!(!is_smoker("Non-fumeur"));
        assert!(!is_smoker("non\u{2011}fumeur"));
        assert!(!is_smoker("NON-FUMEUR"));
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("THOMAS JEAN VAUDESCAL"),
            ("THOMAS JEAN".to_string(), "VAUDESCAL".to_string())
        );
        assert_eq!(
            split_full_name("  Yasmine   Vaudescal "),
            ("Yasmine".to_string(), "Vaudescal".to_string())
        );
        assert_eq!(split_full_name("CHER"), (String::new(), "CHER".to_string()));
    }
}
