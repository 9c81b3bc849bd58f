use regex::Regex;

use crate::extraction::PageContent;
use crate::parsing::normalize::contains_french_month;

/// Document date and advisor, as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub document_date: Option<String>,
    pub advisor_name: Option<String>,
}

/// First capture group of `pattern` over the pages, in page order.
///
/// The captured value is trimmed; a match capturing only whitespace counts as
/// no match on that page.
pub fn find_labeled_value(pages: &[PageContent], pattern: &Regex) -> Option<String> {
    pages.iter().find_map(|page| {
        let caps = pattern.captures(&page.text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

/// First line of the first page whose first line names a French month.
///
/// Pages are checked in order; empty pages are skipped.
pub fn find_date_heading(pages: &[PageContent]) -> Option<String> {
    pages.iter().find_map(|page| {
        let first_line = page.text.trim().lines().next()?.trim();
        if contains_french_month(first_line) {
            Some(first_line.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: usize, text: &str) -> PageContent {
        PageContent {
            page_number: number,
            text: text.to_string(),
            words: vec![],
        }
    }

    #[test]
    fn test_labeled_value_first_page_wins() {
        let re = Regex::new(r"Date\s*:\s*([^\n]+)").unwrap();
        let pages = vec![
            page(1, "Illustration\nDate : 17 novembre 2025\n"),
            page(2, "Date : 1 janvier 2020"),
        ];
        assert_eq!(
            find_labeled_value(&pages, &re).as_deref(),
            Some("17 novembre 2025")
        );
    }

    #[test]
    fn test_labeled_value_missing() {
        let re = Regex::new(r"Date\s*:\s*([^\n]+)").unwrap();
        assert_eq!(find_labeled_value(&[page(1, "nothing here")], &re), None);
    }

    #[test]
    fn test_date_heading_skips_pages_without_month() {
        let pages = vec![
            page(1, ""),
            page(2, "Proposition d'assurance\nlundi 17 novembre 2025"),
            page(3, "  lundi 17 novembre 2025  \nSommaire des garanties"),
        ];
        assert_eq!(
            find_date_heading(&pages).as_deref(),
            Some("lundi 17 novembre 2025")
        );
    }
}
