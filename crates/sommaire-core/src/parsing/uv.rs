//! UV Assurance illustrations.
//!
//! The summary page prints a single insured person on one line
//! (`NAME, Sex, YYYY-MM-DD, N an(s), Non-fumeur`). That line also opens the
//! protections table, which ends at the "Prime totale" row.

use regex::Regex;
use std::sync::LazyLock;

use super::header::{find_labeled_value, DocumentMetadata};
use super::normalize::{is_smoker, split_full_name};
use super::values::tidy_amount_text;
use super::{non_empty, table_row_event, LineEvent, ParseState, ScanContext, VariantParser};
use crate::extraction::lines::TextLine;
use crate::extraction::table::ColumnRow;
use crate::extraction::PageContent;
use crate::model::{InsuredPerson, RawTotals, Sex, SourceVariant};

pub(crate) const SUMMARY_ANCHOR: &str = "SOMMAIRE DES PROTECTIONS ET DES PRIMES";

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

static INSURED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-ZÉÈÊËÀÂÄÙÛÜÔÖÎÏÇ\s\x{2010}-\x{2015}-]+),\s*(Homme|Femme),\s*(\d{4}-\d{2}-\d{2}),\s*(\d+)\s*an\(s\),\s*((?i:non[\x{2010}-\x{2015}-]fumeur|fumeur))",
    )
    .unwrap()
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Date\s*:\s*([^\n]+)").unwrap());

static ADVISOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Votre conseiller\s*:\s*([^\n]+)").unwrap());

/// Lines inside the table that are neither items nor continuations.
fn is_table_noise(desc: &str) -> bool {
    desc == "Assurance individuelle" || desc.contains("SOMMAIRE")
}

pub struct UvParser;

impl UvParser {
    /// Parse the single-line insured description.
    pub fn parse_insured_line(text: &str) -> Option<InsuredPerson> {
        let caps = INSURED_RE.captures(text.trim())?;
        let (first_name, last_name) = split_full_name(caps[1].trim());
        Some(InsuredPerson {
            number: "1".to_string(),
            last_name,
            first_name,
            sex: Sex::from_label(&caps[2])?,
            age: caps[4].parse().ok()?,
            smoker: is_smoker(&caps[5]),
            birth_date: Some(caps[3].to_string()),
        })
    }

    fn is_insured_line(text: &str) -> bool {
        ISO_DATE_RE.is_match(text) && Self::parse_insured_line(text).is_some()
    }
}

impl VariantParser for UvParser {
    fn variant(&self) -> SourceVariant {
        SourceVariant::Uv
    }

    fn detect_anchor(&self, page_text: &str) -> bool {
        page_text.contains(SUMMARY_ANCHOR)
    }

    fn extract_metadata(&self, pages: &[PageContent]) -> DocumentMetadata {
        DocumentMetadata {
            document_date: find_labeled_value(pages, &DATE_RE),
            advisor_name: find_labeled_value(pages, &ADVISOR_RE),
        }
    }

    fn extract_insured(&self, _page_text: &str, lines: &[TextLine]) -> Vec<InsuredPerson> {
        lines
            .iter()
            .map(TextLine::text)
            .filter(|text| ISO_DATE_RE.is_match(text))
            .find_map(|text| Self::parse_insured_line(&text))
            .into_iter()
            .collect()
    }

    fn classify_line(&self, ctx: ScanContext, line: &TextLine, row: &ColumnRow) -> LineEvent {
        match ctx.state {
            ParseState::BeforeTable => {
                if Self::is_insured_line(&line.text()) {
                    LineEvent::EnterTable
                } else {
                    LineEvent::Skip
                }
            }
            ParseState::InTable => {
                let desc = row.description.trim();
                if desc.contains("Prime totale") {
                    return LineEvent::Total(RawTotals {
                        annual_premium: non_empty(&row.annual_premium),
                        monthly_premium: non_empty(&row.monthly_premium),
                        payment_interval: None,
                    });
                }
                if is_table_noise(desc) {
                    return LineEvent::Skip;
                }
                table_row_event(ctx, row, &tidy_amount_text(&row.coverage_amount))
            }
            ParseState::Done => LineEvent::Skip,
        }
    }

    fn totals_complete(&self, _totals: &RawTotals) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PositionedWord;

    fn line(words: &[(&str, f64)]) -> TextLine {
        TextLine {
            y: 100.0,
            words: words
                .iter()
                .map(|(t, x)| PositionedWord::new(*t, *x, 100.0))
                .collect(),
        }
    }

    fn in_table(has_item: bool) -> ScanContext {
        ScanContext {
            state: ParseState::InTable,
            has_item,
        }
    }

    #[test]
    fn test_parse_insured_line() {
        let p = UvParser::parse_insured_line(
            "THOMAS VAUDESCAL, Homme, 1985-03-12, 40 an(s), Non-fumeur",
        )
        .unwrap();
        assert_eq!(p.number, "1");
        assert_eq!(p.first_name, "THOMAS");
        assert_eq!(p.last_name, "VAUDESCAL");
        assert_eq!(p.sex, Sex::Homme);
        assert_eq!(p.birth_date.as_deref(), Some("1985-03-12"));
        assert_eq!(p.age, 40);
        assert!(!p.smoker);
    }

    #[test]
    fn test_parse_insured_smoker_and_hyphenated_name() {
        let p =
            UvParser::parse_insured_line("MARIE-ÈVE TREMBLAY, Femme, 1990-01-02, 35 an(s), FUMEUR")
                .unwrap();
        assert_eq!(p.first_name, "MARIE-ÈVE");
        assert_eq!(p.sex, Sex::Femme);
        assert!(p.smoker);
    }

    #[test]
    fn test_insured_line_must_start_the_line() {
        assert!(UvParser::parse_insured_line(
            "Proposant : THOMAS VAUDESCAL, Homme, 1985-03-12, 40 an(s), Non-fumeur"
        )
        .is_none());
    }

    #[test]
    fn test_extract_insured_takes_first_match() {
        let lines = vec![
            line(&[("Émis", 40.0), ("le", 70.0), ("2025-11-17", 90.0)]),
            line(&[
                ("THOMAS", 40.0),
                ("VAUDESCAL,", 90.0),
                ("Homme,", 160.0),
                ("1985-03-12,", 200.0),
                ("40", 260.0),
                ("an(s),", 275.0),
                ("Non-fumeur", 310.0),
            ]),
        ];
        let insured = UvParser.extract_insured("", &lines);
        assert_eq!(insured.len(), 1);
        assert_eq!(insured[0].last_name, "VAUDESCAL");
    }

    #[test]
    fn test_insured_line_enters_table() {
        let l = line(&[
            ("JEAN", 40.0),
            ("ROY,", 80.0),
            ("Homme,", 120.0),
            ("1970-05-05,", 170.0),
            ("55", 230.0),
            ("an(s),", 250.0),
            ("Fumeur", 290.0),
        ]);
        let ctx = ScanContext {
            state: ParseState::BeforeTable,
            has_item: false,
        };
        assert_eq!(
            UvParser.classify_line(ctx, &l, &ColumnRow::default()),
            LineEvent::EnterTable
        );
    }

    #[test]
    fn test_prime_totale_reads_premium_columns() {
        let row = ColumnRow {
            description: "Prime totale".into(),
            annual_premium: "1 250,00 $".into(),
            monthly_premium: "110,50 $".into(),
            ..Default::default()
        };
        let event = UvParser.classify_line(in_table(true), &line(&[]), &row);
        assert_eq!(
            event,
            LineEvent::Total(RawTotals {
                annual_premium: Some("1 250,00 $".into()),
                monthly_premium: Some("110,50 $".into()),
                payment_interval: None,
            })
        );
        assert!(UvParser.totals_complete(&RawTotals::default()));
    }

    #[test]
    fn test_concatenated_coverage_is_tidied() {
        let row = ColumnRow {
            description: "Vie temporaire 20 ans".into(),
            coverage_amount: "50000$".into(),
            annual_premium: "420,00 $".into(),
            ..Default::default()
        };
        let LineEvent::Item(item) = UvParser.classify_line(in_table(false), &line(&[]), &row)
        else {
            panic!("expected item");
        };
        assert_eq!(item.coverage_amount.as_deref(), Some("50 000 $"));
    }

    #[test]
    fn test_noise_lines_skipped() {
        for desc in ["Assurance individuelle", "SOMMAIRE DES PROTECTIONS ET DES PRIMES"] {
            let row = ColumnRow {
                description: desc.into(),
                ..Default::default()
            };
            assert_eq!(
                UvParser.classify_line(in_table(true), &line(&[]), &row),
                LineEvent::Skip
            );
        }
    }

    #[test]
    fn test_metadata() {
        let pages = vec![PageContent {
            page_number: 1,
            text: "Date : 17 novembre 2025\nVotre conseiller : Marc Lavoie\n".into(),
            words: vec![],
        }];
        let meta = UvParser.extract_metadata(&pages);
        assert_eq!(meta.document_date.as_deref(), Some("17 novembre 2025"));
        assert_eq!(meta.advisor_name.as_deref(), Some("Marc Lavoie"));
    }
}
