//! Assomption Vie illustrations ("Sommaire des garanties").
//!
//! Insured persons are numbered (`1 - Name, âge 26, Homme , Non-fumeur`) and
//! may be several. The guarantees table opens after a `Police ...` heading;
//! totals are printed as labeled lines anywhere on the page.

use regex::Regex;
use std::sync::LazyLock;

use super::header::{find_date_heading, find_labeled_value, DocumentMetadata};
use super::normalize::{is_smoker, split_full_name};
use super::{table_row_event, LineEvent, ParseState, ScanContext, VariantParser};
use crate::extraction::lines::TextLine;
use crate::extraction::table::ColumnRow;
use crate::extraction::PageContent;
use crate::model::{InsuredPerson, RawTotals, Sex, SourceVariant};

pub(crate) const SUMMARY_ANCHOR: &str = "Sommaire des garanties";

const HEADER_PHRASES: &[&str] = &[
    "Assurance demandee",
    "Assurance demandée",
    "Capital assure",
    "Capital assuré",
    "des primes",
    "initiale",
];

static INSURED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+)\s*[\x{2010}-\x{2015}-]\s*([^,\n]+),\s*[aAâÂ]ge\s*(\d+),\s*(Homme|Femme)\s*,\s*((?i:non[\x{2010}-\x{2015}-]fumeur|fumeur))",
    )
    .unwrap()
});

static ADVISOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Votre conseiller\s*:\s*(.+?)(?:\n|Telephone|Téléphone|$)").unwrap()
});

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d\s,]*\d?\s*\$)").unwrap());

static INTERVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Intervalle de paiement\s+(\w+)").unwrap());

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Totals line recognized on its label, if any.
fn totals_line(text: &str) -> Option<RawTotals> {
    if text.contains("Prime annuelle totale") {
        return Some(RawTotals {
            annual_premium: capture(&AMOUNT_RE, text),
            ..Default::default()
        });
    }
    if text.trim().starts_with("Prime totale") {
        return Some(RawTotals {
            monthly_premium: capture(&AMOUNT_RE, text),
            ..Default::default()
        });
    }
    if text.contains("Intervalle de paiement") {
        return Some(RawTotals {
            payment_interval: capture(&INTERVAL_RE, text),
            ..Default::default()
        });
    }
    None
}

pub struct AssomptionParser;

impl AssomptionParser {
    /// Every numbered insured person in the page text, in order.
    pub fn parse_insured(text: &str) -> Vec<InsuredPerson> {
        INSURED_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let (first_name, last_name) = split_full_name(caps[2].trim());
                Some(InsuredPerson {
                    number: caps[1].to_string(),
                    last_name,
                    first_name,
                    sex: Sex::from_label(&caps[4])?,
                    age: caps[3].parse().ok()?,
                    smoker: is_smoker(&caps[5]),
                    birth_date: None,
                })
            })
            .collect()
    }
}

impl VariantParser for AssomptionParser {
    fn variant(&self) -> SourceVariant {
        SourceVariant::Assomption
    }

    fn detect_anchor(&self, page_text: &str) -> bool {
        page_text.contains(SUMMARY_ANCHOR)
            && page_text.contains("Personne")
            && page_text.contains("assurer")
    }

    fn extract_metadata(&self, pages: &[PageContent]) -> DocumentMetadata {
        DocumentMetadata {
            document_date: find_date_heading(pages),
            advisor_name: find_labeled_value(pages, &ADVISOR_RE),
        }
    }

    fn extract_insured(&self, page_text: &str, _lines: &[TextLine]) -> Vec<InsuredPerson> {
        Self::parse_insured(page_text)
    }

    fn classify_line(&self, ctx: ScanContext, line: &TextLine, row: &ColumnRow) -> LineEvent {
        let text = line.text();
        let trimmed = text.trim();

        if trimmed.starts_with("Police ") {
            // A second policy heading inside the table is not a continuation.
            return match ctx.state {
                ParseState::BeforeTable => LineEvent::EnterTable,
                _ => LineEvent::Skip,
            };
        }

        if let Some(totals) = totals_line(&text) {
            return LineEvent::Total(totals);
        }

        if ctx.state != ParseState::InTable {
            return LineEvent::Skip;
        }

        if HEADER_PHRASES.iter().any(|h| text.contains(h)) || trimmed.starts_with("sur ") {
            return LineEvent::Skip;
        }

        if trimmed == "Sommaire" {
            return LineEvent::LeaveTable;
        }

        table_row_event(ctx, row, &row.coverage_amount)
    }

    fn totals_complete(&self, totals: &RawTotals) -> bool {
        totals.annual_premium.is_some()
            && totals.monthly_premium.is_some()
            && totals.payment_interval.is_some()
    }
}
