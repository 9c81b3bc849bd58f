use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::model::SourceVariant;
use crate::unify::UnifiedDocument;

/// Per-insurer share of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub files: usize,
    pub records: usize,
    pub annual_premium: Decimal,
}

/// Aggregates over the unified records of a batch.
///
/// Sums skip records where the amount is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub unique_files: usize,
    pub unique_insured: usize,
    pub by_source: BTreeMap<SourceVariant, SourceSummary>,
    pub total_coverage: Decimal,
    pub total_annual_premium: Decimal,
    pub total_monthly_premium: Decimal,
}

impl BatchSummary {
    /// Files are counted by `file_id`, over documents that produced records.
    pub fn from_documents(documents: &[UnifiedDocument]) -> Self {
        let mut summary = BatchSummary::default();
        let mut files = HashSet::new();
        let mut files_by_source: BTreeMap<SourceVariant, HashSet<&str>> = BTreeMap::new();
        let mut insured = HashSet::new();

        for doc in documents.iter().filter(|d| !d.records.is_empty()) {
            files.insert(doc.file_id.as_str());
            files_by_source
                .entry(doc.source)
                .or_default()
                .insert(doc.file_id.as_str());

            let source = summary.by_source.entry(doc.source).or_default();
            source.records += doc.records.len();

            for record in &doc.records {
                insured.insert(record.insured_name.as_str());
                if let Some(premium) = record.policy_premium {
                    add_amount(&mut source.annual_premium, premium, doc, "policy_premium");
                    add_amount(&mut summary.total_annual_premium, premium, doc, "policy_premium");
                }
                if let Some(coverage) = record.coverage_amount {
                    add_amount(&mut summary.total_coverage, coverage, doc, "coverage_amount");
                }
                if let Some(monthly) = record.monthly_premium {
                    add_amount(&mut summary.total_monthly_premium, monthly, doc, "monthly_premium");
                }
            }
            summary.total_records += doc.records.len();
        }

        for (variant, ids) in files_by_source {
            summary.by_source.entry(variant).or_default().files = ids.len();
        }
        summary.unique_files = files.len();
        summary.unique_insured = insured.len();
        summary
    }
}

/// Overflowing terms are left out of the sum.
fn add_amount(total: &mut Decimal, value: Decimal, doc: &UnifiedDocument, field: &str) {
    match total.checked_add(value) {
        Some(sum) => *total = sum,
        None => tracing::warn!(
            file = %doc.file_id,
            field,
            %value,
            "sum overflowed, amount left out of the summary"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoverageItem, DocumentExtraction, InsuredPerson, RawTotals, Sex};
    use crate::unify::unify;
    use rust_decimal_macros::dec;

    fn document(
        source: SourceVariant,
        file: &str,
        names: &[&str],
        items: &[(&str, &str, Option<&str>)],
    ) -> UnifiedDocument {
        let insured = names
            .iter()
            .enumerate()
            .map(|(i, name)| InsuredPerson {
                number: (i + 1).to_string(),
                last_name: name.to_string(),
                first_name: String::new(),
                sex: Sex::Homme,
                age: 40,
                smoker: false,
                birth_date: None,
            })
            .collect();
        let items = items
            .iter()
            .map(|(name, coverage, monthly)| CoverageItem {
                product_name: name.to_string(),
                coverage_amount: Some(coverage.to_string()),
                annual_premium: Some("100,00 $".into()),
                monthly_premium: monthly.map(str::to_string),
                ..Default::default()
            })
            .collect();
        unify(&DocumentExtraction {
            source,
            file_id: file.into(),
            document_date_raw: None,
            document_date: None,
            advisor_name: None,
            insured,
            items,
            totals: RawTotals::default(),
            skipped_lines: vec![],
        })
    }

    #[test]
    fn test_summary_totals() {
        let docs = vec![
            document(
                SourceVariant::Uv,
                "a.pdf",
                &["ROY"],
                &[("Vie", "50 000 $", Some("8,50 $")), ("Avenant", "Incluse", None)],
            ),
            document(
                SourceVariant::Assomption,
                "b.pdf",
                &["Roy", "Caron"],
                &[("Vie entière", "25 000,00 $", None)],
            ),
        ];
        let s = BatchSummary::from_documents(&docs);

        assert_eq!(s.total_records, 4);
        assert_eq!(s.unique_files, 2);
        assert_eq!(s.unique_insured, 3);
        assert_eq!(s.total_coverage, dec!(100000.00));
        assert_eq!(s.total_annual_premium, dec!(400.00));
        assert_eq!(s.total_monthly_premium, dec!(8.50));

        let uv = &s.by_source[&SourceVariant::Uv];
        assert_eq!((uv.files, uv.records), (1, 2));
        assert_eq!(uv.annual_premium, dec!(200.00));
        let assomption = &s.by_source[&SourceVariant::Assomption];
        assert_eq!((assomption.files, assomption.records), (1, 2));
    }

    #[test]
    fn test_files_counted_by_id_with_records() {
        let docs = vec![
            document(SourceVariant::Uv, "a/roy.pdf", &["ROY"], &[("Vie", "1 000 $", None)]),
            document(SourceVariant::Uv, "b/roy.pdf", &["ROY"], &[("Vie", "1 000 $", None)]),
            document(SourceVariant::Uv, "a/roy.pdf", &["ROY"], &[("Vie", "1 000 $", None)]),
            document(SourceVariant::Assomption, "vide.pdf", &["Caron"], &[]),
        ];
        let s = BatchSummary::from_documents(&docs);

        assert_eq!(s.unique_files, 2);
        assert_eq!(s.by_source[&SourceVariant::Uv].files, 2);
        assert_eq!(s.by_source[&SourceVariant::Uv].records, 3);
        assert!(!s.by_source.contains_key(&SourceVariant::Assomption));
        assert_eq!(s.unique_insured, 1);
    }

    #[test]
    fn test_overflowing_amount_is_left_out() {
        let huge = format!("{} $", Decimal::MAX);
        let docs = vec![
            document(SourceVariant::Uv, "a.pdf", &["ROY"], &[("Vie", huge.as_str(), None)]),
            document(SourceVariant::Uv, "b.pdf", &["ROY"], &[("Vie", huge.as_str(), None)]),
        ];
        let s = BatchSummary::from_documents(&docs);

        assert_eq!(s.total_coverage, Decimal::MAX);
        assert_eq!(s.total_annual_premium, dec!(200.00));
        assert_eq!(s.total_records, 2);
    }

    #[test]
    fn test_empty_summary() {
        let s = BatchSummary::from_documents(&[]);
        assert_eq!(s, BatchSummary::default());
    }
}
