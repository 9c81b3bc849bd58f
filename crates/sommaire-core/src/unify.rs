//! Maps a variant's [`DocumentExtraction`] onto the common record shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{DocumentExtraction, InsuredPerson, Sex, SkippedLine, SourceVariant};
use crate::parsing::values::parse_amount;

/// Column order of [`UnifiedRecord`], as serialized.
pub const UNIFIED_COLUMNS: [&str; 18] = [
    "insurer_name",
    "report_date",
    "advisor_name",
    "pdf_filename",
    "insured_number",
    "last_name",
    "first_name",
    "insured_name",
    "sex",
    "birth_date",
    "age",
    "smoker",
    "product_name",
    "coverage_amount",
    "policy_premium",
    "monthly_premium",
    "payment_duration",
    "details",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedInsured {
    pub insured_number: String,
    pub last_name: String,
    pub first_name: String,
    pub sex: Sex,
    pub age: u32,
    pub smoker: bool,
    pub birth_date: Option<String>,
}

impl UnifiedInsured {
    /// "first last", trimmed.
    pub fn insured_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl From<&InsuredPerson> for UnifiedInsured {
    fn from(p: &InsuredPerson) -> Self {
        UnifiedInsured {
            insured_number: p.number.clone(),
            last_name: p.last_name.clone(),
            first_name: p.first_name.clone(),
            sex: p.sex,
            age: p.age,
            smoker: p.smoker,
            birth_date: p.birth_date.clone(),
        }
    }
}

/// A coverage item with its amounts normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedProtection {
    pub product_name: String,
    pub coverage_amount: Option<Decimal>,
    /// Annual premium.
    pub policy_premium: Option<Decimal>,
    pub monthly_premium: Option<Decimal>,
    pub payment_duration: Option<String>,
    pub details: Option<String>,
}

/// One (insured person, coverage item) row. Field order follows [`UNIFIED_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub insurer_name: String,
    pub report_date: Option<String>,
    pub advisor_name: Option<String>,
    pub pdf_filename: String,
    pub insured_number: String,
    pub last_name: String,
    pub first_name: String,
    pub insured_name: String,
    pub sex: Sex,
    pub birth_date: Option<String>,
    pub age: u32,
    pub smoker: bool,
    pub product_name: String,
    pub coverage_amount: Option<Decimal>,
    pub policy_premium: Option<Decimal>,
    pub monthly_premium: Option<Decimal>,
    pub payment_duration: Option<String>,
    pub details: Option<String>,
}

/// Document-level premium totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub annual_premium: Option<Decimal>,
    pub monthly_premium: Option<Decimal>,
    pub payment_interval: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    AmountUnparsable,
}

/// A field that was printed but could not be normalized; the value is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWarning {
    pub kind: WarningKind,
    pub field: String,
    pub raw: String,
    /// Product the field belongs to; `None` for document totals.
    pub product: Option<String>,
}

/// Everything extracted from one document, in the common shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedDocument {
    pub source: SourceVariant,
    /// Identifier the document was extracted under, usually its path.
    pub file_id: String,
    pub pdf_filename: String,
    pub report_date: Option<String>,
    pub advisor_name: Option<String>,
    pub insured_persons: Vec<UnifiedInsured>,
    pub protections: Vec<UnifiedProtection>,
    /// Insured-major cross product of `insured_persons` and `protections`.
    pub records: Vec<UnifiedRecord>,
    pub totals: Totals,
    pub warnings: Vec<FieldWarning>,
    pub skipped_lines: Vec<SkippedLine>,
}

/// Build the unified document and its record cross product.
pub fn unify(extraction: &DocumentExtraction) -> UnifiedDocument {
    let mut warnings = Vec::new();

    let pdf_filename = Path::new(&extraction.file_id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| extraction.file_id.clone());

    let insured_persons: Vec<UnifiedInsured> =
        extraction.insured.iter().map(UnifiedInsured::from).collect();

    let protections: Vec<UnifiedProtection> = extraction
        .items
        .iter()
        .map(|item| {
            let product = Some(item.product_name.as_str());
            UnifiedProtection {
                product_name: item.product_name.clone(),
                coverage_amount: normalize_amount(
                    "coverage_amount",
                    item.coverage_amount.as_deref(),
                    product,
                    &mut warnings,
                ),
                policy_premium: normalize_amount(
                    "policy_premium",
                    item.annual_premium.as_deref(),
                    product,
                    &mut warnings,
                ),
                monthly_premium: normalize_amount(
                    "monthly_premium",
                    item.monthly_premium.as_deref(),
                    product,
                    &mut warnings,
                ),
                payment_duration: item.payment_duration.clone(),
                details: item.details.clone(),
            }
        })
        .collect();

    let totals = Totals {
        annual_premium: normalize_amount(
            "total_annual_premium",
            extraction.totals.annual_premium.as_deref(),
            None,
            &mut warnings,
        ),
        monthly_premium: normalize_amount(
            "total_monthly_premium",
            extraction.totals.monthly_premium.as_deref(),
            None,
            &mut warnings,
        ),
        payment_interval: extraction.totals.payment_interval.clone(),
    };

    let insurer_name = extraction.source.to_string();
    let mut records = Vec::with_capacity(insured_persons.len() * protections.len());
    for person in &insured_persons {
        for prot in &protections {
            records.push(UnifiedRecord {
                insurer_name: insurer_name.clone(),
                report_date: extraction.document_date.clone(),
                advisor_name: extraction.advisor_name.clone(),
                pdf_filename: pdf_filename.clone(),
                insured_number: person.insured_number.clone(),
                last_name: person.last_name.clone(),
                first_name: person.first_name.clone(),
                insured_name: person.insured_name(),
                sex: person.sex,
                birth_date: person.birth_date.clone(),
                age: person.age,
                smoker: person.smoker,
                product_name: prot.product_name.clone(),
                coverage_amount: prot.coverage_amount,
                policy_premium: prot.policy_premium,
                monthly_premium: prot.monthly_premium,
                payment_duration: prot.payment_duration.clone(),
                details: prot.details.clone(),
            });
        }
    }

    if !warnings.is_empty() {
        tracing::debug!(
            file = %pdf_filename,
            warnings = warnings.len(),
            "amounts left empty after normalization"
        );
    }

    UnifiedDocument {
        source: extraction.source,
        file_id: extraction.file_id.clone(),
        pdf_filename,
        report_date: extraction.document_date.clone(),
        advisor_name: extraction.advisor_name.clone(),
        insured_persons,
        protections,
        records,
        totals,
        warnings,
        skipped_lines: extraction.skipped_lines.clone(),
    }
}

fn normalize_amount(
    field: &str,
    raw: Option<&str>,
    product: Option<&str>,
    warnings: &mut Vec<FieldWarning>,
) -> Option<Decimal> {
    let raw = raw?;
    let value = parse_amount(raw);
    if value.is_none() {
        warnings.push(FieldWarning {
            kind: WarningKind::AmountUnparsable,
            field: field.to_string(),
            raw: raw.to_string(),
            product: product.map(str::to_string),
        });
    }
    value
}
