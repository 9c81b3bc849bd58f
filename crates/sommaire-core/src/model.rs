use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SommaireError;

/// The insurer whose illustration layout a document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceVariant {
    Uv,
    Assomption,
}

impl SourceVariant {
    pub const ALL: [SourceVariant; 2] = [SourceVariant::Uv, SourceVariant::Assomption];

    /// Lowercase key used for presets and CLI flags.
    pub fn key(&self) -> &'static str {
        match self {
            SourceVariant::Uv => "uv",
            SourceVariant::Assomption => "assomption",
        }
    }
}

impl fmt::Display for SourceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceVariant::Uv => write!(f, "UV"),
            SourceVariant::Assomption => write!(f, "Assomption"),
        }
    }
}

impl FromStr for SourceVariant {
    type Err = SommaireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uv" => Ok(SourceVariant::Uv),
            "assomption" => Ok(SourceVariant::Assomption),
            _ => Err(SommaireError::UnknownSourceVariant(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Homme,
    Femme,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Homme => write!(f, "Homme"),
            Sex::Femme => write!(f, "Femme"),
        }
    }
}

impl Sex {
    /// Sex as printed on the illustrations ("Homme" or "Femme").
    pub fn from_label(s: &str) -> Option<Sex> {
        match s.trim() {
            "Homme" => Some(Sex::Homme),
            "Femme" => Some(Sex::Femme),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuredPerson {
    /// Position of the person in the document ("1" when the source has no numbering).
    pub number: String,
    pub last_name: String,
    pub first_name: String,
    pub sex: Sex,
    pub age: u32,
    pub smoker: bool,
    /// ISO `YYYY-MM-DD`, only for sources that print it.
    pub birth_date: Option<String>,
}

/// One protection/guarantee row of the summary table, amounts kept as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageItem {
    pub product_name: String,
    pub coverage_amount: Option<String>,
    pub annual_premium: Option<String>,
    pub monthly_premium: Option<String>,
    pub payment_duration: Option<String>,
    pub details: Option<String>,
}

/// Document-level premium totals, as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTotals {
    pub annual_premium: Option<String>,
    pub monthly_premium: Option<String>,
    pub payment_interval: Option<String>,
}

impl RawTotals {
    /// Overwrite the fields `other` carries, keep the rest.
    pub fn merge(&mut self, other: RawTotals) {
        if other.annual_premium.is_some() {
            self.annual_premium = other.annual_premium;
        }
        if other.monthly_premium.is_some() {
            self.monthly_premium = other.monthly_premium;
        }
        if other.payment_interval.is_some() {
            self.payment_interval = other.payment_interval;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line_text: String,
    pub reason: String,
}

/// Everything one variant parser pulled out of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExtraction {
    pub source: SourceVariant,
    pub file_id: String,
    pub document_date_raw: Option<String>,
    /// ISO date when the raw date was recognized, otherwise the raw text unchanged.
    pub document_date: Option<String>,
    pub advisor_name: Option<String>,
    pub insured: Vec<InsuredPerson>,
    pub items: Vec<CoverageItem>,
    pub totals: RawTotals,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_variant_from_str() {
        assert_eq!("UV".parse::<SourceVariant>().unwrap(), SourceVariant::Uv);
        assert_eq!(
            " Assomption ".parse::<SourceVariant>().unwrap(),
            SourceVariant::Assomption
        );
        assert!(matches!(
            "desjardins".parse::<SourceVariant>(),
            Err(SommaireError::UnknownSourceVariant(s)) if s == "desjardins"
        ));
    }

    #[test]
    fn test_sex_from_label() {
        assert_eq!(Sex::from_label("Homme"), Some(Sex::Homme));
        assert_eq!(Sex::from_label(" Femme "), Some(Sex::Femme));
        assert_eq!(Sex::from_label("H"), None);
        assert_eq!(Sex::from_label("f"), None);
    }

    #[test]
    fn test_totals_merge_keeps_existing() {
        let mut totals = RawTotals {
            annual_premium: Some("475,25 $".into()),
            ..Default::default()
        };
        totals.merge(RawTotals {
            payment_interval: Some("Mensuel".into()),
            ..Default::default()
        });
        assert_eq!(totals.annual_premium.as_deref(), Some("475,25 $"));
        assert_eq!(totals.payment_interval.as_deref(), Some("Mensuel"));
        assert!(totals.monthly_premium.is_none());
    }
}
