use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extraction::lines::TextLine;

/// Semantic columns of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Description,
    CoverageAmount,
    PaymentDuration,
    AnnualPremium,
    MonthlyPremium,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Description => "description",
            ColumnKind::CoverageAmount => "coverage_amount",
            ColumnKind::PaymentDuration => "payment_duration",
            ColumnKind::AnnualPremium => "annual_premium",
            ColumnKind::MonthlyPremium => "monthly_premium",
        };
        f.write_str(name)
    }
}

/// A column and its half-open horizontal range `[x_min, x_max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub column: ColumnKind,
    pub x_min: f64,
    pub x_max: f64,
}

impl ColumnDef {
    pub fn contains(&self, x: f64) -> bool {
        self.x_min <= x && x < self.x_max
    }
}

/// Text of one line split by column. Columns with no words are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    pub description: String,
    pub coverage_amount: String,
    pub payment_duration: String,
    pub annual_premium: String,
    pub monthly_premium: String,
}

impl ColumnRow {
    fn slot_mut(&mut self, column: ColumnKind) -> &mut String {
        match column {
            ColumnKind::Description => &mut self.description,
            ColumnKind::CoverageAmount => &mut self.coverage_amount,
            ColumnKind::PaymentDuration => &mut self.payment_duration,
            ColumnKind::AnnualPremium => &mut self.annual_premium,
            ColumnKind::MonthlyPremium => &mut self.monthly_premium,
        }
    }
}

/// Assign each word of a line to the first column whose range contains its X.
///
/// Words outside every range are dropped from the row; they stay visible in
/// [`TextLine::text`].
pub fn classify_line(line: &TextLine, columns: &[ColumnDef]) -> ColumnRow {
    let mut row = ColumnRow::default();

    for word in &line.words {
        let Some(def) = columns.iter().find(|c| c.contains(word.x)) else {
            continue;
        };
        let slot = row.slot_mut(def.column);
        if !slot.is_empty() {
            slot.push(' ');
        }
        slot.push_str(&word.text);
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PositionedWord;

    fn col(column: ColumnKind, x_min: f64, x_max: f64) -> ColumnDef {
        ColumnDef {
            column,
            x_min,
            x_max,
        }
    }

    fn uv_columns() -> Vec<ColumnDef> {
        vec![
            col(ColumnKind::Description, 0.0, 280.0),
            col(ColumnKind::CoverageAmount, 280.0, 400.0),
            col(ColumnKind::AnnualPremium, 400.0, 510.0),
            col(ColumnKind::MonthlyPremium, 510.0, 600.0),
        ]
    }

    fn line(words: &[(&str, f64)]) -> TextLine {
        TextLine {
            y: 100.0,
            words: words
                .iter()
                .map(|(t, x)| PositionedWord::new(*t, *x, 100.0))
                .collect(),
        }
    }

    #[test]
    fn test_classify_joins_words_per_column() {
        let row = classify_line(
            &line(&[
                ("Vie", 50.0),
                ("temporaire", 70.0),
                ("50", 300.0),
                ("000", 315.0),
                ("$", 335.0),
                ("556,50", 420.0),
                ("$", 455.0),
            ]),
            &uv_columns(),
        );
        assert_eq!(row.description, "Vie temporaire");
        assert_eq!(row.coverage_amount, "50 000 $");
        assert_eq!(row.annual_premium, "556,50 $");
        assert_eq!(row.monthly_premium, "");
        assert_eq!(row.payment_duration, "");
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let row = classify_line(&line(&[("edge", 280.0)]), &uv_columns());
        assert_eq!(row.coverage_amount, "edge");
        assert_eq!(row.description, "");
    }

    #[test]
    fn test_upper_bound_goes_to_next_column() {
        let row = classify_line(&line(&[("a", 400.0), ("b", 510.0)]), &uv_columns());
        assert_eq!(row.coverage_amount, "");
        assert_eq!(row.annual_premium, "a");
        assert_eq!(row.monthly_premium, "b");
    }

    #[test]
    fn test_word_outside_all_ranges_dropped_from_row_only() {
        let l = line(&[("Prime", 50.0), ("page", 600.0), ("3", 640.0)]);
        let row = classify_line(&l, &uv_columns());
        assert_eq!(row.description, "Prime");
        assert_eq!(row.monthly_premium, "");
        assert_eq!(l.text(), "Prime page 3");
    }
}
