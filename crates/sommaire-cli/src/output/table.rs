use sommaire_core::report::BatchSummary;
use sommaire_core::unify::UnifiedDocument;
use std::fmt::Display;

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn amount<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".into(),
    }
}

/// Print one unified document as a readable report.
pub fn print_document(doc: &UnifiedDocument) {
    println!("=== {} : {} ===\n", doc.source, doc.pdf_filename);
    println!("  Date:     {}", or_dash(doc.report_date.as_deref()));
    println!("  Advisor:  {}", or_dash(doc.advisor_name.as_deref()));

    println!("\nInsured ({}):", doc.insured_persons.len());
    for p in &doc.insured_persons {
        let smoker = if p.smoker { "smoker" } else { "non-smoker" };
        print!(
            "  {}. {}  {}, {} years, {}",
            p.insured_number,
            p.insured_name(),
            p.sex,
            p.age,
            smoker
        );
        if let Some(ref birth) = p.birth_date {
            print!(", born {birth}");
        }
        println!();
    }

    println!("\nProtections ({}):", doc.protections.len());
    if !doc.protections.is_empty() {
        let width = doc
            .protections
            .iter()
            .map(|p| p.product_name.chars().count())
            .max()
            .unwrap_or(10)
            .max("Product".len());

        println!(
            "  {:<width$}  {:>12}  {:>10}  {:>10}  Duration",
            "Product", "Coverage", "Annual", "Monthly"
        );
        println!("  {}", "-".repeat(width + 2 + 12 + 2 + 10 + 2 + 10 + 10));
        for p in &doc.protections {
            println!(
                "  {:<width$}  {:>12}  {:>10}  {:>10}  {}",
                p.product_name,
                amount(p.coverage_amount),
                amount(p.policy_premium),
                amount(p.monthly_premium),
                or_dash(p.payment_duration.as_deref()),
            );
            if let Some(ref details) = p.details {
                println!("    {details}");
            }
        }
    }

    println!("\nTotals:");
    println!("  Annual premium:    {}", amount(doc.totals.annual_premium));
    println!("  Monthly premium:   {}", amount(doc.totals.monthly_premium));
    println!(
        "  Payment interval:  {}",
        or_dash(doc.totals.payment_interval.as_deref())
    );

    println!(
        "\n{} record(s) ({} insured x {} protection(s))",
        doc.records.len(),
        doc.insured_persons.len(),
        doc.protections.len()
    );

    if !doc.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &doc.warnings {
            let product = w.product.as_deref().unwrap_or("totals");
            println!("  - {product}: {} {:?} is not an amount", w.field, w.raw);
        }
    }

    if !doc.skipped_lines.is_empty() {
        println!("\nSkipped table lines:");
        for line in &doc.skipped_lines {
            println!("  - {} ({})", line.line_text, line.reason);
        }
    }
}

/// Print the batch-level summary report.
pub fn print_summary(summary: &BatchSummary) {
    println!("SUMMARY");
    println!("{}", "-".repeat(40));
    println!("  Total records:          {}", summary.total_records);
    println!("  Unique PDFs:            {}", summary.unique_files);
    println!("  Unique insured persons: {}", summary.unique_insured);

    if !summary.by_source.is_empty() {
        println!("\nBy source:");
        for (source, s) in &summary.by_source {
            println!("  {source}:");
            println!("    PDFs:                 {}", s.files);
            println!("    Records:              {}", s.records);
            println!("    Total annual premium: {:.2}", s.annual_premium);
        }
    }

    println!("\nFinancial:");
    println!("  Total coverage amount:  {:.2}", summary.total_coverage);
    println!("  Total annual premiums:  {:.2}", summary.total_annual_premium);
    println!("  Total monthly premiums: {:.2}", summary.total_monthly_premium);
}
