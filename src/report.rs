//! Terminal rendering of the readiness summary

use std::fmt::Write;

use crate::models::{Category, CountryCount, MapPoint, Summary};

pub const OBSERVATION: &str = "These patterns may indicate strengths or systemic vulnerabilities \
in specific regions. Use these trends to inform strategic interventions.";

pub fn section_header(title: &str) -> String {
    format!("\n{}\n  {}\n{}\n", "═".repeat(70), title, "═".repeat(70))
}

fn subsection(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", "─".repeat(60));
}

fn ranking(out: &mut String, rows: &[CountryCount], category: Category) {
    if rows.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    for row in rows {
        let _ = writeln!(
            out,
            "  {} {}: {} base(s) in {}",
            category.swatch(),
            row.country,
            row.count,
            category
        );
    }
}

/// Quartile legend, pattern detection rankings and the closing observation
pub fn render_summary(summary: &Summary) -> String {
    let t = &summary.thresholds;
    let mut out = String::new();

    out.push_str(&section_header("READINESS QUARTILE SUMMARY"));
    let _ = writeln!(out, "  Bases analyzed: {}\n", summary.total_bases);
    for (upper, category) in t.bands() {
        let _ = writeln!(
            out,
            "  {} {} (≤ {:.1}) – {}",
            category.swatch(),
            category,
            upper,
            category.label()
        );
    }
    let _ = writeln!(
        out,
        "  {} Q4 (> Q3) – {}",
        Category::Q4.swatch(),
        Category::Q4.label()
    );

    subsection(&mut out, "Bases per quartile");
    for c in &summary.category_counts {
        let pct = c.count as f64 / summary.total_bases.max(1) as f64 * 100.0;
        let _ = writeln!(out, "  {} {:>6} ({:>5.1}%)", c.category, c.count, pct);
    }

    out.push_str(&section_header("SMART PATTERN DETECTION"));
    let _ = writeln!(out, "Top Countries with High Readiness Bases:");
    ranking(&mut out, &summary.top_countries, Category::Q4);
    let _ = writeln!(out, "\nCountries with Most Critically Low Readiness Bases:");
    ranking(&mut out, &summary.bottom_countries, Category::Q1);

    let _ = writeln!(out, "\nObservation: {}", OBSERVATION);
    out
}

/// One aligned row per base
pub fn render_map_table(points: &[MapPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:28} {:18} {:>9} {:>10} {:>10} {:>4} {:>12}",
        "Base", "Country", "Readiness", "Lat", "Lon", "Cat", "Radius (m)"
    );
    let _ = writeln!(out, "  {}", "─".repeat(97));
    for p in points {
        let _ = writeln!(
            out,
            "  {:28} {:18} {:>9.1} {:>10.4} {:>10.4} {:>4} {:>12.0}",
            p.base_name, p.country, p.readiness, p.position[1], p.position[0], p.category, p.radius
        );
    }
    out
}
