//! Run report generation.
//!
//! Every statistic is re-derived by scanning the output directory, never
//! from in-memory counters, so regenerating the report on an unchanged
//! directory is idempotent. The report file is rewritten wholesale on
//! every run.

use crate::collector::{self, QualifiedAuthor};
use crate::error::Result;
use chrono::Local;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const REPORT_FILE: &str = "collection_report.txt";

const RULE_HEAVY: &str = "==================================================";
const RULE_LIGHT: &str = "------------------------------";

/// Per-year counts of abstract files actually on disk for the field.
/// Files not matching the naming convention are ignored.
pub fn year_distribution(dir: &Path, field: &str) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return counts,
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(n) => n,
            None => continue,
        };
        if let Some((file_field, year, _)) = collector::parse_filename(name) {
            if file_field == field {
                *counts.entry(year).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// Write the full-run report: author list plus the disk-derived year
/// distribution and missing-file analysis.
pub fn write_full_report(
    dir: &Path,
    field: &str,
    years: &[i32],
    authors: &[QualifiedAuthor],
) -> Result<PathBuf> {
    let counts = year_distribution(dir, field);
    let total_files: usize = counts.values().sum();
    let total_papers: usize = authors.iter().map(|a| a.papers.len()).sum();

    let mut out = String::new();
    push_header(&mut out, field, years.len());
    out.push_str(&format!("Number of Continuous Authors: {}\n", authors.len()));
    out.push_str(&format!("Total Papers Collected: {}\n", total_papers));
    out.push_str(&format!("Total Files Saved: {}\n", total_files));
    out.push_str("All papers include complete abstracts\n\n");

    out.push_str("Author List:\n");
    out.push_str(RULE_LIGHT);
    out.push('\n');
    for (i, author) in authors.iter().enumerate() {
        out.push_str(&format!(
            "{:2}. {} (ID: {})\n",
            i + 1,
            author.name,
            author.author_id
        ));
    }

    push_year_distribution(&mut out, &counts);

    out.push_str("\nMissing Files Analysis:\n");
    out.push_str(RULE_LIGHT);
    out.push('\n');
    let expected_per_year = authors.len();
    for &year in years {
        let actual = counts.get(&year).copied().unwrap_or(0);
        if actual < expected_per_year {
            out.push_str(&format!(
                "{}: Missing {} files (Expected: {}, Actual: {})\n",
                year,
                expected_per_year - actual,
                expected_per_year,
                actual
            ));
        } else {
            out.push_str(&format!("{}: Complete ({} files)\n", year, actual));
        }
    }

    let path = dir.join(REPORT_FILE);
    std::fs::write(&path, out)?;
    println!("Statistical report saved: {}", path.display());
    Ok(path)
}

/// Write the incremental-run report: completeness analysis derived purely
/// from the directory scan (no author list is available in this mode).
pub fn write_incremental_report(dir: &Path, field: &str, years: &[i32]) -> Result<PathBuf> {
    let counts = year_distribution(dir, field);
    let total_files: usize = counts.values().sum();
    let complete_authors = collector::complete_author_indices(dir, field, years).len();

    let mut out = String::new();
    push_header(&mut out, field, years.len());
    out.push_str("Mode: INCREMENTAL (Fill Missing Authors)\n");
    out.push_str(&format!("Number of Complete Authors: {}\n", complete_authors));
    out.push_str(&format!("Total Files Saved: {}\n", total_files));
    out.push_str("All papers include complete abstracts\n");

    push_year_distribution(&mut out, &counts);

    out.push_str("\nAuthor Completeness Analysis:\n");
    out.push_str(RULE_LIGHT);
    out.push('\n');
    out.push_str(&format!(
        "Complete Authors ({} years): {}\n",
        years.len(),
        complete_authors
    ));
    out.push_str(&format!("Expected files per complete author: {}\n", years.len()));
    out.push_str(&format!(
        "Total expected files: {}\n",
        complete_authors * years.len()
    ));
    out.push_str(&format!("Actual saved files: {}\n", total_files));
    if total_files == complete_authors * years.len() {
        out.push_str(&format!(
            "All authors have complete {}-year data\n",
            years.len()
        ));
    } else {
        out.push_str("Some authors may have incomplete data\n");
    }

    let path = dir.join(REPORT_FILE);
    std::fs::write(&path, out)?;
    println!("Incremental report saved: {}", path.display());
    Ok(path)
}

fn push_year_distribution(out: &mut String, counts: &BTreeMap<i32, usize>) {
    out.push_str("\nYear Distribution (Based on Actual Saved Files):\n");
    out.push_str(RULE_LIGHT);
    out.push('\n');
    for (year, count) in counts {
        out.push_str(&format!("{}: {} files\n", year, count));
    }
}

fn push_header(out: &mut String, field: &str, year_count: usize) {
    out.push_str(&format!(
        "{} Field Continuous {}-Year Author Abstract Collection Report\n",
        field, year_count
    ));
    out.push_str(RULE_HEAVY);
    out.push_str("\n\n");
    out.push_str(&format!(
        "Collection Time: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
}
