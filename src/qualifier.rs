//! Continuity qualification.
//!
//! Per-candidate state machine over an author's already-filtered papers:
//! group by year, pick the most-cited paper per required year, and demand a
//! usable abstract for every year in the window. The first missing year or
//! missing abstract disqualifies immediately; later years are never
//! examined for an already-disqualified candidate.

use crate::semanticscholar::Paper;
use std::collections::HashMap;
use std::fmt;

/// Why a candidate was disqualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisqualifyReason {
    /// No surviving papers at all for the given required year
    NoPapersForYear(i32),
    /// The selected (most-cited) paper for the given year has no abstract
    NoAbstractForYear(i32),
}

impl fmt::Display for DisqualifyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPapersForYear(year) => write!(f, "no eligible papers in {}", year),
            Self::NoAbstractForYear(year) => {
                write!(f, "selected paper for {} lacks an abstract", year)
            }
        }
    }
}

/// Terminal state of the qualification state machine.
#[derive(Debug, Clone)]
pub enum QualifyOutcome {
    /// One selected paper per required year, in year order, each with an
    /// abstract
    Qualified { papers: Vec<Paper> },
    /// Halted at the first failing year
    Disqualified { reason: DisqualifyReason },
}

/// Run the continuity check over an author's filtered papers.
///
/// `required_years` is the fixed window in ascending order. For each year,
/// the paper with the highest citation count is selected (first-encountered
/// wins ties); there is no fallback to a lower-cited paper when the
/// selected one lacks an abstract.
pub fn qualify(papers: &[Paper], required_years: &[i32]) -> QualifyOutcome {
    let mut by_year: HashMap<i32, Vec<&Paper>> = HashMap::new();
    for paper in papers {
        if let Some(year) = paper.year {
            by_year.entry(year).or_default().push(paper);
        }
    }

    let mut selected = Vec::with_capacity(required_years.len());
    for &year in required_years {
        let best = match by_year.get(&year).and_then(|c| select_best(c)) {
            Some(best) => best,
            None => {
                return QualifyOutcome::Disqualified {
                    reason: DisqualifyReason::NoPapersForYear(year),
                }
            }
        };

        if !best.has_abstract() {
            return QualifyOutcome::Disqualified {
                reason: DisqualifyReason::NoAbstractForYear(year),
            };
        }

        selected.push(best.clone());
    }

    QualifyOutcome::Qualified { papers: selected }
}

/// Most-cited paper in the slice; the first encountered wins ties.
fn select_best<'a>(candidates: &[&'a Paper]) -> Option<&'a Paper> {
    let mut best: Option<&'a Paper> = None;
    for &paper in candidates {
        match best {
            Some(current) if paper.citation_count <= current.citation_count => {}
            _ => best = Some(paper),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semanticscholar::PaperAuthor;

    const YEARS: &[i32] = &[2020, 2021, 2022, 2023, 2024];

    fn paper(id: &str, year: i32, citations: i64, abstract_text: Option<&str>) -> Paper {
        Paper {
            paper_id: id.to_string(),
            title: format!("Paper {}", id),
            abstract_text: abstract_text.map(str::to_string),
            year: Some(year),
            venue: "NeurIPS".to_string(),
            authors: vec![PaperAuthor {
                author_id: Some("a1".to_string()),
                name: "Ada Lovelace".to_string(),
            }],
            citation_count: citations,
        }
    }

    #[test]
    fn test_one_paper_per_year_qualifies() {
        // One paper per year, each with an abstract; selection is forced.
        let citations = [5, 3, 8, 1, 9];
        let papers: Vec<Paper> = YEARS
            .iter()
            .zip(citations)
            .map(|(&year, c)| paper(&format!("p{}", year), year, c, Some("An abstract.")))
            .collect();

        match qualify(&papers, YEARS) {
            QualifyOutcome::Qualified { papers: selected } => {
                assert_eq!(selected.len(), 5);
                let ids: Vec<&str> = selected.iter().map(|p| p.paper_id.as_str()).collect();
                assert_eq!(ids, ["p2020", "p2021", "p2022", "p2023", "p2024"]);
            }
            QualifyOutcome::Disqualified { reason } => {
                panic!("expected qualification, got {}", reason)
            }
        }
    }

    #[test]
    fn test_missing_year_disqualifies_with_first_gap() {
        // 2021 and 2022 both missing; the reason names the earliest.
        let papers = vec![
            paper("a", 2020, 1, Some("x")),
            paper("b", 2023, 1, Some("x")),
            paper("c", 2024, 1, Some("x")),
        ];

        match qualify(&papers, YEARS) {
            QualifyOutcome::Disqualified { reason } => {
                assert_eq!(reason, DisqualifyReason::NoPapersForYear(2021));
            }
            QualifyOutcome::Qualified { .. } => panic!("expected disqualification"),
        }
    }

    #[test]
    fn test_missing_abstract_disqualifies_that_year() {
        let mut papers: Vec<Paper> = YEARS
            .iter()
            .map(|&year| paper(&format!("p{}", year), year, 1, Some("x")))
            .collect();
        papers[2].abstract_text = Some("".to_string());

        match qualify(&papers, YEARS) {
            QualifyOutcome::Disqualified { reason } => {
                assert_eq!(reason, DisqualifyReason::NoAbstractForYear(2022));
            }
            QualifyOutcome::Qualified { .. } => panic!("expected disqualification"),
        }
    }

    #[test]
    fn test_highest_citations_selected_even_without_abstract() {
        // The most-cited 2020 paper has no abstract; a lower-cited one with
        // an abstract exists but is never considered.
        let papers = vec![
            paper("top", 2020, 100, None),
            paper("runner_up", 2020, 10, Some("Has an abstract.")),
        ];

        match qualify(&papers, &[2020]) {
            QualifyOutcome::Disqualified { reason } => {
                assert_eq!(reason, DisqualifyReason::NoAbstractForYear(2020));
            }
            QualifyOutcome::Qualified { .. } => panic!("expected disqualification"),
        }
    }

    #[test]
    fn test_citation_tie_keeps_first_encountered() {
        let papers = vec![
            paper("first", 2020, 7, Some("x")),
            paper("second", 2020, 7, Some("x")),
        ];

        match qualify(&papers, &[2020]) {
            QualifyOutcome::Qualified { papers: selected } => {
                assert_eq!(selected[0].paper_id, "first");
            }
            QualifyOutcome::Disqualified { reason } => {
                panic!("expected qualification, got {}", reason)
            }
        }
    }

    #[test]
    fn test_selected_papers_come_back_in_year_order() {
        let papers = vec![
            paper("late", 2024, 1, Some("x")),
            paper("early", 2020, 1, Some("x")),
            paper("mid21", 2021, 1, Some("x")),
            paper("mid22", 2022, 1, Some("x")),
            paper("mid23", 2023, 1, Some("x")),
        ];

        match qualify(&papers, YEARS) {
            QualifyOutcome::Qualified { papers: selected } => {
                let years: Vec<i32> = selected.iter().filter_map(|p| p.year).collect();
                assert_eq!(years, YEARS);
            }
            QualifyOutcome::Disqualified { reason } => {
                panic!("expected qualification, got {}", reason)
            }
        }
    }
}
