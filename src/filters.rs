//! Candidate filter chain.
//!
//! Pure, stateless predicates over already-fetched data. The client applies
//! them in a fixed order (year, field, venue, authorship); each stage only
//! narrows the set, so the order matters for logging but not for the final
//! result.

use crate::fields::INSTITUTION_KEYWORDS;
use crate::semanticscholar::Paper;

/// Maximum plausible length for a person's name; longer strings are
/// almost always institutions.
const MAX_NAME_LEN: usize = 50;

/// Whether a search hit looks like a real person rather than an
/// institution, project, or job title.
pub fn is_real_author_name(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }

    let name_lower = name.to_lowercase();
    for keyword in INSTITUTION_KEYWORDS {
        if name_lower.contains(keyword) {
            return false;
        }
    }

    // Real names have at least a given and a family part
    if name.split_whitespace().count() < 2 {
        return false;
    }

    name.len() <= MAX_NAME_LEN
}

/// Whether a paper belongs to the field, judged by keyword presence in
/// title, abstract, and venue.
pub fn is_field_paper(paper: &Paper, keywords: &[&str]) -> bool {
    let haystack = format!(
        "{} {} {}",
        paper.title,
        paper.abstract_text.as_deref().unwrap_or(""),
        paper.venue
    )
    .to_lowercase();

    keywords.iter().any(|kw| haystack.contains(&kw.to_lowercase()))
}

/// Whether a paper's venue matches one of the configured top venues.
pub fn is_top_venue_paper(paper: &Paper, top_venues: &[&str]) -> bool {
    let venue_lower = paper.venue.to_lowercase();
    top_venues
        .iter()
        .any(|venue| venue_lower.contains(&venue.to_lowercase()))
}

/// Whether the given author appears on the paper, in any position.
pub fn is_author_on_paper(paper: &Paper, author_id: &str) -> bool {
    paper
        .authors
        .iter()
        .any(|a| a.author_id.as_deref() == Some(author_id))
}
