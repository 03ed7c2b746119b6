//! Field configuration tables.
//!
//! Keyword, top-venue, and search-query tables for each supported research
//! field, plus the scholar-list file loader. These are lookup tables, not
//! tunable behavior: the collection pipeline treats them as opaque data.

use std::path::Path;
use tracing::{info, warn};

/// Name fragments that mark a "name" as an institution or job title
/// rather than a person. Matched case-insensitively as substrings.
pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "department",
    "institute",
    "university",
    "college",
    "school",
    "center",
    "centre",
    "laboratory",
    "lab",
    "faculty",
    "dept",
    "machine learning",
    "artificial intelligence",
    "computer science",
    "b.s.c",
    "m.s.c",
    "m.e",
    "m.tech",
    "ph.d",
    "student",
    "professor",
    "assistant",
    "associate",
    "full",
    "board",
    "corporate",
    "technology",
];

/// Seed scholars used when no scholar list file is available.
const DEFAULT_SCHOLARS: &[&str] = &[
    "Yoshua Bengio",
    "Geoffrey Hinton",
    "Yann LeCun",
    "Andrew Ng",
    "Fei-Fei Li",
    "Jürgen Schmidhuber",
    "Ian Goodfellow",
    "Jeffrey Dean",
    "Peter Norvig",
    "Stuart Russell",
    "Michael Jordan",
];

const CS_KEYWORDS: &[&str] = &[
    "computer science",
    "machine learning",
    "artificial intelligence",
    "deep learning",
    "neural network",
    "algorithm",
    "software engineering",
    "data structure",
    "computational",
    "programming",
    "system",
    "ai",
    "ml",
    "nlp",
    "computer",
    "software",
    "computing",
    "data",
    "information",
    "technology",
    "digital",
    "electronic",
    "cyber",
    "network",
    "database",
    "model",
    "learning",
    "intelligence",
];

const CHEMISTRY_KEYWORDS: &[&str] = &[
    "chemistry",
    "chemical",
    "molecule",
    "compound",
    "synthesis",
    "reaction",
    "catalyst",
    "organic",
    "inorganic",
    "analytical",
    "physical chemistry",
    "biochemistry",
    "materials science",
];

const BIOLOGY_KEYWORDS: &[&str] = &[
    "biology",
    "biological",
    "cell",
    "gene",
    "protein",
    "dna",
    "genetics",
    "molecular biology",
    "cell biology",
    "evolution",
    "ecology",
    "biochemistry",
    "microbiology",
];

const PHYSICS_KEYWORDS: &[&str] = &[
    "physics",
    "physical",
    "quantum",
    "mechanics",
    "thermodynamics",
    "electromagnetism",
    "optics",
    "particle",
    "nuclear",
    "atomic",
    "solid state",
    "condensed matter",
];

const MEDICINE_KEYWORDS: &[&str] = &[
    "medicine",
    "medical",
    "clinical",
    "health",
    "disease",
    "treatment",
    "therapy",
    "diagnosis",
    "patient",
    "drug",
    "pharmaceutical",
    "healthcare",
];

const CS_VENUES: &[&str] = &[
    // AI/ML
    "NeurIPS",
    "ICML",
    "ICLR",
    "AAAI",
    "IJCAI",
    // Computer Vision
    "CVPR",
    "ICCV",
    "ECCV",
    // NLP
    "ACL",
    "EMNLP",
    "NAACL",
    // Database
    "SIGMOD",
    "VLDB",
    "ICDE",
    // Networks
    "SIGCOMM",
    "INFOCOM",
    "NSDI",
    // Software Engineering
    "ICSE",
    "FSE",
    "ASE",
    // Security
    "IEEE S&P",
    "USENIX Security",
    "CCS",
    // HCI
    "CHI",
    "UIST",
    "CSCW",
    // Theory
    "STOC",
    "FOCS",
    "SODA",
    // Systems
    "OSDI",
    "SOSP",
    "ASPLOS",
    // Web
    "WWW",
    "KDD",
    "WSDM",
];

const CHEMISTRY_VENUES: &[&str] = &[
    "Nature",
    "Science",
    "JACS",
    "Angewandte Chemie",
    "Chemical Reviews",
    "Chemical Society Reviews",
    "Nature Chemistry",
    "Nature Materials",
    "Advanced Materials",
    "Chemistry of Materials",
    "Inorganic Chemistry",
    "Organic Letters",
    "Journal of Organic Chemistry",
    "Analytical Chemistry",
    "Journal of Physical Chemistry",
    "Physical Chemistry Chemical Physics",
    "ACS National Meeting",
    "Gordon Research Conferences",
    "International Symposium on Organometallic Chemistry",
];

const BIOLOGY_VENUES: &[&str] = &[
    "Nature",
    "Science",
    "Cell",
    "Nature Methods",
    "Nature Biotechnology",
    "Nature Genetics",
    "Nature Medicine",
    "Nature Immunology",
    "PLOS Biology",
    "Current Biology",
    "Genome Research",
    "Molecular Cell",
    "Developmental Cell",
    "Cell Stem Cell",
    "Immunity",
    "Nature Reviews Immunology",
    "Keystone Symposia",
    "Cold Spring Harbor",
    "Gordon Research Conferences",
    "FASEB",
];

const PHYSICS_VENUES: &[&str] = &[
    "Nature",
    "Science",
    "Physical Review Letters",
    "Physical Review",
    "Nature Physics",
    "Physical Review X",
    "Reviews of Modern Physics",
    "Nature Materials",
    "Advanced Materials",
    "Applied Physics Letters",
    "Journal of Applied Physics",
    "American Physical Society",
    "March Meeting",
    "Gordon Research Conferences",
];

const MEDICINE_VENUES: &[&str] = &[
    "Nature",
    "Science",
    "NEJM",
    "The Lancet",
    "JAMA",
    "Nature Medicine",
    "Cell",
    "Nature Reviews",
    "BMJ",
    "Annals of Internal Medicine",
    "PLOS Medicine",
    "Nature Genetics",
    "Nature Immunology",
    "Nature Cancer",
    "American Medical Association",
    "World Health Organization",
    "American College of Physicians",
];

const CS_QUERIES: &[&str] = &[
    "machine learning",
    "deep learning",
    "neural network",
    "computer vision",
    "natural language processing",
    "artificial intelligence",
    "algorithm",
    "data science",
    "robotics",
    "computer graphics",
];

const CHEMISTRY_QUERIES: &[&str] = &[
    "organic chemistry",
    "inorganic chemistry",
    "analytical chemistry",
    "physical chemistry",
    "biochemistry",
    "materials chemistry",
    "catalysis",
    "synthesis",
    "molecular chemistry",
];

const BIOLOGY_QUERIES: &[&str] = &[
    "molecular biology",
    "cell biology",
    "genetics",
    "evolution",
    "ecology",
    "microbiology",
    "biochemistry",
    "genomics",
    "proteomics",
    "systems biology",
];

const PHYSICS_QUERIES: &[&str] = &[
    "quantum mechanics",
    "thermodynamics",
    "electromagnetism",
    "optics",
    "particle physics",
    "nuclear physics",
    "atomic physics",
    "condensed matter",
    "solid state physics",
];

const MEDICINE_QUERIES: &[&str] = &[
    "clinical medicine",
    "pharmacology",
    "pathology",
    "immunology",
    "oncology",
    "cardiology",
    "neurology",
    "pediatrics",
    "surgery",
    "public health",
];

/// Resolved configuration for one research field.
///
/// `name` is the uppercased field label used in output filenames; the table
/// slices drive the filter chain and discovery queries. Unknown fields keep
/// their label but fall back to the CS tables.
#[derive(Debug, Clone)]
pub struct FieldProfile {
    /// Uppercased field label (appears in output filenames)
    pub name: String,
    /// Keywords marking a paper as belonging to this field
    pub keywords: &'static [&'static str],
    /// Top conference/journal names for the venue filter
    pub top_venues: &'static [&'static str],
    /// Free-text queries for author discovery via paper search
    pub search_queries: &'static [&'static str],
    /// Broad query for the per-year highly-cited search
    pub broad_query: &'static str,
}

impl FieldProfile {
    /// Resolve a field label into its configuration tables.
    pub fn resolve(field: &str) -> Self {
        let name = field.trim().to_uppercase();
        let (keywords, top_venues, search_queries, broad_query) = match name.as_str() {
            "CHEMISTRY" => (
                CHEMISTRY_KEYWORDS,
                CHEMISTRY_VENUES,
                CHEMISTRY_QUERIES,
                "\"chemistry\"",
            ),
            "BIOLOGY" => (BIOLOGY_KEYWORDS, BIOLOGY_VENUES, BIOLOGY_QUERIES, "\"biology\""),
            "PHYSICS" => (PHYSICS_KEYWORDS, PHYSICS_VENUES, PHYSICS_QUERIES, "\"physics\""),
            "MEDICINE" => (
                MEDICINE_KEYWORDS,
                MEDICINE_VENUES,
                MEDICINE_QUERIES,
                "\"medicine\"",
            ),
            _ => (CS_KEYWORDS, CS_VENUES, CS_QUERIES, "\"CS\" OR \"computer science\""),
        };

        Self {
            name,
            keywords,
            top_venues,
            search_queries,
            broad_query,
        }
    }
}

/// Load a scholar list from a file: one name per line, blank lines and
/// `#` comments skipped.
///
/// Returns `None` if the file is missing or unreadable.
pub fn load_scholars(path: &Path) -> Option<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read scholar list file");
            return None;
        }
    };

    let scholars: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    info!(path = %path.display(), count = scholars.len(), "Loaded scholar list");
    Some(scholars)
}

/// Built-in seed list used when no scholar file is available.
pub fn default_scholars() -> Vec<String> {
    DEFAULT_SCHOLARS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_known_field() {
        let profile = FieldProfile::resolve("chemistry");
        assert_eq!(profile.name, "CHEMISTRY");
        assert!(profile.top_venues.contains(&"Nature Chemistry"));
    }

    #[test]
    fn test_resolve_unknown_field_falls_back_to_cs() {
        let profile = FieldProfile::resolve("Mathematics");
        assert_eq!(profile.name, "MATHEMATICS");
        assert!(profile.keywords.contains(&"algorithm"));
    }

    #[test]
    fn test_load_scholars_skips_comments_and_blanks() -> std::io::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "# seed list")?;
        writeln!(file)?;
        writeln!(file, "Yoshua Bengio")?;
        writeln!(file, "  Geoffrey Hinton  ")?;

        let scholars = load_scholars(file.path()).expect("file should load");
        assert_eq!(scholars, vec!["Yoshua Bengio", "Geoffrey Hinton"]);
        Ok(())
    }

    #[test]
    fn test_load_scholars_missing_file() {
        assert!(load_scholars(Path::new("/nonexistent/scholars.txt")).is_none());
    }
}
