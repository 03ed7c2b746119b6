//! Collection orchestration.
//!
//! Drives the whole pipeline: candidate discovery across three strategies,
//! sequential qualification with durable progress snapshots, author-index
//! assignment, abstract file persistence, and the normal/incremental run
//! modes. The output directory is the source of truth for completion
//! state: indices are always re-derived from a directory scan, never from
//! in-memory counters.

use crate::cache::FileCache;
use crate::error::Result;
use crate::fields::{self, FieldProfile};
use crate::filters;
use crate::qualifier::{self, QualifyOutcome};
use crate::report;
use crate::semanticscholar::{CandidateAuthor, Paper, PaperAuthor, SemanticScholarClient};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Durable snapshot of qualified authors, updated after every success
const PROGRESS_FILE: &str = "progress.json";

/// How many candidates discovery aims to pool before qualification
const DISCOVERY_LIMIT: usize = 200;

/// Papers per keyword search during discovery
const KEYWORD_SEARCH_LIMIT: usize = 15;

/// Papers per highly-cited per-year search during discovery
const CITATION_SEARCH_LIMIT: usize = 20;

/// An author that passed the continuity check, with one selected paper per
/// required year in year order. Serialized verbatim into `progress.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualifiedAuthor {
    #[serde(rename = "authorId")]
    pub author_id: String,
    pub name: String,
    pub papers: Vec<Paper>,
}

/// A selected paper tagged with its author's file-group index.
#[derive(Debug, Clone)]
pub struct TaggedPaper {
    pub paper: Paper,
    pub author_name: String,
    pub author_index: usize,
}

/// Runtime parameters for a collection run.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Research field label (selects keyword/venue tables)
    pub field: String,
    /// Output directory for abstract files, cache, progress, and report
    pub output_dir: PathBuf,
    /// Optional Semantic Scholar API key
    pub api_key: Option<String>,
    /// Required publication years, ascending
    pub required_years: Vec<i32>,
    /// Optional scholar list file (defaults to scholars/{FIELD}_scholars.txt)
    pub scholars_file: Option<PathBuf>,
    /// Optional pre-generated qualified-author JSON, bypassing the API
    pub debug_data: Option<PathBuf>,
}

/// The collection orchestrator.
pub struct AbstractCollector {
    profile: FieldProfile,
    client: SemanticScholarClient,
    output_dir: PathBuf,
    required_years: Vec<i32>,
    scholars_file: Option<PathBuf>,
    debug_data: Option<PathBuf>,
}

impl AbstractCollector {
    /// Create a collector. Failing to create the output directory is the
    /// one fatal error of the whole pipeline.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let mut required_years = config.required_years;
        required_years.sort_unstable();
        required_years.dedup();
        if required_years.is_empty() {
            return Err(crate::error::CollectorError::Config(
                "required year window is empty".to_string(),
            ));
        }

        std::fs::create_dir_all(&config.output_dir)?;
        let cache = FileCache::new(config.output_dir.join("cache"))?;
        let client = SemanticScholarClient::new(config.api_key, cache)?;

        Ok(Self {
            profile: FieldProfile::resolve(&config.field),
            client,
            output_dir: config.output_dir,
            required_years,
            scholars_file: config.scholars_file,
            debug_data: config.debug_data,
        })
    }

    /// Field profile in use (uppercased name plus lookup tables).
    pub fn profile(&self) -> &FieldProfile {
        &self.profile
    }

    /// The required year window, ascending.
    pub fn required_years(&self) -> &[i32] {
        &self.required_years
    }

    /// Run the complete collection process.
    ///
    /// With `resume`, a previous progress snapshot is reused and only the
    /// shortfall is searched for; the snapshot may already meet the target.
    pub async fn run(&self, target: usize, resume: bool) -> Result<()> {
        println!(
            "Starting {} field continuous {}-year author abstract collection...",
            self.profile.name,
            self.required_years.len()
        );
        println!(
            "Goal: find up to {} authors, {} abstracts per author (1 from each year {}-{})",
            target,
            self.required_years.len(),
            self.first_year(),
            self.last_year()
        );
        println!(
            "Expected output: up to {} abstract files",
            target * self.required_years.len()
        );

        let mut qualified: Vec<QualifiedAuthor> = Vec::new();
        if resume && self.debug_data.is_none() {
            if let Some(saved) = load_progress(&self.output_dir) {
                println!("Found existing progress: {} authors already found", saved.len());
                qualified = saved;
            }
        }

        if qualified.len() >= target {
            println!(
                "Target already reached! Using existing {} authors",
                qualified.len()
            );
        } else {
            let needed = target - qualified.len();
            if !qualified.is_empty() {
                println!(
                    "Resuming from {} authors, need {} more",
                    qualified.len(),
                    needed
                );
            }
            let fresh = self.acquire_qualified(needed, &qualified).await;
            qualified.extend(fresh);
        }

        if qualified.is_empty() {
            println!("No qualifying continuous authors found");
            return Ok(());
        }

        let tagged = self.extract_abstracts(&qualified);
        self.persist(&tagged);

        if let Err(e) = report::write_full_report(
            &self.output_dir,
            &self.profile.name,
            &self.required_years,
            &qualified,
        ) {
            warn!(error = %e, "Failed to write report");
        }
        Ok(())
    }

    /// Run in incremental mode: derive the complete-author count from the
    /// output directory alone and only fill the shortfall to `target`.
    /// Files of already-complete authors are never touched.
    pub async fn run_incremental(&self, target: usize) -> Result<()> {
        println!("INCREMENTAL MODE: filling missing authors to reach {}", target);

        let existing = self.count_complete_authors();
        println!("Found {} existing complete authors", existing);

        if existing >= target {
            println!("Target already reached! Have {} complete authors", existing);
            return Ok(());
        }

        let missing = target - existing;
        println!("Need to find {} more authors", missing);

        let already = load_progress(&self.output_dir).unwrap_or_default();
        let fresh = self.acquire_qualified(missing, &already).await;

        if fresh.is_empty() {
            println!("No additional qualifying authors found");
            return Ok(());
        }

        let tagged = self.extract_abstracts(&fresh);
        self.persist(&tagged);

        if let Err(e) =
            report::write_incremental_report(&self.output_dir, &self.profile.name, &self.required_years)
        {
            warn!(error = %e, "Failed to write report");
        }
        Ok(())
    }

    async fn acquire_qualified(
        &self,
        needed: usize,
        already: &[QualifiedAuthor],
    ) -> Vec<QualifiedAuthor> {
        match self.debug_data {
            Some(ref path) => self.load_debug_authors(path, needed),
            None => self.find_qualified(needed, already).await,
        }
    }

    /// Discover candidates and qualify them one by one, stopping as soon
    /// as `needed` authors pass. The full qualified list (previous plus
    /// fresh) is snapshotted to disk after every success, so a crash loses
    /// at most the candidate under evaluation.
    async fn find_qualified(
        &self,
        needed: usize,
        already: &[QualifiedAuthor],
    ) -> Vec<QualifiedAuthor> {
        println!(
            "Starting search for {} continuous {}-year authors with complete abstracts...",
            needed,
            self.required_years.len()
        );

        let candidates = self.discover_candidates(DISCOVERY_LIMIT).await;
        let known: HashSet<&str> = already.iter().map(|a| a.author_id.as_str()).collect();
        let mut fresh: Vec<QualifiedAuthor> = Vec::new();

        for (i, candidate) in candidates.iter().enumerate() {
            if fresh.len() >= needed {
                break;
            }
            if known.contains(candidate.author_id.as_str()) {
                continue;
            }

            println!(
                "\n[{}/{}] Checking author: {} (ID: {})",
                i + 1,
                candidates.len(),
                candidate.name,
                candidate.author_id
            );

            let papers = self
                .client
                .fetch_author_papers(&candidate.author_id, &self.required_years, &self.profile)
                .await;
            println!("     Retrieved {} papers after filtering", papers.len());

            match qualifier::qualify(&papers, &self.required_years) {
                QualifyOutcome::Qualified { papers } => {
                    fresh.push(QualifiedAuthor {
                        author_id: candidate.author_id.clone(),
                        name: candidate.name.clone(),
                        papers,
                    });
                    println!("   Qualified author {} of {}", fresh.len(), needed);

                    let snapshot: Vec<&QualifiedAuthor> =
                        already.iter().chain(fresh.iter()).collect();
                    self.save_progress(&snapshot);
                }
                QualifyOutcome::Disqualified { reason } => {
                    println!("   Skipped: {}", reason);
                }
            }
        }

        println!(
            "\nCompleted! Found {} qualified authors with complete {}-year abstracts",
            fresh.len(),
            self.required_years.len()
        );
        fresh
    }

    /// Build the candidate pool from three discovery strategies, de-duplicated
    /// by author id in first-seen order.
    pub async fn discover_candidates(&self, limit: usize) -> Vec<CandidateAuthor> {
        println!("Searching {} field authors...", self.profile.name);

        let mut seen: HashSet<String> = HashSet::new();
        let mut pool: Vec<CandidateAuthor> = Vec::new();

        // Strategy 1: look up known scholars by name
        let scholars = self.load_scholar_names();
        println!("   Searching {} known scholars...", scholars.len());
        for (i, name) in scholars.iter().enumerate() {
            if i % 10 == 0 {
                println!("   Progress: {}/{} - Current: {}", i + 1, scholars.len(), name);
            }
            for author in self.client.search_authors(name).await {
                push_unique(&mut pool, &mut seen, author);
            }
        }

        // Strategy 2: first and second authors from keyword paper searches
        println!(
            "\nSearching active {} field authors through papers...",
            self.profile.name
        );
        let year_range = format!("{}-{}", self.first_year(), self.last_year());
        println!("   Will search {} keywords...", self.profile.search_queries.len());
        for (i, query) in self.profile.search_queries.iter().copied().enumerate() {
            if i % 3 == 0 {
                println!(
                    "   Progress: {}/{} - Search keyword: {}",
                    i + 1,
                    self.profile.search_queries.len(),
                    query
                );
            }
            let papers = self
                .client
                .search_papers(query, Some(&year_range), KEYWORD_SEARCH_LIMIT, None)
                .await;
            let mut found = 0;
            for paper in &papers {
                for author in paper.authors.iter().take(2) {
                    if let Some(candidate) = candidate_from(author) {
                        if push_unique(&mut pool, &mut seen, candidate) {
                            found += 1;
                        }
                    }
                }
            }
            if found > 0 {
                info!(query, found, "New authors from keyword search");
            }
        }

        // Strategy 3: first authors of per-year highly cited searches,
        // entered only while the pool is still short
        if pool.len() < limit {
            println!(
                "\nSearching more {} field authors through highly cited papers...",
                self.profile.name
            );
            for &year in &self.required_years {
                println!("   Searching highly cited papers from {}...", year);
                let papers = self
                    .client
                    .search_papers(
                        self.profile.broad_query,
                        Some(&year.to_string()),
                        CITATION_SEARCH_LIMIT,
                        Some("citationCount:desc"),
                    )
                    .await;
                let mut found = 0;
                for paper in &papers {
                    if let Some(candidate) = paper.authors.first().and_then(candidate_from) {
                        if push_unique(&mut pool, &mut seen, candidate) {
                            found += 1;
                        }
                    }
                }
                if found > 0 {
                    println!(
                        "     Found {} new authors from {} highly cited papers",
                        found, year
                    );
                }
            }
        }

        println!("\nTotal found {} real authors", pool.len());
        pool
    }

    /// Assign file-group indices to qualified authors, continuing after
    /// the highest complete index already on disk, and flatten their
    /// per-year paper selections.
    pub fn extract_abstracts(&self, qualified: &[QualifiedAuthor]) -> Vec<TaggedPaper> {
        println!(
            "Collecting abstracts from {} validated authors...",
            qualified.len()
        );

        let existing = self.count_complete_authors();
        let mut next_index = existing + 1;
        let mut tagged = Vec::new();

        for author in qualified {
            for paper in &author.papers {
                tagged.push(TaggedPaper {
                    paper: paper.clone(),
                    author_name: author.name.clone(),
                    author_index: next_index,
                });
            }
            info!(
                author = %author.name,
                index = next_index,
                papers = author.papers.len(),
                "Assigned author index"
            );
            next_index += 1;
        }

        tagged
    }

    /// Write one abstract file per tagged paper. Papers missing a year or
    /// abstract are skipped with a warning; write failures never abort the
    /// run. Returns the number of files written.
    pub fn persist(&self, tagged: &[TaggedPaper]) -> usize {
        println!("Saving {} abstracts to files...", tagged.len());

        let mut saved = 0;
        for item in tagged {
            let year = match item.paper.year {
                Some(y) => y,
                None => {
                    warn!(paper = %item.paper.paper_id, "Skipping paper without a year");
                    continue;
                }
            };
            let abstract_text = match item
                .paper
                .abstract_text
                .as_deref()
                .filter(|a| !a.trim().is_empty())
            {
                Some(a) => a,
                None => {
                    warn!(paper = %item.paper.paper_id, "Skipping paper without an abstract");
                    continue;
                }
            };

            let filename = output_filename(&self.profile.name, year, item.author_index);
            let content = format!(
                "Author: {}\nTitle: {}\nPaper ID: {}\nYear: {}\nAuthor Index: {}\n\nAbstract:\n{}",
                item.author_name,
                item.paper.title,
                item.paper.paper_id,
                year,
                item.author_index,
                abstract_text
            );

            let path = self.output_dir.join(&filename);
            match std::fs::write(&path, content) {
                Ok(()) => {
                    saved += 1;
                    info!(file = %filename, "Saved abstract");
                }
                Err(e) => warn!(file = %filename, error = %e, "Failed to save file"),
            }
        }

        println!(
            "File saving completed! Saved {} files in {}",
            saved,
            self.output_dir.display()
        );
        saved
    }

    /// Authors whose file group on disk has every required year.
    pub fn count_complete_authors(&self) -> usize {
        complete_author_indices(&self.output_dir, &self.profile.name, &self.required_years).len()
    }

    fn load_scholar_names(&self) -> Vec<String> {
        let path = self.scholars_file.clone().unwrap_or_else(|| {
            PathBuf::from("scholars").join(format!("{}_scholars.txt", self.profile.name))
        });
        match fields::load_scholars(&path) {
            Some(names) if !names.is_empty() => {
                println!("Loaded {} scholars from {}", names.len(), path.display());
                names
            }
            _ => {
                println!("Unable to load scholar list, using default strategy");
                fields::default_scholars()
            }
        }
    }

    fn load_debug_authors(&self, path: &Path, needed: usize) -> Vec<QualifiedAuthor> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read debug data");
                return Vec::new();
            }
        };
        let mut authors: Vec<QualifiedAuthor> = match serde_json::from_str(&content) {
            Ok(a) => a,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse debug data");
                return Vec::new();
            }
        };

        println!(
            "DEBUG MODE: loaded {} pre-generated authors, no API calls needed",
            authors.len()
        );
        authors.truncate(needed);
        authors
    }

    fn save_progress(&self, authors: &[&QualifiedAuthor]) {
        let path = self.output_dir.join(PROGRESS_FILE);
        match serde_json::to_string_pretty(authors) {
            Ok(content) => {
                if let Err(e) = std::fs::write(&path, content) {
                    warn!(path = %path.display(), error = %e, "Failed to save progress");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize progress"),
        }
    }

    fn first_year(&self) -> i32 {
        self.required_years[0]
    }

    fn last_year(&self) -> i32 {
        self.required_years[self.required_years.len() - 1]
    }
}

fn candidate_from(author: &PaperAuthor) -> Option<CandidateAuthor> {
    let author_id = author.author_id.clone()?;
    let name = author.name.trim().to_string();
    filters::is_real_author_name(&name).then_some(CandidateAuthor { author_id, name })
}

fn push_unique(
    pool: &mut Vec<CandidateAuthor>,
    seen: &mut HashSet<String>,
    candidate: CandidateAuthor,
) -> bool {
    if seen.insert(candidate.author_id.clone()) {
        pool.push(candidate);
        true
    } else {
        false
    }
}

/// Abstract filename for a (field, year, author index) triple.
pub fn output_filename(field: &str, year: i32, index: usize) -> String {
    format!("Academic_{}_{}_{:02}.txt", field, year, index)
}

/// Parse an abstract filename into (field, year, author index). Names not
/// matching the convention yield `None` and are ignored by directory scans.
pub fn parse_filename(name: &str) -> Option<(String, i32, usize)> {
    let caps = filename_pattern().captures(name)?;
    let field = caps.get(1)?.as_str().to_string();
    let year = caps.get(2)?.as_str().parse().ok()?;
    let index = caps.get(3)?.as_str().parse().ok()?;
    Some((field, year, index))
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Academic_([A-Za-z]+)_(\d{4})_(\d+)\.txt$").expect("valid filename pattern")
    })
}

/// Author indices that have a file on disk for every required year.
pub fn complete_author_indices(dir: &Path, field: &str, years: &[i32]) -> BTreeSet<usize> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return BTreeSet::new(),
    };

    let mut years_by_index: HashMap<usize, HashSet<i32>> = HashMap::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(n) => n,
            None => continue,
        };
        if let Some((file_field, year, index)) = parse_filename(name) {
            if file_field == field {
                years_by_index.entry(index).or_default().insert(year);
            }
        }
    }

    years_by_index
        .into_iter()
        .filter(|(_, have)| years.iter().all(|y| have.contains(y)))
        .map(|(index, _)| index)
        .collect()
}

/// Load the qualified-author snapshot, treating a missing or unparseable
/// file as no progress.
pub fn load_progress(dir: &Path) -> Option<Vec<QualifiedAuthor>> {
    let path = dir.join(PROGRESS_FILE);
    let content = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(authors) => Some(authors),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load progress, starting fresh");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semanticscholar::PaperAuthor;
    use tempfile::TempDir;

    const YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

    fn collector(dir: &Path) -> AbstractCollector {
        AbstractCollector::new(CollectorConfig {
            field: "CS".to_string(),
            output_dir: dir.to_path_buf(),
            api_key: None,
            required_years: YEARS.to_vec(),
            scholars_file: None,
            debug_data: None,
        })
        .expect("collector should build")
    }

    fn qualified_author(id: &str, name: &str) -> QualifiedAuthor {
        let papers = YEARS
            .iter()
            .map(|&year| Paper {
                paper_id: format!("{}_{}", id, year),
                title: format!("Work of {} in {}", name, year),
                abstract_text: Some(format!("Findings from {}.", year)),
                year: Some(year),
                venue: "NeurIPS".to_string(),
                authors: vec![PaperAuthor {
                    author_id: Some(id.to_string()),
                    name: name.to_string(),
                }],
                citation_count: 1,
            })
            .collect();
        QualifiedAuthor {
            author_id: id.to_string(),
            name: name.to_string(),
            papers,
        }
    }

    fn write_complete_author(dir: &Path, index: usize) {
        for year in YEARS {
            let name = output_filename("CS", year, index);
            std::fs::write(dir.join(name), format!("placeholder {}", year))
                .expect("test file should write");
        }
    }

    #[test]
    fn test_filename_round_trip() {
        let name = output_filename("CS", 2022, 3);
        assert_eq!(name, "Academic_CS_2022_03.txt");
        assert_eq!(parse_filename(&name), Some(("CS".to_string(), 2022, 3)));
    }

    #[test]
    fn test_parse_filename_ignores_non_matching() {
        assert_eq!(parse_filename("collection_report.txt"), None);
        assert_eq!(parse_filename("Academic_CS_2022.txt"), None);
        assert_eq!(parse_filename("Academic_CS_20x2_01.txt"), None);
        assert_eq!(parse_filename("Academic_CS_2022_01.json"), None);
    }

    #[test]
    fn test_parse_filename_unpads_index() {
        assert_eq!(
            parse_filename("Academic_CS_2022_03.txt"),
            Some(("CS".to_string(), 2022, 3))
        );
        assert_eq!(
            parse_filename("Academic_CS_2022_117.txt"),
            Some(("CS".to_string(), 2022, 117))
        );
    }

    #[test]
    fn test_complete_author_indices_requires_all_years() {
        let dir = TempDir::new().expect("temp dir");
        write_complete_author(dir.path(), 1);
        // Index 2 is missing 2023
        for year in [2020, 2021, 2022, 2024] {
            let name = output_filename("CS", year, 2);
            std::fs::write(dir.path().join(name), "x").expect("test file should write");
        }
        // Unrelated files are ignored
        std::fs::write(dir.path().join("collection_report.txt"), "x").expect("write");
        std::fs::write(dir.path().join("Academic_BIOLOGY_2020_09.txt"), "x").expect("write");

        let indices = complete_author_indices(dir.path(), "CS", &YEARS);
        assert_eq!(indices.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_complete_author_indices_missing_dir() {
        let indices = complete_author_indices(Path::new("/nonexistent/output"), "CS", &YEARS);
        assert!(indices.is_empty());
    }

    #[test]
    fn test_persist_writes_one_file_per_year() {
        let dir = TempDir::new().expect("temp dir");
        let collector = collector(dir.path());

        let author = qualified_author("a1", "Ada Lovelace");
        let tagged = collector.extract_abstracts(std::slice::from_ref(&author));
        assert_eq!(tagged.len(), 5);
        assert!(tagged.iter().all(|t| t.author_index == 1));

        let saved = collector.persist(&tagged);
        assert_eq!(saved, 5);

        for year in YEARS {
            let path = dir.path().join(output_filename("CS", year, 1));
            let content = std::fs::read_to_string(&path).expect("file should exist");
            assert!(content.starts_with("Author: Ada Lovelace\n"));
            assert!(content.contains(&format!("Year: {}", year)));
            assert!(content.contains("Author Index: 1"));
            assert!(content.contains("\n\nAbstract:\n"));
        }
    }

    #[test]
    fn test_persist_skips_paper_without_abstract() {
        let dir = TempDir::new().expect("temp dir");
        let collector = collector(dir.path());

        let mut author = qualified_author("a1", "Ada Lovelace");
        author.papers[2].abstract_text = None;
        let tagged = collector.extract_abstracts(std::slice::from_ref(&author));

        let saved = collector.persist(&tagged);
        assert_eq!(saved, 4);
        assert!(!dir.path().join(output_filename("CS", 2022, 1)).exists());
    }

    #[test]
    fn test_incremental_indices_continue_after_existing() {
        let dir = TempDir::new().expect("temp dir");
        write_complete_author(dir.path(), 1);
        write_complete_author(dir.path(), 2);
        let before: Vec<String> = YEARS
            .iter()
            .map(|&y| {
                std::fs::read_to_string(dir.path().join(output_filename("CS", y, 1)))
                    .expect("file should exist")
            })
            .collect();

        let collector = collector(dir.path());
        assert_eq!(collector.count_complete_authors(), 2);

        let fresh = vec![
            qualified_author("a3", "Grace Hopper"),
            qualified_author("a4", "Alan Turing"),
        ];
        let tagged = collector.extract_abstracts(&fresh);
        let indices: BTreeSet<usize> = tagged.iter().map(|t| t.author_index).collect();
        assert_eq!(indices.into_iter().collect::<Vec<_>>(), vec![3, 4]);

        collector.persist(&tagged);
        assert_eq!(collector.count_complete_authors(), 4);

        // Pre-existing author files are untouched
        for (i, &year) in YEARS.iter().enumerate() {
            let after = std::fs::read_to_string(dir.path().join(output_filename("CS", year, 1)))
                .expect("file should exist");
            assert_eq!(after, before[i]);
        }
    }

    #[test]
    fn test_progress_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let collector = collector(dir.path());

        let author = qualified_author("a1", "Ada Lovelace");
        collector.save_progress(&[&author]);

        let loaded = load_progress(dir.path()).expect("progress should load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].author_id, "a1");
        assert_eq!(loaded[0].papers.len(), 5);
    }

    #[test]
    fn test_load_progress_corrupt_file() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join(PROGRESS_FILE), "{broken").expect("write");
        assert!(load_progress(dir.path()).is_none());
    }

    #[test]
    fn test_load_debug_authors_truncates_to_needed() {
        let dir = TempDir::new().expect("temp dir");
        let collector = collector(dir.path());

        let authors = vec![
            qualified_author("a1", "Ada Lovelace"),
            qualified_author("a2", "Grace Hopper"),
            qualified_author("a3", "Alan Turing"),
        ];
        let path = dir.path().join("debug_authors.json");
        std::fs::write(
            &path,
            serde_json::to_string(&authors).expect("serializable"),
        )
        .expect("write");

        let loaded = collector.load_debug_authors(&path, 2);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].author_id, "a2");
    }
}
