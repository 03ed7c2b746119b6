//! Semantic Scholar Graph API client and data model.
//!
//! Three read-only endpoints are consumed: author search by name, paper
//! search by free-text query, and author papers lookup by id. Author search
//! and author papers are cached on disk (read-through before any network
//! call, write-through after a successful non-empty one); paper search has
//! no stable cache identity and always goes to the network.
//!
//! API Details:
//! - Base: https://api.semanticscholar.org/graph/v1
//! - Rate limit: ~1 req/s unauthenticated, higher with an API key
//! - API key sent as `x-api-key` header

use crate::cache::{self, FileCache};
use crate::error::{CollectorError, Result};
use crate::fields::FieldProfile;
use crate::filters;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Semantic Scholar API base URL
const SS_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Minimum interval between outbound requests (slightly over 1s to stay
/// under the public rate limit)
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1200);

/// Cooldown after a 429 response
const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(5);

/// Fields requested for author-papers lookups
const PAPER_FIELDS: &str = "paperId,title,abstract,authors,year,venue,citationCount";

/// Fields requested for paper searches (discovery only needs authorship)
const SEARCH_FIELDS: &str = "paperId,title,authors,year,citationCount";

/// One author entry on a paper. `authorId` may be null in API payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperAuthor {
    #[serde(rename = "authorId")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// A paper as returned by the API, with the year normalized to an integer
/// at the serde boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    #[serde(rename = "paperId", default)]
    pub paper_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    /// Publication year. The source delivers this as either a JSON number
    /// or a string; values that parse to neither become `None`.
    #[serde(default, deserialize_with = "year_from_int_or_string")]
    pub year: Option<i32>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub authors: Vec<PaperAuthor>,
    #[serde(rename = "citationCount", default, deserialize_with = "count_or_zero")]
    pub citation_count: i64,
}

impl Paper {
    /// Whether the paper carries a usable (non-empty) abstract.
    pub fn has_abstract(&self) -> bool {
        self.abstract_text
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty())
    }
}

/// An author surfaced by discovery, identified by the API's opaque id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAuthor {
    #[serde(rename = "authorId")]
    pub author_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Num(i64),
    Text(String),
}

fn year_from_int_or_string<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawYear>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| match r {
        RawYear::Num(n) => i32::try_from(n).ok(),
        RawYear::Text(s) => s.trim().parse::<i32>().ok(),
    }))
}

fn count_or_zero<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    #[serde(rename = "authorId")]
    author_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Semantic Scholar API client with disk caching and rate limiting.
pub struct SemanticScholarClient {
    client: reqwest::Client,
    api_key: Option<String>,
    cache: FileCache,
    last_request: Mutex<Option<Instant>>,
}

impl SemanticScholarClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Optional Semantic Scholar API key for a higher quota
    /// * `cache` - Disk cache for author-search and author-papers responses
    pub fn new(api_key: Option<String>, cache: FileCache) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CollectorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        if api_key.is_some() {
            info!("Using API key for enhanced request quota");
        }

        Ok(Self {
            client,
            api_key,
            cache,
            last_request: Mutex::new(None),
        })
    }

    /// Search authors by name.
    ///
    /// Hits pass the real-author-name filter before being returned; only a
    /// non-empty filtered result is cached.
    pub async fn search_authors(&self, name: &str) -> Vec<CandidateAuthor> {
        let key = cache::author_key(name);
        if let Some(hit) = self.cache.load::<Vec<CandidateAuthor>>("author_search", &key) {
            debug!(author = name, "Using cached author search result");
            return hit;
        }

        let url = format!("{}/author/search", SS_API_BASE);
        let params = [
            ("query", name.to_string()),
            ("fields", "authorId,name".to_string()),
            ("limit", "3".to_string()),
        ];

        let rows: Vec<RawAuthor> = match self.get_data(&url, &params).await {
            Some(rows) => rows,
            None => return Vec::new(),
        };

        let valid: Vec<CandidateAuthor> = rows
            .into_iter()
            .filter_map(|raw| {
                let author_id = raw.author_id?;
                let name = raw.name.unwrap_or_default().trim().to_string();
                filters::is_real_author_name(&name)
                    .then_some(CandidateAuthor { author_id, name })
            })
            .collect();

        if !valid.is_empty() {
            self.cache.save("author_search", &key, &valid);
        }

        valid
    }

    /// Search papers by free-text query.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search query
    /// * `year` - Optional year or year-range string (e.g. "2020-2024")
    /// * `limit` - Maximum results
    /// * `sort` - Optional sort key (e.g. "citationCount:desc")
    pub async fn search_papers(
        &self,
        query: &str,
        year: Option<&str>,
        limit: usize,
        sort: Option<&str>,
    ) -> Vec<Paper> {
        let url = format!("{}/paper/search", SS_API_BASE);
        let mut params = vec![
            ("query", query.to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        if let Some(sort) = sort {
            params.push(("sort", sort.to_string()));
        }

        self.get_data(&url, &params).await.unwrap_or_default()
    }

    /// Fetch an author's papers restricted to the required years, with the
    /// full filter chain applied: year, field, top venue, authorship.
    ///
    /// The filtered set is cached; an empty set is not (a transient failure
    /// must stay retryable on a later run).
    pub async fn fetch_author_papers(
        &self,
        author_id: &str,
        years: &[i32],
        profile: &FieldProfile,
    ) -> Vec<Paper> {
        let key = cache::papers_key(author_id, years);
        if let Some(hit) = self.cache.load::<Vec<Paper>>("author_papers", &key) {
            debug!(author_id, "Using cached papers");
            return hit;
        }

        let url = format!("{}/author/{}/papers", SS_API_BASE, author_id);
        let params = [
            ("fields", PAPER_FIELDS.to_string()),
            ("limit", "1000".to_string()),
        ];

        let papers: Vec<Paper> = match self.get_data(&url, &params).await {
            Some(rows) => rows,
            None => return Vec::new(),
        };
        debug!(author_id, total = papers.len(), "Fetched papers");

        let year_filtered: Vec<Paper> = papers
            .into_iter()
            .filter(|p| p.year.is_some_and(|y| years.contains(&y)))
            .collect();
        debug!(author_id, count = year_filtered.len(), "After year filter");

        let field_filtered: Vec<Paper> = year_filtered
            .into_iter()
            .filter(|p| filters::is_field_paper(p, profile.keywords))
            .collect();
        debug!(author_id, count = field_filtered.len(), "After field filter");

        let venue_filtered: Vec<Paper> = field_filtered
            .into_iter()
            .filter(|p| filters::is_top_venue_paper(p, profile.top_venues))
            .collect();
        debug!(author_id, count = venue_filtered.len(), "After top venue filter");

        let author_papers: Vec<Paper> = venue_filtered
            .into_iter()
            .filter(|p| filters::is_author_on_paper(p, author_id))
            .collect();
        debug!(author_id, count = author_papers.len(), "After authorship filter");

        if !author_papers.is_empty() {
            self.cache.save("author_papers", &key, &author_papers);
        }

        author_papers
    }

    /// Issue one GET and extract the response's `data` array, parsing rows
    /// individually so one malformed row cannot poison the batch.
    ///
    /// Returns `None` on any transport, status, or body-level failure; the
    /// caller treats that as an empty result. A rate-limit response costs a
    /// fixed cooldown and is not re-issued here.
    async fn get_data<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Option<Vec<T>> {
        match self.do_request(url, params).await {
            Ok(body) => Some(parse_rows(&body)),
            Err(CollectorError::RateLimited(_)) => {
                warn!(url, "Rate limited, cooling down");
                tokio::time::sleep(RATE_LIMIT_COOLDOWN).await;
                None
            }
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                None
            }
        }
    }

    /// Internal request implementation
    async fn do_request(&self, url: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        self.wait_for_rate_limit().await;

        let mut request = self.client.get(url).query(params);
        if let Some(ref key) = self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CollectorError::RateLimited(
                RATE_LIMIT_COOLDOWN.as_secs(),
            ));
        }
        if !status.is_success() {
            return Err(CollectorError::Api {
                code: status.as_u16() as i32,
                message: format!("Semantic Scholar API error: {}", status),
            });
        }

        Ok(response.json().await?)
    }

    /// Wait until at least the minimum interval has passed since the last
    /// outbound request.
    async fn wait_for_rate_limit(&self) {
        let should_wait = {
            let last = self.last_request.lock().ok();
            last.and_then(|l| *l)
                .map(|t| t.elapsed() < MIN_REQUEST_INTERVAL)
        };

        if should_wait == Some(true) {
            tokio::time::sleep(MIN_REQUEST_INTERVAL).await;
        }

        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(Instant::now());
        }
    }
}

/// Extract `data` rows from a response body, skipping rows that fail to
/// parse. A missing or non-array `data` field yields no rows.
fn parse_rows<T: serde::de::DeserializeOwned>(body: &serde_json::Value) -> Vec<T> {
    let rows = match body.get("data").and_then(|d| d.as_array()) {
        Some(rows) => rows,
        None => {
            debug!("Response has no data array");
            return Vec::new();
        }
    };

    rows.iter()
        .filter_map(|row| match serde_json::from_value(row.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_year_parses_from_integer() {
        let paper: Paper = serde_json::from_value(json!({
            "paperId": "p1", "title": "T", "year": 2021
        }))
        .expect("valid paper");
        assert_eq!(paper.year, Some(2021));
    }

    #[test]
    fn test_year_parses_from_string() {
        let paper: Paper = serde_json::from_value(json!({
            "paperId": "p1", "title": "T", "year": "2022"
        }))
        .expect("valid paper");
        assert_eq!(paper.year, Some(2022));
    }

    #[test]
    fn test_unparseable_year_becomes_none() {
        let paper: Paper = serde_json::from_value(json!({
            "paperId": "p1", "title": "T", "year": "circa 2020"
        }))
        .expect("valid paper");
        assert_eq!(paper.year, None);

        let paper: Paper = serde_json::from_value(json!({
            "paperId": "p1", "title": "T", "year": null
        }))
        .expect("valid paper");
        assert_eq!(paper.year, None);
    }

    #[test]
    fn test_null_citation_count_is_zero() {
        let paper: Paper = serde_json::from_value(json!({
            "paperId": "p1", "title": "T", "citationCount": null
        }))
        .expect("valid paper");
        assert_eq!(paper.citation_count, 0);
    }

    #[test]
    fn test_has_abstract_rejects_blank() {
        let with: Paper = serde_json::from_value(json!({
            "paperId": "p1", "abstract": "Some text"
        }))
        .expect("valid paper");
        let blank: Paper = serde_json::from_value(json!({
            "paperId": "p2", "abstract": "   "
        }))
        .expect("valid paper");
        let absent: Paper =
            serde_json::from_value(json!({ "paperId": "p3" })).expect("valid paper");

        assert!(with.has_abstract());
        assert!(!blank.has_abstract());
        assert!(!absent.has_abstract());
    }

    #[test]
    fn test_parse_rows_skips_malformed() {
        let body = json!({
            "data": [
                { "authorId": "1", "name": "Ada Lovelace" },
                "not an object",
                { "authorId": null, "name": "Orphan Row" }
            ]
        });
        let rows: Vec<RawAuthor> = parse_rows(&body);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_rows_missing_data() {
        let rows: Vec<RawAuthor> = parse_rows(&json!({ "message": "oops" }));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_paper_round_trips_through_cache_shape() {
        let paper: Paper = serde_json::from_value(json!({
            "paperId": "p1",
            "title": "T",
            "abstract": "A",
            "year": "2020",
            "venue": "NeurIPS",
            "authors": [{ "authorId": "a1", "name": "Ada Lovelace" }],
            "citationCount": 7
        }))
        .expect("valid paper");

        let serialized = serde_json::to_value(&paper).expect("serializable");
        let restored: Paper = serde_json::from_value(serialized).expect("round trip");
        assert_eq!(restored.year, Some(2020));
        assert_eq!(restored.citation_count, 7);
        assert_eq!(restored.abstract_text.as_deref(), Some("A"));
    }
}
