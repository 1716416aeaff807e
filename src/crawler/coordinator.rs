//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Claiming URLs from the frontier under the page budget
//! - Fetching and parsing pages on a bounded set of tasks
//! - Feeding extracted courses into the inverted index
//! - Queueing newly discovered links

use crate::catalog::CourseExtractor;
use crate::config::{validate, Config};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{parse_page, ParsedPage};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::index::{CodeIdMap, IndexBuilder, IndexOutcome, InvertedIndex, MissPolicy};
use crate::output::CrawlStatistics;
use crate::state::{CrawlState, PageState};
use crate::CrawlError;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The final word-to-course index
    pub index: InvertedIndex,

    /// Counters gathered during the crawl
    pub stats: CrawlStatistics,

    /// URLs claimed from the frontier, in claim order
    pub visited: Vec<String>,
}

/// Outcome of fetching and parsing one URL
#[derive(Debug)]
struct PageResult {
    url: String,
    outcome: Result<ParsedPage, FetchResult>,
}

/// Main crawler coordinator structure
///
/// The coordinator owns the frontier and the index. Fetch and parse run on
/// spawned tasks; their results come back to the coordinator, which is the
/// only writer of the index and the frontier.
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    extractor: Arc<CourseExtractor>,
    frontier: Frontier,
    builder: IndexBuilder,
    index: InvertedIndex,
    state: CrawlState,
    stats: CrawlStatistics,
    visited: Vec<String>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// The frontier is seeded with the configured start URL and the index
    /// starts empty.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `course_map` - Course code to course ID mapping, fixed for the run
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config, course_map: CodeIdMap) -> Result<Self, CrawlError> {
        validate(&config)?;

        let extractor = CourseExtractor::new(&config.crawler.code_pattern)?;
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;

        tracing::info!(
            "Seeding frontier with {} (limiting domain: {})",
            config.crawler.start_url,
            config.crawler.limiting_domain
        );
        let frontier = Frontier::new(&config.crawler.start_url);

        Ok(Self {
            config: Arc::new(config),
            client,
            extractor: Arc::new(extractor),
            frontier,
            builder: IndexBuilder::new(course_map, MissPolicy::default()),
            index: InvertedIndex::new(),
            state: CrawlState::Idle,
            stats: CrawlStatistics::default(),
            visited: Vec::new(),
        })
    }

    /// Sets how course codes missing from the course map are handled
    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        let map = self.builder.course_map().clone();
        self.builder = IndexBuilder::new(map, policy);
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the main crawl loop
    ///
    /// While the frontier is non-empty and fewer than `max-pages` URLs have
    /// been claimed, URLs are claimed in FIFO order and processed. A page that
    /// fails to fetch is recorded and skipped; only a strict-mode course map
    /// miss aborts the run.
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlError> {
        self.transition(CrawlState::Running)?;

        let budget = self.config.crawler.max_pages as usize;
        let workers = self.config.crawler.max_concurrent_pages_open as usize;
        let start_time = Instant::now();
        let mut in_flight: JoinSet<PageResult> = JoinSet::new();

        tracing::info!(
            "Starting crawl: budget {} pages, {} concurrent",
            budget,
            workers
        );

        loop {
            // The budget is checked before each claim, never after completion
            while in_flight.len() < workers && self.frontier.visited_count() < budget {
                let Some(url) = self.frontier.claim_next() else {
                    break;
                };
                tracing::debug!("Processing URL: {}", url);
                self.visited.push(url.clone());
                in_flight.spawn(fetch_and_parse(
                    self.client.clone(),
                    url,
                    self.config.crawler.limiting_domain.clone(),
                    Arc::clone(&self.extractor),
                ));
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok(result) => self.merge(result)?,
                Err(e) => {
                    tracing::warn!("Page task ended abnormally: {}", e);
                    self.stats.record_page(PageState::Failed);
                }
            }

            if self.stats.pages_visited % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = self.stats.pages_visited as f64 / elapsed.as_secs_f64();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} words indexed, {:.2} pages/sec",
                    self.stats.pages_visited,
                    self.frontier.len(),
                    self.index.len(),
                    rate
                );
            }
        }

        if self.frontier.is_empty() {
            tracing::info!("Frontier is empty, crawl complete");
        } else {
            tracing::info!(
                "Page budget of {} reached with {} URLs left in frontier",
                budget,
                self.frontier.len()
            );
        }

        self.transition(CrawlState::Done)?;

        self.stats.unmapped_codes = self.builder.unmapped_codes() as u64;
        self.stats.words = self.index.len() as u64;
        self.stats.associations = self.index.association_count() as u64;

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}, {} words indexed",
            self.stats.pages_visited,
            start_time.elapsed(),
            self.stats.words
        );

        Ok(CrawlReport {
            index: std::mem::take(&mut self.index),
            stats: self.stats.clone(),
            visited: std::mem::take(&mut self.visited),
        })
    }

    /// Folds one page result into the index and the frontier
    fn merge(&mut self, result: PageResult) -> Result<(), CrawlError> {
        let PageResult { url, outcome } = result;

        let parsed = match outcome {
            Ok(parsed) => parsed,
            Err(failure) => {
                let state = failure.failure_state().unwrap_or(PageState::Failed);
                tracing::debug!("Skipping {} ({}): {:?}", url, state, failure);
                self.stats.record_page(state);
                return Ok(());
            }
        };

        if parsed.courses.is_empty() {
            tracing::debug!("No course blocks on {}", url);
            self.stats.pages_without_courses += 1;
        }

        for record in parsed.courses.records() {
            match self
                .builder
                .index_course(&record.code, &record.text, &mut self.index)?
            {
                IndexOutcome::Indexed { .. } => self.stats.course_blobs += 1,
                IndexOutcome::Unmapped => self.stats.unmapped_blobs += 1,
            }
        }

        let queued = parsed
            .links
            .iter()
            .filter(|link| self.frontier.push(link))
            .count();

        tracing::debug!(
            "Processed {} ({}): {} courses, {} new links",
            url,
            parsed.title.as_deref().unwrap_or("untitled"),
            parsed.courses.len(),
            queued
        );

        self.stats.links_queued += queued as u64;
        self.stats.record_page(PageState::Processed);
        Ok(())
    }

    fn transition(&mut self, to: CrawlState) -> Result<(), CrawlError> {
        if !self.state.can_transition_to(to) {
            return Err(CrawlError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::debug!("Crawl state: {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }
}

/// Fetches one URL and parses it when the fetch succeeded
///
/// Links are resolved against the final URL after redirects.
async fn fetch_and_parse(
    client: Client,
    url: String,
    limiting_domain: String,
    extractor: Arc<CourseExtractor>,
) -> PageResult {
    let outcome = match fetch_url(&client, &url).await {
        FetchResult::Success {
            final_url, body, ..
        } => Ok(parse_page(&body, &final_url, &limiting_domain, &extractor)),
        failure => Err(failure),
    };
    PageResult { url, outcome }
}

/// Runs a complete crawl with the given configuration and course map
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::load_config;
/// use catalog_crawler::crawler::run_crawl;
/// use catalog_crawler::index::CodeIdMap;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawler.toml"))?;
/// let map = CodeIdMap::load(Path::new(&config.output.course_map_path))?;
/// let report = run_crawl(config, map).await?;
/// println!("{} words indexed", report.index.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, course_map: CodeIdMap) -> Result<CrawlReport, CrawlError> {
    let mut coordinator = Coordinator::new(config, course_map)?;
    coordinator.run().await
}
