//! Category fetch pipeline.
//!
//! Fills the board by drawing random category ids and requesting them one
//! at a time from a [`CategorySource`]. A failed request is logged and
//! replaced by a fresh draw; it never counts toward the target.
//!
//! Requests are strictly sequential: the next one is only issued after the
//! previous one resolved.

use crate::shuffle::shuffle;
use async_trait::async_trait;
use jservice::{CategoryPayload, CluePayload, JService};
use rand::Rng;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Number of categories on a full board.
pub const DEFAULT_CATEGORIES: usize = 5;

/// Number of clues kept per category.
pub const DEFAULT_CLUES_PER_CATEGORY: usize = 5;

/// Highest category id the public API serves.
pub const DEFAULT_MAX_CATEGORY_ID: u64 = 18418;

/// A single failed request, as seen by the pipeline.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<jservice::Error> for SourceError {
    fn from(err: jservice::Error) -> Self {
        match err {
            jservice::Error::Network(msg) | jservice::Error::Config(msg) => {
                SourceError::Transport(msg)
            }
            jservice::Error::Api { status, .. } => SourceError::Status(status),
            jservice::Error::Parse(msg) => SourceError::Malformed(msg),
        }
    }
}

/// Terminal failure of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("gave up after {failures} failed requests ({loaded} categories loaded)")]
    Exhausted { loaded: usize, failures: u32 },
}

/// Somewhere categories can be fetched from by id.
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn fetch_category(&self, id: u64) -> Result<CategoryPayload, SourceError>;
}

#[async_trait]
impl CategorySource for JService {
    async fn fetch_category(&self, id: u64) -> Result<CategoryPayload, SourceError> {
        JService::fetch_category(self, id).await.map_err(SourceError::from)
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Categories to load before stopping.
    pub categories: usize,

    /// Clues kept from each category (fewer if the category is short).
    pub clues_per_category: usize,

    /// Ids are drawn uniformly from `1..=max_category_id`.
    pub max_category_id: u64,

    /// Give up after this many failed requests. `None` retries forever.
    pub max_failures: Option<u32>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES,
            clues_per_category: DEFAULT_CLUES_PER_CATEGORY,
            max_category_id: DEFAULT_MAX_CATEGORY_ID,
            max_failures: None,
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: usize) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_clues_per_category(mut self, clues: usize) -> Self {
        self.clues_per_category = clues;
        self
    }

    /// Set the highest id to draw. Values below 1 are raised to 1.
    pub fn with_max_category_id(mut self, max: u64) -> Self {
        self.max_category_id = max.max(1);
        self
    }

    pub fn with_max_failures(mut self, max_failures: Option<u32>) -> Self {
        self.max_failures = max_failures;
        self
    }
}

/// A category that passed the pipeline: shuffled and cut to size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedCategory {
    pub external_id: u64,
    pub title: String,
    pub clues: Vec<CluePayload>,
}

/// Sequential category loader.
pub struct FetchPipeline<S, R> {
    source: S,
    rng: R,
    config: FetchConfig,
    loaded: usize,
    failures: u32,
}

impl<S: CategorySource, R: Rng> FetchPipeline<S, R> {
    pub fn new(source: S, rng: R, config: FetchConfig) -> Self {
        Self {
            source,
            rng,
            config,
            loaded: 0,
            failures: 0,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Categories loaded so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Failed requests so far.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Whether the configured number of categories has been loaded.
    pub fn is_complete(&self) -> bool {
        self.loaded >= self.config.categories
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Keep drawing ids until one request succeeds.
    pub async fn next_category(&mut self) -> Result<FetchedCategory, FetchError> {
        loop {
            let id = self
                .rng
                .gen_range(1..=self.config.max_category_id.max(1));
            debug!(category_id = id, "fetching category");

            match self.source.fetch_category(id).await {
                Ok(payload) => {
                    let fetched = self.prepare(payload);
                    self.loaded += 1;
                    info!(
                        category_id = fetched.external_id,
                        title = %fetched.title,
                        clues = fetched.clues.len(),
                        loaded = self.loaded,
                        "category loaded"
                    );
                    return Ok(fetched);
                }
                Err(e) => {
                    self.failures += 1;
                    warn!(category_id = id, error = %e, failures = self.failures, "category fetch failed");

                    if let Some(max) = self.config.max_failures {
                        if self.failures >= max {
                            return Err(FetchError::Exhausted {
                                loaded: self.loaded,
                                failures: self.failures,
                            });
                        }
                    }
                }
            }
        }
    }

    /// Load categories until the target is reached, handing each to `on_category`.
    ///
    /// Returns the number of categories loaded by the pipeline in total.
    pub async fn run<F>(&mut self, mut on_category: F) -> Result<usize, FetchError>
    where
        F: FnMut(FetchedCategory),
    {
        while !self.is_complete() {
            let category = self.next_category().await?;
            on_category(category);
        }
        Ok(self.loaded)
    }

    fn prepare(&mut self, payload: CategoryPayload) -> FetchedCategory {
        let CategoryPayload { id, title, mut clues } = payload;
        shuffle(&mut clues, &mut self.rng);
        clues.truncate(self.config.clues_per_category);
        FetchedCategory {
            external_id: id,
            title,
            clues,
        }
    }
}

/// Progress reported by a background fetch worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Category(FetchedCategory),
    Finished { loaded: usize },
    Failed(FetchError),
}

/// Run a pipeline on a tokio task, streaming its progress.
///
/// The worker stops early if the receiver is dropped.
pub fn spawn_fetch_worker<S, R>(mut pipeline: FetchPipeline<S, R>) -> mpsc::Receiver<FetchEvent>
where
    S: CategorySource + 'static,
    R: Rng + Send + 'static,
{
    let (tx, rx) = mpsc::channel(pipeline.config().categories.max(1));

    tokio::spawn(async move {
        while !pipeline.is_complete() {
            match pipeline.next_category().await {
                Ok(category) => {
                    if tx.send(FetchEvent::Category(category)).await.is_err() {
                        debug!("fetch worker receiver dropped");
                        return;
                    }
                }
                Err(e) => {
                    let _ = tx.send(FetchEvent::Failed(e)).await;
                    return;
                }
            }
        }
        let _ = tx
            .send(FetchEvent::Finished {
                loaded: pipeline.loaded(),
            })
            .await;
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_payload, MockSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pipeline(source: MockSource, config: FetchConfig) -> FetchPipeline<MockSource, StdRng> {
        FetchPipeline::new(source, StdRng::seed_from_u64(17), config)
    }

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.categories, 5);
        assert_eq!(config.clues_per_category, 5);
        assert_eq!(config.max_category_id, 18418);
        assert_eq!(config.max_failures, None);
    }

    #[test]
    fn test_max_category_id_floor() {
        assert_eq!(FetchConfig::new().with_max_category_id(0).max_category_id, 1);
    }

    #[test]
    fn test_source_error_mapping() {
        let status: SourceError = jservice::Error::Api {
            status: 404,
            message: String::new(),
        }
        .into();
        assert!(matches!(status, SourceError::Status(404)));

        let parse: SourceError = jservice::Error::Parse("eof".into()).into();
        assert!(matches!(parse, SourceError::Malformed(_)));

        let net: SourceError = jservice::Error::Network("refused".into()).into();
        assert!(matches!(net, SourceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_next_category_truncates_and_keeps_clues() {
        let source = MockSource::new().succeed(sample_payload(77, "birds", 8));
        let mut pipeline = pipeline(source, FetchConfig::default());

        let category = pipeline.next_category().await.unwrap();
        assert_eq!(category.external_id, 77);
        assert_eq!(category.title, "birds");
        assert_eq!(category.clues.len(), 5);

        let all = sample_payload(77, "birds", 8).clues;
        assert!(category.clues.iter().all(|c| all.contains(c)));
        assert_eq!(pipeline.loaded(), 1);
    }

    #[tokio::test]
    async fn test_ids_drawn_within_range() {
        let source = MockSource::new().fail_times(20).succeed(sample_payload(1, "x", 1));
        let config = FetchConfig::new().with_categories(1).with_max_category_id(3);
        let mut pipeline = pipeline(source, config);
        pipeline.run(|_| {}).await.unwrap();

        let requested = pipeline.source().requested_ids();
        assert_eq!(requested.len(), 21);
        assert!(requested.iter().all(|id| (1..=3).contains(id)));
    }

    #[tokio::test]
    async fn test_failures_are_skipped() {
        let source = MockSource::new()
            .fail()
            .succeed(sample_payload(10, "a", 5))
            .fail()
            .fail()
            .succeed(sample_payload(11, "b", 5));
        let config = FetchConfig::new().with_categories(2);
        let mut pipeline = pipeline(source, config);

        let mut titles = Vec::new();
        let loaded = pipeline.run(|c| titles.push(c.title)).await.unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(pipeline.failures(), 3);
        assert_eq!(pipeline.source().requested_ids().len(), 5);
    }

    #[tokio::test]
    async fn test_max_failures_terminates() {
        let source = MockSource::new()
            .succeed(sample_payload(1, "a", 5))
            .fail_times(10);
        let config = FetchConfig::new().with_max_failures(Some(4));
        let mut pipeline = pipeline(source, config);

        let mut loaded = 0;
        let result = pipeline.run(|_| loaded += 1).await;
        assert_eq!(
            result,
            Err(FetchError::Exhausted {
                loaded: 1,
                failures: 4
            })
        );
        assert_eq!(loaded, 1);
        assert_eq!(pipeline.source().requested_ids().len(), 5);
    }

    #[tokio::test]
    async fn test_worker_streams_categories() {
        let source = MockSource::new()
            .succeed(sample_payload(1, "a", 5))
            .fail()
            .succeed(sample_payload(2, "b", 5));
        let config = FetchConfig::new().with_categories(2);
        let mut rx = spawn_fetch_worker(pipeline(source, config));

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], FetchEvent::Category(c) if c.title == "a"));
        assert!(matches!(&events[1], FetchEvent::Category(c) if c.title == "b"));
        assert_eq!(events[2], FetchEvent::Finished { loaded: 2 });
    }

    #[tokio::test]
    async fn test_worker_reports_exhaustion() {
        let source = MockSource::new().fail_times(3);
        let config = FetchConfig::new().with_max_failures(Some(3));
        let mut rx = spawn_fetch_worker(pipeline(source, config));

        assert_eq!(
            rx.recv().await,
            Some(FetchEvent::Failed(FetchError::Exhausted {
                loaded: 0,
                failures: 3
            }))
        );
        assert_eq!(rx.recv().await, None);
    }
}
