use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::catalog::ThemeCatalog;
use crate::classifier::Classifier;
use crate::expander::TickerExpander;
use crate::models::{ClassifiedArticle, Digest, FeedEntry, RawEntry, ThemeScores};
use crate::provider::FeedProvider;
use crate::ranking::assemble_digest;
use crate::registry::{FeedSource, SourceRegistry};
use crate::timestamp::parse_timestamp;
use crate::window::OvernightWindow;

/// What one source contributed to a run
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Fetched {
        source: String,
        articles: Vec<ClassifiedArticle>,
    },
    Failed {
        source: String,
        reason: String,
    },
}

/// Window filter, classifier and ticker expansion over one theme catalog
pub struct NewsEngine {
    catalog: ThemeCatalog,
    classifier: Classifier,
    window: OvernightWindow,
    cap: usize,
}

impl NewsEngine {
    pub fn new(catalog: ThemeCatalog, cap: usize) -> Result<Self> {
        let classifier = Classifier::new(&catalog)?;
        Ok(Self {
            catalog,
            classifier,
            window: OvernightWindow::default(),
            cap,
        })
    }

    pub fn with_window(mut self, window: OvernightWindow) -> Self {
        self.window = window;
        self
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Validate, window-filter and classify one raw entry. None means the entry is dropped.
    pub fn classify_entry(
        &self,
        source: &str,
        entry: &RawEntry,
        reference_day: NaiveDate,
    ) -> Option<ClassifiedArticle> {
        let published = parse_timestamp(entry.timestamp_field()?, &self.window.zone)?;
        if !self.window.accepts(&published, reference_day) {
            return None;
        }

        let title = entry.title.as_deref().map(str::trim).unwrap_or_default();
        let link = entry.link.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            return None;
        }

        let themes = self.classifier.classify(title);
        let impact = TickerExpander::new(&self.catalog).expand(&themes);

        Some(ClassifiedArticle::new(
            FeedEntry {
                source: source.to_string(),
                title: title.to_string(),
                link: link.to_string(),
                published,
            },
            themes,
            impact,
        ))
    }

    /// Fetch one source. Provider failures become `Failed`, never errors.
    pub async fn collect_source<P: FeedProvider + ?Sized>(
        &self,
        provider: &P,
        source: &FeedSource,
        reference_day: NaiveDate,
    ) -> SourceOutcome {
        match provider.fetch(&source.url).await {
            Ok(entries) => {
                let total = entries.len();
                let articles: Vec<ClassifiedArticle> = entries
                    .iter()
                    .filter_map(|entry| self.classify_entry(&source.name, entry, reference_day))
                    .collect();
                debug!(
                    source = %source.name,
                    dropped = total - articles.len(),
                    "entries outside the window or incomplete"
                );
                SourceOutcome::Fetched {
                    source: source.name.clone(),
                    articles,
                }
            }
            Err(e) => SourceOutcome::Failed {
                source: source.name.clone(),
                reason: e.to_string(),
            },
        }
    }

    /// Run every registry source in order and assemble the digest for `reference_day`
    pub async fn collect_news<P: FeedProvider + ?Sized>(
        &self,
        provider: &P,
        registry: &SourceRegistry,
        reference_day: NaiveDate,
    ) -> Digest {
        let mut articles = Vec::new();

        for source in registry.sources() {
            match self.collect_source(provider, source, reference_day).await {
                SourceOutcome::Fetched {
                    source,
                    articles: found,
                } => {
                    info!(source = %source, articles = found.len(), "✓ source collected");
                    articles.extend(found);
                }
                SourceOutcome::Failed { source, reason } => {
                    warn!(source = %source, error = %reason, "✗ source skipped");
                }
            }
        }

        let digest = assemble_digest(articles, self.cap);
        info!(
            %reference_day,
            highlights = digest.highlights.len(),
            themes = digest.theme_score.len(),
            "digest assembled"
        );
        digest
    }

    pub fn ticker_scores(&self, theme_score: &ThemeScores) -> BTreeMap<String, f64> {
        TickerExpander::new(&self.catalog).ticker_scores(theme_score)
    }
}
