// Public modules
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod expander;
pub mod localize;
pub mod models;
pub mod pipeline;
pub mod presenter;
pub mod provider;
pub mod ranking;
pub mod reasons;
pub mod registry;
pub mod timestamp;
pub mod window;

// Re-export commonly used types
pub use catalog::{ThemeCatalog, ThemeEntry};
pub use classifier::Classifier;
pub use config::{load_name_map, Config, NameMap};
pub use expander::{theme_scores, Impact, TickerExpander};
pub use localize::Localizer;
pub use models::{ClassifiedArticle, Digest, FeedEntry, RawEntry, ThemeScores};
pub use pipeline::{NewsEngine, SourceOutcome};
pub use presenter::DigestFormatter;
pub use provider::{FeedError, FeedProvider, HttpFeedProvider};
pub use ranking::assemble_digest;
pub use reasons::{build_ticker_reasons, ReasonIndex};
pub use registry::{FeedSource, SourceRegistry};
pub use window::{kst, OvernightWindow};
