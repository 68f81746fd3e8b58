use std::collections::BTreeMap;

use crate::localize::Localizer;
use crate::models::ClassifiedArticle;

pub const MAX_REASONS_PER_TICKER: usize = 2;

/// Identifier -> supporting headline citations, newest first
pub type ReasonIndex = BTreeMap<String, Vec<String>>;

/// `[HH:MM] <headline> (<source>)`
pub fn citation(article: &ClassifiedArticle, localizer: &Localizer) -> String {
    format!(
        "[{}] {} ({})",
        article.short_time(),
        localizer.headline(&article.title),
        article.source
    )
}

/// Collect up to two citations per identifier from ranked highlights.
///
/// An article cites its direct identifiers, or its related ones when it has no
/// direct impact. Earlier (newer) articles are never displaced.
pub fn build_ticker_reasons(
    highlights: &[ClassifiedArticle],
    localizer: &Localizer,
) -> ReasonIndex {
    let mut reasons = ReasonIndex::new();
    for article in highlights {
        let targets = if article.tickers_direct.is_empty() {
            &article.tickers_related
        } else {
            &article.tickers_direct
        };
        if targets.is_empty() {
            continue;
        }

        let line = citation(article, localizer);
        for ticker in targets {
            let lines = reasons.entry(ticker.clone()).or_default();
            if lines.len() < MAX_REASONS_PER_TICKER {
                lines.push(line.clone());
            }
        }
    }
    reasons
}
