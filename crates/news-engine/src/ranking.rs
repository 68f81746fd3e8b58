use std::collections::HashSet;

use crate::expander::theme_scores;
use crate::models::{ClassifiedArticle, Digest};

pub const DEFAULT_HIGHLIGHT_CAP: usize = 8;

/// Key two titles collide on: trimmed, whitespace runs collapsed, lowercased
pub fn title_key(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Newest first, keeping only the first article seen for each title key.
/// Equal timestamps keep their incoming order.
pub fn rank_articles(mut articles: Vec<ClassifiedArticle>) -> Vec<ClassifiedArticle> {
    articles.sort_by(|a, b| b.published.cmp(&a.published));

    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(title_key(&article.title)))
        .collect()
}

/// Rank, score every surviving article, then cut the highlights to `cap`
pub fn assemble_digest(articles: Vec<ClassifiedArticle>, cap: usize) -> Digest {
    let mut highlights = rank_articles(articles);
    let theme_score = theme_scores(&highlights);
    highlights.truncate(cap);

    Digest {
        highlights,
        theme_score,
    }
}
