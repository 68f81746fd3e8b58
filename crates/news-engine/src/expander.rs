use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::ThemeCatalog;
use crate::models::{ClassifiedArticle, ThemeScores};

pub const DIRECT_WEIGHT: f64 = 1.0;
pub const RELATED_WEIGHT: f64 = 0.5;

/// Identifiers touched by one article, split by influence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Impact {
    pub direct: BTreeSet<String>,
    pub related: BTreeSet<String>,
}

pub struct TickerExpander<'a> {
    catalog: &'a ThemeCatalog,
}

impl<'a> TickerExpander<'a> {
    pub fn new(catalog: &'a ThemeCatalog) -> Self {
        Self { catalog }
    }

    /// Union of the direct and related sets of every matched theme.
    /// Unknown theme names contribute nothing.
    pub fn expand(&self, themes: &[String]) -> Impact {
        let mut impact = Impact::default();
        for theme in themes.iter().filter_map(|name| self.catalog.get(name)) {
            impact.direct.extend(theme.direct.iter().cloned());
            impact.related.extend(theme.related.iter().cloned());
        }
        impact
    }

    /// Spread theme scores onto identifiers: direct at full weight, related at half
    pub fn ticker_scores(&self, theme_score: &ThemeScores) -> BTreeMap<String, f64> {
        let mut scores = BTreeMap::new();
        for (name, score) in theme_score.iter() {
            let Some(theme) = self.catalog.get(name) else {
                continue;
            };
            for ticker in &theme.direct {
                *scores.entry(ticker.clone()).or_insert(0.0) += DIRECT_WEIGHT * score;
            }
            for ticker in &theme.related {
                *scores.entry(ticker.clone()).or_insert(0.0) += RELATED_WEIGHT * score;
            }
        }
        scores
    }
}

/// One point per article per matched theme
pub fn theme_scores<'a>(articles: impl IntoIterator<Item = &'a ClassifiedArticle>) -> ThemeScores {
    let mut scores = ThemeScores::new();
    for article in articles {
        for theme in &article.themes {
            scores.add(theme, 1.0);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ThemeEntry;
    use crate::models::FeedEntry;
    use crate::window::kst;
    use chrono::TimeZone;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::new(vec![
            ThemeEntry::new("macro", &["rate"], &["105560", "055550"], &["005930"]),
            ThemeEntry::new("chips", &["chip"], &["005930", "000660"], &["015760"]),
        ])
        .unwrap()
    }

    fn names(themes: &[&str]) -> Vec<String> {
        themes.iter().map(|t| t.to_string()).collect()
    }

    fn article(themes: &[&str]) -> ClassifiedArticle {
        ClassifiedArticle::new(
            FeedEntry {
                source: "wire".to_string(),
                title: "t".to_string(),
                link: "l".to_string(),
                published: kst().with_ymd_and_hms(2025, 10, 15, 6, 0, 0).unwrap(),
            },
            names(themes),
            Impact::default(),
        )
    }

    #[test]
    fn test_expand_unions_sets() {
        let catalog = catalog();
        let impact = TickerExpander::new(&catalog).expand(&names(&["macro", "chips"]));
        let direct: Vec<&str> = impact.direct.iter().map(String::as_str).collect();
        let related: Vec<&str> = impact.related.iter().map(String::as_str).collect();
        assert_eq!(direct, vec!["000660", "005930", "055550", "105560"]);
        // 005930 is direct via chips and stays related via macro
        assert_eq!(related, vec!["005930", "015760"]);
    }

    #[test]
    fn test_expand_nothing() {
        let catalog = catalog();
        let expander = TickerExpander::new(&catalog);
        assert_eq!(expander.expand(&[]), Impact::default());
        assert_eq!(expander.expand(&names(&["unknown"])), Impact::default());
    }

    #[test]
    fn test_theme_scores_count_articles() {
        let articles = vec![article(&["macro"]), article(&["macro", "chips"])];
        let scores = theme_scores(&articles);
        assert_eq!(scores.get("macro"), Some(2.0));
        assert_eq!(scores.get("chips"), Some(1.0));
    }

    #[test]
    fn test_two_articles_weight_direct_and_related() {
        let catalog = catalog();
        let articles = vec![article(&["macro"]), article(&["macro"])];
        let scores = TickerExpander::new(&catalog).ticker_scores(&theme_scores(&articles));
        assert_eq!(scores["105560"], 2.0);
        assert_eq!(scores["055550"], 2.0);
        assert_eq!(scores["005930"], 1.0);
        assert!(!scores.contains_key("000660"));
    }

    #[test]
    fn test_ticker_scores_accumulate_across_themes() {
        let catalog = catalog();
        let mut theme_score = ThemeScores::new();
        theme_score.add("macro", 2.0);
        theme_score.add("chips", 1.0);
        theme_score.add("retired-theme", 5.0);
        let scores = TickerExpander::new(&catalog).ticker_scores(&theme_score);
        // 0.5 * 2.0 as related in macro, 1.0 * 1.0 as direct in chips
        assert_eq!(scores["005930"], 2.0);
        assert_eq!(scores["015760"], 0.5);
        assert_eq!(scores.len(), 5);
    }
}
