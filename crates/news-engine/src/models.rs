use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

use crate::expander::Impact;

/// An entry exactly as a feed provider hands it over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub pub_date: Option<String>,
    pub updated: Option<String>,
}

impl RawEntry {
    /// First non-blank timestamp field, checked as `published`, `pubDate`, `updated`
    pub fn timestamp_field(&self) -> Option<&str> {
        [&self.published, &self.pub_date, &self.updated]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

/// A feed entry that passed validation, with its timestamp in the canonical zone
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub source: String,
    pub title: String,
    pub link: String,
    pub published: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedArticle {
    pub source: String,
    pub title: String,
    pub link: String,
    pub published: DateTime<FixedOffset>,
    pub themes: Vec<String>,
    pub tickers_direct: BTreeSet<String>,
    pub tickers_related: BTreeSet<String>,
    pub tickers: BTreeSet<String>,
}

impl ClassifiedArticle {
    pub fn new(entry: FeedEntry, themes: Vec<String>, impact: Impact) -> Self {
        let tickers = impact.direct.union(&impact.related).cloned().collect();
        Self {
            source: entry.source,
            title: entry.title,
            link: entry.link,
            published: entry.published,
            themes,
            tickers_direct: impact.direct,
            tickers_related: impact.related,
            tickers,
        }
    }

    /// Direct identifiers first, then related ones not already listed, capped at `limit`
    pub fn impacted(&self, limit: usize) -> Vec<&str> {
        self.tickers_direct
            .iter()
            .chain(
                self.tickers_related
                    .iter()
                    .filter(|t| !self.tickers_direct.contains(*t)),
            )
            .take(limit)
            .map(String::as_str)
            .collect()
    }

    pub fn short_time(&self) -> String {
        self.published.format("%H:%M").to_string()
    }
}

/// Per-theme article counts, kept in the order themes were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeScores {
    scores: Vec<(String, f64)>,
}

impl ThemeScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, theme: &str, amount: f64) {
        match self.scores.iter_mut().find(|(name, _)| name == theme) {
            Some((_, score)) => *score += amount,
            None => self.scores.push((theme.to_string(), amount)),
        }
    }

    pub fn get(&self, theme: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| name == theme)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest-scoring themes; equal scores keep their first-seen order
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for ThemeScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (name, score) in &self.scores {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

/// Ranked highlights plus theme scores for one reference day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Digest {
    pub highlights: Vec<ClassifiedArticle>,
    pub theme_score: ThemeScores,
}
