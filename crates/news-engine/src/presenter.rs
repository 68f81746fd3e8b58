use std::collections::BTreeMap;

use crate::config::NameMap;
use crate::localize::Localizer;
use crate::models::Digest;
use crate::reasons::{citation, ReasonIndex};

pub const HEADER: &str = "🌅 아침 시황/뉴스 (전일 15:30 ~ 오늘 08:30)";
pub const HOT_THEMES_LABEL: &str = "🔥 강한 테마: ";
pub const IMPACT_MARKER: &str = "→ 영향:";
const MAX_IMPACTED: usize = 3;
const MAX_HOT_THEMES: usize = 3;

/// Renders digests into short, mobile-friendly text blocks
pub struct DigestFormatter<'a> {
    localizer: &'a Localizer,
    names: Option<&'a NameMap>,
}

impl<'a> DigestFormatter<'a> {
    pub fn new(localizer: &'a Localizer) -> Self {
        Self {
            localizer,
            names: None,
        }
    }

    /// Show identifiers by display name where the lookup has one
    pub fn with_names(mut self, names: &'a NameMap) -> Self {
        self.names = Some(names);
        self
    }

    fn display_name<'b>(&'b self, ticker: &'b str) -> &'b str {
        self.names
            .and_then(|names| names.get(ticker))
            .map(String::as_str)
            .unwrap_or(ticker)
    }

    pub fn format_header(&self, digest: &Digest) -> String {
        let mut lines = vec![HEADER.to_string()];

        for article in &digest.highlights {
            let impacted: Vec<&str> = article
                .impacted(MAX_IMPACTED)
                .into_iter()
                .map(|ticker| self.display_name(ticker))
                .collect();
            let impacted = if impacted.is_empty() {
                "—".to_string()
            } else {
                impacted.join(", ")
            };
            lines.push(format!(
                "- {} {} {}",
                citation(article, self.localizer),
                IMPACT_MARKER,
                impacted
            ));
        }

        let hot = digest.theme_score.top(MAX_HOT_THEMES);
        if !hot.is_empty() {
            let names: Vec<&str> = hot.into_iter().map(|(name, _)| name).collect();
            lines.push(String::new());
            lines.push(format!("{}{}", HOT_THEMES_LABEL, names.join(", ")));
        }

        lines.join("\n")
    }

    /// One block per identifier: display name and code, then its citations
    pub fn format_reasons(&self, reasons: &ReasonIndex) -> String {
        let mut lines = Vec::new();
        for (ticker, citations) in reasons {
            let name = self.display_name(ticker);
            if name == ticker.as_str() {
                lines.push(ticker.clone());
            } else {
                lines.push(format!("{} ({})", name, ticker));
            }
            for line in citations {
                lines.push(format!("  {}", line));
            }
        }
        lines.join("\n")
    }

    /// Heaviest identifiers first; equal weights stay in code order
    pub fn format_ticker_scores(&self, scores: &BTreeMap<String, f64>, limit: usize) -> String {
        let mut ranked: Vec<(&String, &f64)> = scores.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(a.1));

        ranked
            .into_iter()
            .take(limit)
            .map(|(ticker, score)| format!("{} {:.1}", self.display_name(ticker), score))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
