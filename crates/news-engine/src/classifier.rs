use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::catalog::ThemeCatalog;

struct ThemePatterns {
    name: String,
    keywords: Vec<Regex>,
}

/// Matches headlines against catalog keywords (case-insensitive substrings)
pub struct Classifier {
    themes: Vec<ThemePatterns>,
}

impl Classifier {
    pub fn new(catalog: &ThemeCatalog) -> Result<Self> {
        let mut themes = Vec::with_capacity(catalog.len());
        for theme in catalog.iter() {
            let keywords = theme
                .keywords
                .iter()
                .map(|kw| {
                    RegexBuilder::new(&regex::escape(kw))
                        .case_insensitive(true)
                        .build()
                        .with_context(|| format!("Invalid keyword {:?} in theme {}", kw, theme.name))
                })
                .collect::<Result<Vec<_>>>()?;
            themes.push(ThemePatterns {
                name: theme.name.clone(),
                keywords,
            });
        }

        Ok(Self { themes })
    }

    /// Themes whose keywords occur in `title`, in catalog order, each at most once
    pub fn classify(&self, title: &str) -> Vec<String> {
        self.themes
            .iter()
            .filter(|theme| theme.keywords.iter().any(|kw| kw.is_match(title)))
            .map(|theme| theme.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ThemeEntry;

    fn classifier() -> Classifier {
        let catalog = ThemeCatalog::new(vec![
            ThemeEntry::new("energy", &["oil", "opec"], &["010950"], &[]),
            ThemeEntry::new("macro", &["rate", "recession", "fed"], &["105560"], &[]),
            ThemeEntry::new("chips", &["chip", "gpu"], &["000660"], &[]),
        ])
        .unwrap();
        Classifier::new(&catalog).unwrap()
    }

    #[test]
    fn test_theme_included_once_for_many_keywords() {
        let themes = classifier().classify("Fed signals rate cut amid recession fears");
        assert_eq!(themes, vec!["macro"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classifier().classify("OPEC+ extends cuts"), vec!["energy"]);
        assert_eq!(classifier().classify("CHIP stocks rally"), vec!["chips"]);
    }

    #[test]
    fn test_substring_not_whole_word() {
        // "rate" inside "corporate", "oil" inside "turmoil"
        assert_eq!(
            classifier().classify("Corporate turmoil"),
            vec!["energy", "macro"]
        );
    }

    #[test]
    fn test_catalog_order_not_title_order() {
        let themes = classifier().classify("GPU demand lifts oil-rich funds as Fed waits");
        assert_eq!(themes, vec!["energy", "macro", "chips"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(classifier().classify("Local team wins the final").is_empty());
    }

    #[test]
    fn test_keywords_are_literal() {
        let catalog =
            ThemeCatalog::new(vec![ThemeEntry::new("odd", &["a.b", "(x"], &[], &[])]).unwrap();
        let classifier = Classifier::new(&catalog).unwrap();
        assert!(classifier.classify("axb").is_empty());
        assert_eq!(classifier.classify("A.B"), vec!["odd"]);
        assert_eq!(classifier.classify("f(x)"), vec!["odd"]);
    }

    #[test]
    fn test_builtin_korean_keywords() {
        let classifier = Classifier::new(&ThemeCatalog::builtin()).unwrap();
        let themes = classifier.classify("엔비디아 HBM 증설 발표… 반도체 공급 부족 우려");
        assert_eq!(themes, vec!["반도체/AI", "정책/정부"]);
    }
}
