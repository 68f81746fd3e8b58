use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Registry groups, in the order their sources are fetched
pub const SOURCE_GROUPS: [&str; 3] = ["domestic", "us_major", "gov_kr"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSource {
    pub group: String,
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(group: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Named feed sources grouped into domestic, major-foreign and government categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRegistry {
    sources: Vec<FeedSource>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<FeedSource>) -> Self {
        Self { sources }
    }

    /// Parse a registry document: `group: {source name: url}` for each known group.
    /// Missing groups are empty, unknown groups are ignored, declaration order is kept.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let doc: Value =
            serde_yaml::from_str(yaml).context("Failed to parse source registry YAML")?;
        if !doc.is_mapping() {
            anyhow::bail!("Source registry must be a mapping of groups to sources");
        }

        let mut sources = Vec::new();
        for group in SOURCE_GROUPS {
            let entries = match doc.get(group) {
                None | Some(Value::Null) => continue,
                Some(Value::Mapping(entries)) => entries,
                Some(_) => {
                    anyhow::bail!("Registry group {} must map source names to URLs", group)
                }
            };

            for (name, url) in entries {
                let name = name
                    .as_str()
                    .with_context(|| format!("Non-string source name in group {}", group))?;
                let url = url
                    .as_str()
                    .with_context(|| format!("Source {} in group {} has no URL", name, group))?;
                sources.push(FeedSource::new(group, name, url.trim()));
            }
        }

        Ok(Self { sources })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Source registry not found: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source registry: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid source registry: {}", path.display()))
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
