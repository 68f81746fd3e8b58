use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ranking::DEFAULT_HIGHLIGHT_CAP;

/// Identifier -> human-readable name
pub type NameMap = HashMap<String, String>;

const APP_DIR: &str = "morning-brief";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sources_path: PathBuf,
    pub names_path: Option<PathBuf>,
    pub themes_path: Option<PathBuf>,
    cap: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let sources_path = match var("MORNING_BRIEF_SOURCES") {
            Some(path) => PathBuf::from(path),
            None => Self::default_sources_path().context(
                "MORNING_BRIEF_SOURCES not set and no config directory could be determined.\n\n\
                Set MORNING_BRIEF_SOURCES to the path of your news_sources.yaml, or place it at\n  \
                ~/.config/morning-brief/news_sources.yaml",
            )?,
        };

        Ok(Self {
            sources_path,
            names_path: var("MORNING_BRIEF_NAMES").map(PathBuf::from),
            themes_path: var("MORNING_BRIEF_THEMES").map(PathBuf::from),
            cap: var("MORNING_BRIEF_CAP"),
        })
    }

    /// Highlights cap from MORNING_BRIEF_CAP, validated only when asked for
    pub fn cap(&self) -> Result<usize> {
        match self.cap.as_deref() {
            Some(raw) => parse_cap(raw).context("MORNING_BRIEF_CAP is invalid"),
            None => Ok(DEFAULT_HIGHLIGHT_CAP),
        }
    }

    /// `<config_dir>/morning-brief/news_sources.yaml`
    pub fn default_sources_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("news_sources.yaml"))
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/morning-brief/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join(APP_DIR).join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

/// Highlights cap; must be a positive integer
pub fn parse_cap(raw: &str) -> Result<usize> {
    let cap: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid highlight cap: {}", raw))?;
    if cap == 0 {
        anyhow::bail!("Highlight cap must be at least 1");
    }
    Ok(cap)
}

/// Load an identifier -> display name mapping from YAML
pub fn load_name_map(path: &Path) -> Result<NameMap> {
    if !path.exists() {
        anyhow::bail!("Name lookup file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read name lookup: {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(NameMap::new());
    }

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse name lookup YAML from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars_all_set() {
        let config = Config::from_vars(vars(&[
            ("MORNING_BRIEF_SOURCES", "/etc/brief/sources.yaml"),
            ("MORNING_BRIEF_NAMES", "/etc/brief/names.yaml"),
            ("MORNING_BRIEF_THEMES", "/etc/brief/themes.yaml"),
            ("MORNING_BRIEF_CAP", "6"),
        ]))
        .unwrap();
        assert_eq!(config.sources_path, PathBuf::from("/etc/brief/sources.yaml"));
        assert_eq!(config.names_path, Some(PathBuf::from("/etc/brief/names.yaml")));
        assert_eq!(config.themes_path, Some(PathBuf::from("/etc/brief/themes.yaml")));
        assert_eq!(config.cap().unwrap(), 6);
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = Config::from_vars(vars(&[
            ("MORNING_BRIEF_SOURCES", "sources.yaml"),
            ("MORNING_BRIEF_NAMES", "  "),
        ]))
        .unwrap();
        assert_eq!(config.cap().unwrap(), DEFAULT_HIGHLIGHT_CAP);
        assert_eq!(config.names_path, None);
        assert_eq!(config.themes_path, None);
    }

    #[test]
    fn test_invalid_cap_fails_only_when_read() {
        let config = Config::from_vars(vars(&[
            ("MORNING_BRIEF_SOURCES", "sources.yaml"),
            ("MORNING_BRIEF_CAP", "lots"),
        ]))
        .unwrap();
        assert_eq!(config.sources_path, PathBuf::from("sources.yaml"));
        assert!(config.cap().is_err());
    }

    #[test]
    fn test_parse_cap() {
        assert_eq!(parse_cap(" 8 ").unwrap(), 8);
        assert!(parse_cap("0").is_err());
        assert!(parse_cap("-1").is_err());
    }

    #[test]
    fn test_load_name_map() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"105560\": KB금융\n\"005930\": 삼성전자").unwrap();
        let names = load_name_map(file.path()).unwrap();
        assert_eq!(names.get("105560").map(String::as_str), Some("KB금융"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_load_empty_name_map() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_name_map(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_name_map_missing_file() {
        let err = load_name_map(Path::new("/nonexistent/names.yaml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
