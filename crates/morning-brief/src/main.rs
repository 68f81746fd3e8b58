use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use news_engine::{
    build_ticker_reasons, kst, load_name_map, Config, DigestFormatter,
    HttpFeedProvider, Localizer, NameMap, NewsEngine, SourceRegistry, ThemeCatalog,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TOP_TICKERS: usize = 10;

#[derive(Parser)]
#[command(name = "morning-brief")]
#[command(about = "Overnight market news digest: themes, impacted tickers and headlines")]
struct Args {
    /// Reference day (YYYY-MM-DD); defaults to today in KST
    #[arg(short, long)]
    date: Option<String>,

    /// Path to the news source registry (YAML)
    #[arg(short, long)]
    sources: Option<PathBuf>,

    /// Path to a ticker -> display name lookup (YAML)
    #[arg(short, long)]
    names: Option<PathBuf>,

    /// Path to a theme catalog overriding the built-in one (YAML)
    #[arg(short, long)]
    themes: Option<PathBuf>,

    /// Maximum number of highlights
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    cap: Option<usize>,

    /// Also print per-ticker reasons and weights
    #[arg(short, long)]
    reasons: bool,

    /// Print the digest as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep headlines in their original language
    #[arg(long)]
    no_localize: bool,
}

fn parse_reference_day(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", raw)),
        None => Ok(Utc::now().with_timezone(&kst()).date_naive()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("morning_brief=info,news_engine=info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let reference_day = parse_reference_day(args.date.as_deref())?;
    let sources_path = args.sources.unwrap_or_else(|| config.sources_path.clone());
    let cap = match args.cap {
        Some(cap) => cap,
        None => config.cap()?,
    };

    let registry = SourceRegistry::load(&sources_path)?;
    info!(
        path = %sources_path.display(),
        sources = registry.len(),
        "loaded source registry"
    );

    let catalog = match args.themes.or(config.themes_path) {
        Some(path) => ThemeCatalog::from_yaml_file(&path)?,
        None => ThemeCatalog::builtin(),
    };

    let names: Option<NameMap> = args
        .names
        .or(config.names_path)
        .map(|path| load_name_map(&path))
        .transpose()?;

    let localizer = if args.no_localize {
        Localizer::disabled()
    } else {
        Localizer::korean()
    };

    info!(%reference_day, cap, themes = catalog.len(), "collecting overnight news");
    let engine = NewsEngine::new(catalog, cap)?;
    let provider = HttpFeedProvider::new()?;
    let digest = engine
        .collect_news(&provider, &registry, reference_day)
        .await;

    if args.json {
        let json =
            serde_json::to_string_pretty(&digest).context("Failed to serialize digest")?;
        println!("{}", json);
        return Ok(());
    }

    let mut formatter = DigestFormatter::new(&localizer);
    if let Some(names) = names.as_ref() {
        formatter = formatter.with_names(names);
    }

    println!("{}", formatter.format_header(&digest));

    if args.reasons {
        let reasons = build_ticker_reasons(&digest.highlights, &localizer);
        if !reasons.is_empty() {
            println!("\n📌 종목별 근거");
            println!("{}", formatter.format_reasons(&reasons));
        }

        let weights = engine.ticker_scores(&digest.theme_score);
        if !weights.is_empty() {
            println!("\n📈 종목 가중치");
            println!("{}", formatter.format_ticker_scores(&weights, TOP_TICKERS));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_day() {
        assert_eq!(
            parse_reference_day(Some("2025-10-15")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
        );
    }

    #[test]
    fn test_cap_flag_must_be_positive() {
        let args = Args::try_parse_from(["morning-brief", "--cap", "5"]).unwrap();
        assert_eq!(args.cap, Some(5));
        assert!(Args::try_parse_from(["morning-brief", "--cap", "0"]).is_err());
        assert!(Args::try_parse_from(["morning-brief", "-c", "many"]).is_err());
        assert_eq!(Args::try_parse_from(["morning-brief"]).unwrap().cap, None);
    }

    #[test]
    fn test_parse_reference_day_invalid() {
        assert!(parse_reference_day(Some("15/10/2025")).is_err());
    }

    #[test]
    fn test_default_reference_day_is_kst_today() {
        let expected = Utc::now().with_timezone(&kst()).date_naive();
        let actual = parse_reference_day(None).unwrap();
        // tolerate a run that straddles midnight
        assert!(actual == expected || actual == expected.succ_opt().unwrap());
    }
}
