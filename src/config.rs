// src/config.rs
use crate::constants::{DEFAULT_REVALIDATE_SECS, MIN_WATCH_INTERVAL_SECS};
use crate::error::AppError;
use crate::site::GenreTable;
use crate::types::ApiKey;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Directory the generated site is written to
    #[arg(short, long, default_value = "public")]
    pub output_dir: String,

    /// Directory holding layout.hbs, list.hbs, detail.hbs and category.hbs (defaults to the built-in templates)
    #[arg(long)]
    pub templates: Option<String>,

    /// Site name shown in document titles and the header
    #[arg(long, default_value = "Techvenience")]
    pub site_name: String,

    /// Seconds a generated route stays fresh before it is rebuilt
    #[arg(long, default_value_t = DEFAULT_REVALIDATE_SECS)]
    pub revalidate: u64,

    /// Regenerate every route regardless of when it was last built
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Keep running, rebuilding every revalidation interval
    #[arg(short, long, default_value_t = false)]
    pub watch: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved site configuration, validated and ready to drive a build.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_key: ApiKey,
    pub genres: GenreTable,
    pub output_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
    pub site_name: String,
    pub revalidate: Duration,
    pub force: bool,
    pub watch: bool,
}

impl SiteConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`SiteConfig::resolve`], reading variables through `lookup`.
    pub fn resolve_with<F>(cli: CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key_str = lookup("NOTION_API_KEY").ok_or_else(|| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        let api_key = ApiKey::new(api_key_str)?;
        let genres = GenreTable::from_lookup(&lookup)?;

        if cli.revalidate == 0 {
            log::warn!("Revalidation interval is 0s; every route is rebuilt on every cycle");
            if cli.watch {
                log::warn!(
                    "Watch cycles are spaced at least {}s apart",
                    MIN_WATCH_INTERVAL_SECS
                );
            }
        }

        Ok(SiteConfig {
            api_key,
            genres,
            output_dir: PathBuf::from(cli.output_dir),
            template_dir: cli.templates.map(PathBuf::from),
            site_name: cli.site_name,
            revalidate: Duration::from_secs(cli.revalidate),
            force: cli.force,
            watch: cli.watch,
        })
    }

    /// Pause between watch-mode cycles: the revalidation interval, but never
    /// shorter than [`MIN_WATCH_INTERVAL_SECS`].
    pub fn watch_interval(&self) -> Duration {
        self.revalidate.max(Duration::from_secs(MIN_WATCH_INTERVAL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment() -> HashMap<&'static str, String> {
        HashMap::from([
            ("NOTION_API_KEY", "secret_abcdefghijklmnopqrstuvwxyz".to_string()),
            ("NOTION_AI_DATABASE_ID", "11111111111111111111111111111111".to_string()),
            ("NOTION_DESIGN_DATABASE_ID", "22222222222222222222222222222222".to_string()),
            ("NOTION_TIME_DATABASE_ID", "33333333333333333333333333333333".to_string()),
            ("NOTION_TECH_DATABASE_ID", "44444444444444444444444444444444".to_string()),
        ])
    }

    #[test]
    fn test_defaults() {
        let env = environment();
        let cli = CommandLineInput::parse_from(["notion2blog"]);
        let config = SiteConfig::resolve_with(cli, |name| env.get(name).cloned()).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.site_name, "Techvenience");
        assert_eq!(config.revalidate, Duration::from_secs(60));
        assert!(config.template_dir.is_none());
        assert!(!config.force && !config.watch);
        assert_eq!(config.genres.genres().len(), 4);
    }

    #[test]
    fn test_missing_api_key() {
        let mut env = environment();
        env.remove("NOTION_API_KEY");
        let cli = CommandLineInput::parse_from(["notion2blog", "--force"]);

        let err = SiteConfig::resolve_with(cli, |name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(msg) if msg.contains("NOTION_API_KEY")));
    }

    #[test]
    fn test_watch_interval_has_a_floor() {
        let env = environment();
        let cli = CommandLineInput::parse_from(["notion2blog", "--watch", "--revalidate", "0"]);
        let config = SiteConfig::resolve_with(cli, |name| env.get(name).cloned()).unwrap();

        assert_eq!(config.revalidate, Duration::ZERO);
        assert_eq!(config.watch_interval(), Duration::from_secs(1));

        let cli = CommandLineInput::parse_from(["notion2blog", "--watch", "--revalidate", "30"]);
        let config = SiteConfig::resolve_with(cli, |name| env.get(name).cloned()).unwrap();
        assert_eq!(config.watch_interval(), Duration::from_secs(30));
    }
}
