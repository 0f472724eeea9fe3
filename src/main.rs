// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2blog::{
    AppError, BuildOptions, CommandLineInput, NotionHttpClient, PageRenderer, SiteBuilder,
    SiteConfig,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2blog.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the site once, or keeps rebuilding it in watch mode.
async fn run(config: SiteConfig) -> Result<(), AppError> {
    let client = NotionHttpClient::new(&config.api_key)?;
    let pages = PageRenderer::new(
        &config.site_name,
        &config.genres,
        config.template_dir.as_deref(),
    )?;
    let builder = SiteBuilder::new(
        &client,
        &config.genres,
        &pages,
        BuildOptions {
            output_dir: config.output_dir.clone(),
            revalidate: config.revalidate,
            force: config.force,
        },
    );

    if config.watch {
        println!(
            "👀 Rebuilding {} every {}s (ctrl-c to stop)",
            config.output_dir.display(),
            config.watch_interval().as_secs()
        );
        return builder.watch(config.watch_interval()).await;
    }

    let report = builder.build().await?;
    println!("✓ {}", report);
    println!("📄 Site written to {}", config.output_dir.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SiteConfig::resolve(cli)?;

    run(config).await?;

    Ok(())
}
